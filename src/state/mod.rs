//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Only the session lives here; route and network modules take a
//! `SessionStore` handle rather than reaching for a global.

pub mod session;
