//! Route metadata and navigation authorization.
//!
//! ARCHITECTURE
//! ============
//! `route` defines typed descriptors, `table` validates and resolves them,
//! `guard` decides each transition, and `navigator` applies the decision.

pub mod guard;
pub mod navigator;
pub mod route;
pub mod table;
