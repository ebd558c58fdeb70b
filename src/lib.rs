//! # rendezvous
//!
//! Client core for the activity-reservation application: the session store,
//! the role-based navigation guard, and the authenticated HTTP pipeline with
//! the backend service calls built on top of it.
//!
//! The session is an explicit `SessionStore` handle shared by the guard
//! (`router`) and the pipeline (`net`); both re-read it on every use.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
