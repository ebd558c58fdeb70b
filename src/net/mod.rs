//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the authenticated request pipeline, `api` holds the service
//! calls built on it, and `types` defines the auth wire schema and errors.

pub mod api;
pub mod client;
pub mod types;
