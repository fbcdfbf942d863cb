//! Networking for the auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the HTTP endpoints behind the `AuthApi` trait and `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
