//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the auth rules, hashing, and session semantics so
//! route handlers can stay focused on request parsing and response shape.

pub mod auth;
pub mod password;
pub mod session;
