//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page reads the shared `AppAuth` from context. Access control lives in
//! `router::RouteGuard`, not in the pages themselves.

pub mod account;
pub mod home;
pub mod login;
pub mod register;
