//! Reactive client state provided through Leptos context.

pub mod auth;
