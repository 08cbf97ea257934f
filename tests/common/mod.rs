//! Shared test utilities for script-hub integration tests
//!
//! Library-level tests drive the controllers through a scripted HTTP client;
//! CLI tests run the binary against an isolated config/cache home.

pub mod assertions;
pub mod fixtures;
pub mod home;
