//! Shared utilities for Parlor.
//!
//! Logging setup and time helpers used by the server and its tests.

pub mod logger;
pub mod time;
