//! Real-time room messaging server library.
//!
//! Clients join a room over WebSocket with a bearer token, then create, edit,
//! delete and mark messages read. Every accepted event is persisted first and
//! then fanned out to everyone in the room.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{build_app, run_server};
