//! Infrastructure layer: wire DTOs, collaborator implementations and the
//! in-memory room registry.

pub mod auth;
pub mod dto;
pub mod registry;
pub mod repository;
