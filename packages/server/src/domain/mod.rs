//! Domain layer for the messaging core.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Identity, Message, SessionContext};
pub use error::{AuthError, MessageError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory, SessionEpochFactory};
pub use repository::{IdentityVerifier, MessageRepository};
#[cfg(test)]
pub use repository::{MockIdentityVerifier, MockMessageRepository};
pub use value_object::{
    ConnectionId, ImageUrl, MessageContent, MessageId, RoomId, SessionEpoch, Timestamp, UserId,
};
