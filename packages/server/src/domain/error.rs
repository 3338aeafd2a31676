//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageId too long error
    #[error("MessageId cannot exceed {max} characters (got {actual})")]
    MessageIdTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// ImageUrl validation error
    #[error("ImageUrl cannot be empty")]
    ImageUrlEmpty,

    /// ImageUrl too long error
    #[error("ImageUrl cannot exceed {max} characters (got {actual})")]
    ImageUrlTooLong { max: usize, actual: usize },
}

/// Errors related to Message domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Neither content nor an attachment reference was provided
    #[error("Message must carry content or an image reference")]
    EmptyPayload,
}

/// Errors returned by the message store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// The store could not be reached or rejected the operation
    #[error("Message store unavailable: {0}")]
    Unavailable(String),

    /// The record would break a message invariant
    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] MessageError),
}

/// Errors returned by the identity verifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Bearer token is missing")]
    MissingToken,

    #[error("Bearer token is invalid")]
    InvalidToken,

    #[error("Bearer token has expired")]
    Expired,

    /// The token was issued for an earlier login of the user
    #[error("Bearer token belongs to a superseded session")]
    StaleEpoch,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}
