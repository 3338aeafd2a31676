//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{AuthError, MessageError, RepositoryError, ValueObjectError};

/// 接続受付（認証）の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("Invalid room id: {0}")]
    InvalidRoom(ValueObjectError),
}

/// イベント処理の失敗。いずれの場合もイベントは破棄され、broadcast されない
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// 送信者以外による edit / delete
    #[error("User '{user_id}' may not modify message '{message_id}'")]
    Unauthorized { user_id: String, message_id: String },

    /// 空の create、不正な値
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 存在しない（または別ルームの）メッセージ
    #[error("Message not found: {0}")]
    NotFound(String),

    /// ストアの一時的な失敗。リトライはしない
    #[error("Message store failure: {0}")]
    Store(String),
}

impl From<RepositoryError> for EventError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::MessageNotFound(id) => EventError::NotFound(id),
            RepositoryError::Unavailable(reason) => EventError::Store(reason),
            RepositoryError::InvalidMessage(e) => e.into(),
        }
    }
}

impl From<ValueObjectError> for EventError {
    fn from(error: ValueObjectError) -> Self {
        EventError::Validation(error.to_string())
    }
}

impl From<MessageError> for EventError {
    fn from(error: MessageError) -> Self {
        EventError::Validation(error.to_string())
    }
}

/// 履歴取得の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("Invalid room id: {0}")]
    InvalidRoom(ValueObjectError),

    #[error("limit must be between 1 and {max} (got {actual})")]
    InvalidLimit { max: usize, actual: usize },

    #[error("Message store failure: {0}")]
    Store(String),
}
