//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_session;
pub mod create_message;
pub mod delete_message;
pub mod disconnect_session;
pub mod edit_message;
pub mod error;
pub mod fetch_history;
mod guard;
pub mod mark_read;
pub mod notify_typing;
pub mod route_event;

pub use connect_session::ConnectSessionUseCase;
pub use create_message::CreateMessageUseCase;
pub use delete_message::DeleteMessageUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use edit_message::EditMessageUseCase;
pub use error::{AdmissionError, EventError, HistoryError};
pub use fetch_history::{FetchHistoryUseCase, MAX_HISTORY_LIMIT};
pub use mark_read::MarkReadUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use route_event::EventRouter;
