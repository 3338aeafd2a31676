//! Shared server state.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    domain::MessageRepository,
    infrastructure::{auth::JwtIdentityVerifier, registry::RoomRegistry},
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, EventRouter, FetchHistoryUseCase,
    },
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Message store（データアクセス層の抽象化）
    pub repository: Arc<dyn MessageRepository>,
    pub verifier: Arc<JwtIdentityVerifier>,
    /// Live connections per room
    pub registry: Arc<RoomRegistry>,
    pub router: EventRouter,
    /// Page size used when `?limit` is omitted
    pub history_limit: usize,
    pub dev_login: bool,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        verifier: Arc<JwtIdentityVerifier>,
        history_limit: usize,
        dev_login: bool,
    ) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        Self {
            router: EventRouter::new(repository.clone(), registry.clone()),
            repository,
            verifier,
            registry,
            history_limit,
            dev_login,
        }
    }

    pub fn connect_usecase(&self) -> ConnectSessionUseCase {
        ConnectSessionUseCase::new(self.verifier.clone(), self.registry.clone())
    }

    pub fn disconnect_usecase(&self) -> DisconnectSessionUseCase {
        DisconnectSessionUseCase::new(self.registry.clone())
    }

    pub fn history_usecase(&self) -> FetchHistoryUseCase {
        FetchHistoryUseCase::new(self.verifier.clone(), self.repository.clone())
    }
}
