//! Shared helpers for integration tests.
//!
//! Each test starts its own server in-process on an ephemeral port.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use parlor_server::{
    build_app,
    domain::{MessageRepository, RoomId, UserId},
    infrastructure::{auth::JwtIdentityVerifier, repository::InMemoryMessageRepository},
    ui::state::AppState,
};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        Message,
        client::IntoClientRequest,
        http::{HeaderValue, header::AUTHORIZATION},
        protocol::frame::coding::CloseCode,
    },
};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with development login enabled
    pub async fn start() -> Self {
        Self::start_with(true).await
    }

    pub async fn start_with(dev_login: bool) -> Self {
        Self::start_with_repository(Arc::new(InMemoryMessageRepository::new()), dev_login).await
    }

    pub async fn start_with_repository(
        repository: Arc<dyn MessageRepository>,
        dev_login: bool,
    ) -> Self {
        let state = Arc::new(AppState::new(
            repository,
            Arc::new(JwtIdentityVerifier::new(
                b"integration-secret",
                chrono::Duration::minutes(10),
            )),
            50,
            dev_login,
        ));
        let app = build_app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room_id: &str) -> String {
        format!("ws://{}/ws/chat/{}", self.addr, room_id)
    }

    /// Log `user_id` in and return its bearer token
    pub async fn token(&self, user_id: &str) -> String {
        self.state
            .verifier
            .issue(&UserId::new(user_id.to_string()).unwrap())
            .await
            .expect("Failed to issue token")
    }

    /// Connect with the token in the query string and wait for admission
    pub async fn join(&self, room_id: &str, user_id: &str) -> WsStream {
        let before = self.connections(room_id).await;
        let token = self.token(user_id).await;
        let (ws, _) = connect_async(format!("{}?token={}", self.ws_url(room_id), token))
            .await
            .expect("Failed to connect");
        self.wait_for_connections(room_id, before + 1).await;
        ws
    }

    /// Connect with the token in the Authorization header
    pub async fn connect_with_header(&self, room_id: &str, token: &str) -> WsStream {
        let mut request = self.ws_url(room_id).into_client_request().unwrap();
        request.headers_mut().insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let (ws, _) = connect_async(request).await.expect("Failed to connect");
        ws
    }

    pub async fn connections(&self, room_id: &str) -> usize {
        self.state
            .registry
            .connection_count(&RoomId::new(room_id.to_string()).unwrap())
            .await
    }

    pub async fn wait_for_connections(&self, room_id: &str, expected: usize) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        while self.connections(room_id).await != expected {
            if tokio::time::Instant::now() > deadline {
                panic!(
                    "Room '{}' did not reach {} connections (has {})",
                    room_id,
                    expected,
                    self.connections(room_id).await
                );
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_json(ws: &mut WsStream, value: serde_json::Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Next text frame decoded as JSON
pub async fn recv_json(ws: &mut WsStream) -> serde_json::Value {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {other:?}"),
        }
    }
}

/// Assert no text frame arrives within `wait`
pub async fn expect_silence(ws: &mut WsStream, wait: Duration) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(wait, ws.next()).await {
        panic!("Unexpected frame: {text}");
    }
}

/// Wait for the server's close frame and return its code
pub async fn recv_close_code(ws: &mut WsStream) -> Option<CloseCode> {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for close");
        match msg {
            Some(Ok(Message::Close(frame))) => return frame.map(|f| f.code),
            Some(Ok(_)) => continue,
            Some(Err(_)) | None => return None,
        }
    }
}
