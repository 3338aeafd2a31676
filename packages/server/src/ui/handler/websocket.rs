//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc::WeakSender, oneshot};

use crate::{
    infrastructure::{
        dto::websocket::{ClientEvent, ServerEvent},
        registry::outbound_channel,
    },
    ui::state::{AppState, ConnectQuery},
    usecase::{AdmissionError, EventError},
};

use super::http::bearer_token;

/// `GET /ws/chat/{room_id}`
///
/// The upgrade is always accepted; authentication runs on the open socket so
/// a rejected client sees a policy-violation close instead of a bare HTTP error.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(&headers));

    ws.on_upgrade(move |socket| handle_socket(socket, state, room_id, token))
}

async fn handle_socket(
    mut socket: WebSocket,
    state: Arc<AppState>,
    room_id: String,
    token: Option<String>,
) {
    // Create a channel for this connection to receive envelopes. Once admitted,
    // the registry holds the only strong sender, so eviction ends the queue.
    let (tx, mut rx) = outbound_channel();
    let notices = tx.downgrade();

    let ctx = match state
        .connect_usecase()
        .execute(room_id.clone(), token.as_deref(), tx)
        .await
    {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!("Rejected connection to room '{}': {}", room_id, e);
            let reason = match e {
                AdmissionError::Unauthenticated(_) => "unauthorized",
                AdmissionError::InvalidRoom(_) => "invalid room",
            };
            let _ = socket
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::POLICY,
                    reason: reason.into(),
                })))
                .await;
            return;
        }
    };
    tracing::info!(
        "User '{}' connected to room '{}' as {}",
        ctx.user_id,
        ctx.room_id,
        ctx.connection_id
    );

    let (mut sender, mut receiver) = socket.split();

    let recv_ctx = ctx.clone();
    let recv_state = state.clone();
    // Dropped when the send task ends, for any reason
    let (send_closed, mut send_closed_rx) = oneshot::channel::<()>();

    // Spawn a task to route events from this client.
    // It only stops while waiting for the next frame, never mid-event.
    let mut recv_task = tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                _ = &mut send_closed_rx => break,
                next = receiver.next() => next,
            };
            let Some(msg) = next else {
                break;
            };
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                recv_ctx.user_id,
                                e
                            );
                            continue;
                        }
                    };

                    if let Err(EventError::Unauthorized { message_id, .. }) =
                        recv_state.router.dispatch(&recv_ctx, event).await
                    {
                        notify_forbidden(&notices, message_id);
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("User '{}' requested close", recv_ctx.user_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward envelopes of the room to this client
    let mut send_task = tokio::spawn(async move {
        let _send_closed = send_closed;
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If the client stops sending, stop forwarding. If forwarding stops, let
    // the event in flight reach the room before the receive loop exits.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            if let Err(e) = recv_task.await {
                tracing::error!("Receive loop of '{}' failed: {}", ctx.user_id, e);
            }
        }
    };

    if state.disconnect_usecase().execute(&ctx).await {
        tracing::info!(
            "User '{}' disconnected from room '{}'",
            ctx.user_id,
            ctx.room_id
        );
    }
}

/// Local notice to the actor only; never broadcast.
fn notify_forbidden(notices: &WeakSender<String>, message_id: String) {
    let notice = ServerEvent::Error {
        reason: "forbidden".to_string(),
        message_id: Some(message_id),
    };
    match notice.to_json() {
        Ok(json) => {
            let delivered = notices
                .upgrade()
                .is_some_and(|tx| tx.try_send(json).is_ok());
            if !delivered {
                tracing::debug!("Connection closed before error notice was delivered");
            }
        }
        Err(e) => tracing::error!("Failed to serialize error notice: {}", e),
    }
}
