//! WebSocket handler: one chat room per path segment, messages fanned out to everyone in it.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::auth::Identity;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::models::{
    generate_connection_id, ClientMessage, ConnectionInfo, ControlEvent, Sender, ServerEvent,
};
use crate::services::rooms::ROOM_CAPACITY;

const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /socket-server/:user_id/ — upgrade into the room named by `user_id`.
///
/// The identity comes from the auth middleware and may be anonymous.
pub async fn chat_socket(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    identity: Identity,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    if !is_room_name(&user_id) {
        return Err(AppError::Validation(format!("invalid room: {}", user_id)));
    }
    Ok(ws.on_upgrade(move |socket| handle_socket(state, socket, user_id, identity)))
}

/// Room names are one or more word characters (letters, digits, `_`).
pub(crate) fn is_room_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Copy room broadcasts into one connection's outgoing queue. A full queue means the client
/// stopped reading; the frame is dropped rather than buffered.
async fn forward_room(
    mut room_rx: broadcast::Receiver<String>,
    tx: mpsc::Sender<String>,
    room: String,
) {
    loop {
        match room_rx.recv().await {
            Ok(payload) => match tx.try_send(payload) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(room = %room, "outgoing queue full; dropping frame");
                }
                Err(TrySendError::Closed(_)) => break,
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(room = %room, skipped, "connection fell behind room");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn frame(event: &ServerEvent) -> AppResult<String> {
    Ok(serde_json::to_string(event)?)
}

async fn handle_socket(state: AppState, socket: WebSocket, room: String, identity: Identity) {
    let connection_id = generate_connection_id();
    let sender = Sender::of(&identity);
    info!(
        connection_id = %connection_id,
        room = %room,
        user_id = ?identity.user_id(),
        "ws connected"
    );

    let (mut sink, mut stream) = socket.split();
    let room_rx = state.rooms().join(&room).await;

    let (tx, mut rx) = mpsc::channel::<String>(ROOM_CAPACITY);
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(Message::Text(msg)).await.is_err() {
                return;
            }
        }
        let _ = sink.close().await;
    });

    let hello = ServerEvent::ConnectionEstablished {
        data: ConnectionInfo {
            connection_id: connection_id.clone(),
            room: room.clone(),
            user: sender.clone(),
        },
    };
    match frame(&hello) {
        Ok(msg) => {
            let _ = tx.send(msg).await;
        }
        Err(e) => warn!(error = %e, "failed to encode greeting"),
    }

    let forward_task = tokio::spawn(forward_room(room_rx, tx.clone(), room.clone()));

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => {
                let reply = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Chat { message }) => {
                        let event = ServerEvent::ChatMessage {
                            room: room.clone(),
                            sender: sender.clone(),
                            message,
                        };
                        match frame(&event) {
                            Ok(payload) => {
                                let count = state.rooms().publish(&room, payload).await;
                                debug!(connection_id = %connection_id, room = %room, count, "chat message");
                            }
                            Err(e) => warn!(error = %e, "failed to encode chat message"),
                        }
                        None
                    }
                    Ok(ClientMessage::Control {
                        event: ControlEvent::Ping,
                    }) => Some(ServerEvent::Pong),
                    Err(e) => Some(ServerEvent::Error {
                        message: format!("invalid frame: {}", e),
                    }),
                };
                if let Some(event) = reply {
                    if let Ok(msg) = frame(&event) {
                        if tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    forward_task.abort();
    let _ = forward_task.await;
    state.rooms().leave(&room).await;

    drop(tx);
    if tokio::time::timeout(FLUSH_TIMEOUT, &mut send_task).await.is_err() {
        debug!(connection_id = %connection_id, "pending frames not flushed in time");
        send_task.abort();
    }
    info!(connection_id = %connection_id, room = %room, "ws disconnected");
}
