//! Frames exchanged over the chat socket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{Identity, User, UserId};

/// Frame sent by a client: a chat line, or a `ping` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClientMessage {
    Control { event: ControlEvent },
    Chat { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    Ping,
}

/// Public part of a user, shown to other room members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl Sender {
    pub fn of(identity: &Identity) -> Option<Self> {
        identity.user().map(Sender::from)
    }
}

/// Frame sent by the server.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    ConnectionEstablished {
        data: ConnectionInfo,
    },
    ChatMessage {
        room: String,
        sender: Option<Sender>,
        message: String,
    },
    Pong,
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    pub connection_id: String,
    pub room: String,
    pub user: Option<Sender>,
}

/// Generate a unique connection id.
pub fn generate_connection_id() -> String {
    format!("{}.{}", std::process::id(), Uuid::new_v4().as_simple())
}
