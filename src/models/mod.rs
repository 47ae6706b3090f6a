//! Wire models for the chat WebSocket.

pub mod chat;

pub use chat::*;
