//! HTTP handlers and shared state.

use axum::{http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::services::{RoomHub, UserStore};

/// Shared application state for HTTP and WebSocket handlers.
#[derive(Clone)]
pub struct AppState {
    access_cookie_name: Arc<str>,
    tokens: Arc<TokenVerifier>,
    users: Arc<dyn UserStore>,
    rooms: RoomHub,
}

impl AppState {
    pub fn new(
        tokens: TokenVerifier,
        users: Arc<dyn UserStore>,
        rooms: RoomHub,
        access_cookie_name: impl Into<String>,
    ) -> Self {
        let access_cookie_name: String = access_cookie_name.into();
        Self {
            access_cookie_name: Arc::from(access_cookie_name),
            tokens: Arc::new(tokens),
            users,
            rooms,
        }
    }

    pub fn access_cookie_name(&self) -> &str {
        &self.access_cookie_name
    }
    pub fn tokens(&self) -> &TokenVerifier {
        &self.tokens
    }
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
    pub fn rooms(&self) -> &RoomHub {
        &self.rooms
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "chatgate" })),
    )
}
