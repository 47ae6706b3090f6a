//! Cookie-authenticated WebSocket gateway for chat rooms.
//!
//! WebSocket upgrades under `/socket-server/{user_id}/` pass through an auth middleware that
//! reads the access token cookie, verifies it, and resolves the user. Any failure falls back
//! to an anonymous identity instead of rejecting the connection. Other HTTP traffic is served
//! from a static directory.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::{PgUserStore, RoomHub, UserStore};

use axum::routing::get;
use handlers::http;
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the router (chat sockets, health, static files). Used by main and by integration tests.
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> axum::Router {
    let sockets = axum::Router::new()
        .route("/socket-server/:user_id/", get(handlers::chat_socket))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ));

    axum::Router::new()
        .route("/health", get(http::health))
        .merge(sockets)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
