//! Middleware: cookie-token authentication for the WebSocket routes.

pub mod auth;

pub use auth::{authenticate, identify};
