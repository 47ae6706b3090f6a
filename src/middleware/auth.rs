//! Auth middleware: resolves the connecting user from the access token cookie.
//!
//! Runs on the WebSocket upgrade request, so once per connection. It never rejects:
//! whatever goes wrong, the request continues as `Identity::Anonymous`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use tracing::debug;

use crate::auth::{access_token_from_headers, Identity};
use crate::handlers::http::AppState;
use crate::services::resolve_identity;

/// Middleware: attach an `Identity` to the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = identify(&state, request.headers()).await;
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Token from cookie, verified, then looked up. Each failed step yields `Anonymous`.
pub async fn identify(state: &AppState, headers: &HeaderMap) -> Identity {
    let Some(token) = access_token_from_headers(headers, state.access_cookie_name()) else {
        debug!("no access token cookie; anonymous");
        return Identity::Anonymous;
    };

    let user_id = match state.tokens().verify(&token) {
        Ok(id) => id,
        Err(e) => {
            debug!(error = %e, "access token rejected; anonymous");
            return Identity::Anonymous;
        }
    };

    let identity = resolve_identity(state.users(), user_id).await;
    if identity.is_authenticated() {
        debug!(user_id = %user_id, "authenticated");
    }
    identity
}

/// Extractor: identity set by [`authenticate`]. Routes outside the middleware see `Anonymous`.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Identity>().cloned().unwrap_or_default())
    }
}
