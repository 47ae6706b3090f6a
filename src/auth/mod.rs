//! Authentication: cookie lookup, token verification, resolved identity.

mod cookie;
mod identity;
mod jwt;

pub use cookie::access_token_from_headers;
pub use identity::{Identity, User, UserId};
pub use jwt::TokenVerifier;
