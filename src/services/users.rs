//! User resolution behind a trait so the gate can run against Postgres or an in-memory store.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::{Identity, User, UserId};
use crate::db::{user_get_by_id, DbPool};
use crate::error::AppResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
}

/// Users table in PostgreSQL.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(user_get_by_id(&self.pool, id).await?.map(User::from))
    }
}

/// Look the user up; an unknown id or a failing store both yield `Anonymous`.
pub async fn resolve_identity(store: &dyn UserStore, id: UserId) -> Identity {
    match store.find_by_id(id).await {
        Ok(Some(user)) => Identity::Authenticated(user),
        Ok(None) => {
            debug!(user_id = %id, "token references unknown user");
            Identity::Anonymous
        }
        Err(e) => {
            warn!(user_id = %id, error = %e, "user lookup failed");
            Identity::Anonymous
        }
    }
}
