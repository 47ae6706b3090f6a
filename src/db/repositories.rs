//! Repositories: read-only access to the users table. Rows are written by the account service.

use crate::auth::{User, UserId};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: row.username,
            email: row.email,
            is_active: row.is_active,
            date_joined: row.date_joined,
        }
    }
}

pub async fn user_get_by_id(pool: &DbPool, id: UserId) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, is_active, date_joined FROM users WHERE id = $1",
    )
    .bind(id.0)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
