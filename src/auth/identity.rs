//! Who is on the other end of a connection: a resolved user or nobody.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary key of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Read a user id out of a token claim. Issuers emit either a JSON integer or its string form.
    pub fn from_claim(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(UserId),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(UserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// Identity attached to a connection by the auth middleware.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Identity {
    Authenticated(User),
    #[default]
    Anonymous,
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

impl From<Option<User>> for Identity {
    fn from(user: Option<User>) -> Self {
        user.map(Identity::Authenticated).unwrap_or_default()
    }
}
