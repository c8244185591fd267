//! Wire types shared by the admin API calls.

use serde::{Deserialize, Serialize};

/// One user account row as reported by the backend.
///
/// Rows are transient view copies: the console never mutates them locally,
/// every change goes through a mutation call and is observed by re-fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub quota: f64,
    #[serde(default)]
    pub used_quota: f64,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub total_month: i64,
    #[serde(default)]
    pub enterprise: bool,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// One fetched batch of user records.
///
/// `total` counts pages, not records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserPage {
    pub total: u64,
    pub data: Vec<UserRecord>,
}

/// Envelope of `GET /admin/user/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListEnvelope {
    pub status: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub data: Vec<UserRecord>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UserListEnvelope {
    pub fn reason(&self) -> &str {
        reason_of(self.message.as_deref(), self.error.as_deref())
    }
}

/// Success/failure envelope returned by every mutation call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CommonResponse {
    /// Human-readable failure reason: `message`, else `error`, else a
    /// generic label.
    pub fn reason(&self) -> &str {
        reason_of(self.message.as_deref(), self.error.as_deref())
    }
}

fn reason_of<'a>(message: Option<&'a str>, error: Option<&'a str>) -> &'a str {
    message.or(error).unwrap_or("the server gave no reason")
}
