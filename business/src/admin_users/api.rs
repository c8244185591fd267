//! Admin user API client helpers.
//!
//! This module performs network IO against the `/admin/user/*` endpoints and
//! is intended to be used by commands. Callers map results into compute
//! updates; no egui types appear here.

use serde::Serialize;

use crate::http::ApiClient;
use crate::types::{CommonResponse, UserListEnvelope, UserPage};

/// Minimal error wrapper for API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminApiError {
    message: String,
}

impl AdminApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AdminApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AdminApiError {}

/// A typed API result.
pub type ApiResult<T> = Result<T, AdminApiError>;

fn http_status_error(status: u16) -> AdminApiError {
    AdminApiError::new(format!("API returned status: {status}"))
}

/// GET `/admin/user/list?page=N&search=S`
pub async fn get_user_list(client: &ApiClient, page: u64, search: &str) -> ApiResult<UserPage> {
    let response = client
        .get(
            "/admin/user/list",
            &[("page", page.to_string().as_str()), ("search", search)],
        )
        .send()
        .await
        .map_err(|e| AdminApiError::new(e.to_string()))?;

    if response.status() != 200 {
        return Err(http_status_error(response.status()));
    }

    let envelope: UserListEnvelope = response
        .json()
        .map_err(|e| AdminApiError::new(format!("Failed to parse user list: {e}")))?;

    if !envelope.status {
        return Err(AdminApiError::new(envelope.reason()));
    }

    Ok(UserPage {
        total: envelope.total,
        data: envelope.data,
    })
}

#[derive(Debug, Serialize)]
struct PasswordForm<'a> {
    id: i64,
    password: &'a str,
}

/// POST `/admin/user/password`
pub async fn update_password(
    client: &ApiClient,
    user_id: i64,
    password: &str,
) -> ApiResult<CommonResponse> {
    post_common(
        client,
        "/admin/user/password",
        &PasswordForm {
            id: user_id,
            password,
        },
    )
    .await
}

#[derive(Debug, Serialize)]
struct EmailForm<'a> {
    id: i64,
    email: &'a str,
}

/// POST `/admin/user/email`
pub async fn update_email(
    client: &ApiClient,
    user_id: i64,
    email: &str,
) -> ApiResult<CommonResponse> {
    post_common(
        client,
        "/admin/user/email",
        &EmailForm { id: user_id, email },
    )
    .await
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

#[derive(Debug, Serialize)]
struct QuotaForm {
    id: i64,
    quota: f64,
    /// Absent for a delta adjustment, `true` to overwrite the balance.
    #[serde(rename = "override", skip_serializing_if = "is_false")]
    absolute: bool,
}

/// POST `/admin/user/quota`
///
/// `absolute` overwrites the quota instead of adding to it.
pub async fn quota_operation(
    client: &ApiClient,
    user_id: i64,
    quota: f64,
    absolute: bool,
) -> ApiResult<CommonResponse> {
    post_common(
        client,
        "/admin/user/quota",
        &QuotaForm {
            id: user_id,
            quota,
            absolute,
        },
    )
    .await
}

#[derive(Debug, Serialize)]
struct SubscriptionForm {
    id: i64,
    month: i64,
}

/// POST `/admin/user/subscription`
pub async fn subscription_operation(
    client: &ApiClient,
    user_id: i64,
    months: i64,
) -> ApiResult<CommonResponse> {
    post_common(
        client,
        "/admin/user/subscription",
        &SubscriptionForm {
            id: user_id,
            month: months,
        },
    )
    .await
}

#[derive(Debug, Serialize)]
struct LevelForm {
    id: i64,
    level: i64,
}

/// POST `/admin/user/level`
pub async fn subscription_level_operation(
    client: &ApiClient,
    user_id: i64,
    level: i64,
) -> ApiResult<CommonResponse> {
    post_common(
        client,
        "/admin/user/level",
        &LevelForm { id: user_id, level },
    )
    .await
}

#[derive(Debug, Serialize)]
struct ReleaseForm {
    id: i64,
}

/// POST `/admin/user/release`
pub async fn release_usage_operation(client: &ApiClient, user_id: i64) -> ApiResult<CommonResponse> {
    post_common(client, "/admin/user/release", &ReleaseForm { id: user_id }).await
}

async fn post_common<B: Serialize>(
    client: &ApiClient,
    path: &str,
    body: &B,
) -> ApiResult<CommonResponse> {
    let request = client
        .post(path)
        .json(body)
        .map_err(|e| AdminApiError::new(format!("Failed to serialize request: {e}")))?;

    let response = request
        .send()
        .await
        .map_err(|e| AdminApiError::new(e.to_string()))?;

    if response.status() != 200 {
        return Err(http_status_error(response.status()));
    }

    response
        .json()
        .map_err(|e| AdminApiError::new(format!("Failed to parse response: {e}")))
}
