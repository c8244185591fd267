//! Admin users domain module.
//!
//! This module is the single home for:
//! - State stored in `StateCtx` for the user-table screen (query, dialog
//!   state, mutation input)
//! - Computes that cache async results (list page, mutation progress)
//! - Business-layer API helpers for the `/admin/user/*` endpoints
//!
//! UI code under `ui/src/widgets/**` should not define domain
//! `State`/`Compute`/`Command`. It reads via `ctx.cached::<T>()` /
//! `ctx.state::<T>()` and triggers changes via `ctx.enqueue_command::<Cmd>()`.

pub mod action_command;
pub mod api;
pub mod list_command;
pub mod state;

use ustr::Ustr;

use crate::config::AdminConfig;
use crate::http::ApiClient;

pub use action_command::{
    ChangeEmailCommand, ExtendSubscriptionCommand, QuotaCommand, ReleaseUsageCommand,
    ResetPasswordCommand, SubscriptionLevelCommand, UserActionCompute, UserActionInput,
    UserActionKind, UserActionState,
};
pub use list_command::{RefreshUserListCommand, UserListCompute, UserListQuery, UserListStatus};
pub use state::{UserAction, UserTableState};

/// Build the API client for a command: explicit override first (tests point
/// it at a mock server), then the configured base.
pub(crate) fn api_client(config: &AdminConfig, override_base: Option<&Ustr>) -> ApiClient {
    let base = match override_base {
        Some(base) => base.as_str().to_owned(),
        None => config.api_url().as_str().to_owned(),
    };
    ApiClient::new(base, config.authorization().map(ToOwned::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_client_prefers_override() {
        let config = AdminConfig::new("https://real.example.com".to_owned());
        let override_base = Ustr::from("http://127.0.0.1:9999/api");

        let client = api_client(&config, Some(&override_base));
        let builder = client.get("/admin/user/list", &[]);
        assert!(format!("{builder:?}").contains("http://127.0.0.1:9999/api/admin/user/list"));

        let client = api_client(&config, None);
        let builder = client.get("/admin/user/list", &[]);
        assert!(format!("{builder:?}").contains("https://real.example.com/api/admin/user/list"));
    }
}
