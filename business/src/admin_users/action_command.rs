//! Per-row mutation commands.
//!
//! Each dialog submit enqueues one of these commands. All of them share the
//! same shape:
//! - read `UserActionInput` (target id + value) from the snapshot
//! - publish `InFlight`, perform the call
//! - map the `CommonResponse` into `Success` or `Error{reason}`
//!
//! The UI consumes `UserActionCompute` once per finished action: success
//! closes the dialog, raises a notice and enqueues a list refresh; failure
//! raises a notice and leaves the dialog open.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use steward_states::{Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, assign_impl};
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::admin_users::api::{self, ApiResult};
use crate::config::AdminConfig;
use crate::types::CommonResponse;

/// Strongly-typed action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserActionKind {
    ResetPassword,
    ChangeEmail,
    AdjustQuota,
    SetQuota,
    ExtendSubscription,
    SetSubscriptionLevel,
    ReleaseUsage,
}

/// Lifecycle of the most recent mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserActionState {
    /// No mutation running or unconsumed.
    #[default]
    Idle,

    /// A mutation is in flight.
    InFlight { kind: UserActionKind, user_id: i64 },

    /// The mutation succeeded (server said `status: true`).
    Success { kind: UserActionKind, user_id: i64 },

    /// The mutation failed, with the server-provided (or transport) reason.
    Error {
        kind: UserActionKind,
        user_id: i64,
        message: String,
    },
}

/// Compute-shaped cache for mutation progress/results.
#[derive(Debug, Clone, Default)]
pub struct UserActionCompute {
    state: UserActionState,
}

impl UserActionCompute {
    pub fn in_flight(kind: UserActionKind, user_id: i64) -> Self {
        Self {
            state: UserActionState::InFlight { kind, user_id },
        }
    }

    pub fn success(kind: UserActionKind, user_id: i64) -> Self {
        Self {
            state: UserActionState::Success { kind, user_id },
        }
    }

    pub fn failed(kind: UserActionKind, user_id: i64, message: String) -> Self {
        Self {
            state: UserActionState::Error {
                kind,
                user_id,
                message,
            },
        }
    }

    pub fn state(&self) -> &UserActionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, UserActionState::InFlight { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            UserActionState::Success { .. } | UserActionState::Error { .. }
        )
    }
}

impl Compute for UserActionCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Input for the mutation commands. The dialog sets the fields its action
/// needs before enqueueing the command.
#[derive(Debug, Clone, Default)]
pub struct UserActionInput {
    /// Optional override of the API base URL; falls back to
    /// `AdminConfig::api_url()` when unset.
    pub api_base_url: Option<Ustr>,

    /// Target user id.
    pub user_id: Option<i64>,

    /// New password (for reset-password).
    pub password: Option<String>,

    /// New email (for change-email).
    pub email: Option<String>,

    /// Quota amount (delta or absolute, depending on `absolute`).
    pub amount: Option<f64>,

    /// Whether `amount` overwrites the balance instead of adjusting it.
    pub absolute: bool,

    /// Subscription months to grant (for extend-subscription).
    pub months: Option<i64>,

    /// Subscription tier (for set-level).
    pub level: Option<i64>,
}

impl UserActionInput {
    /// Fresh input targeting `user_id`; the caller fills in the one value
    /// field its action needs.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}

impl State for UserActionInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

fn fail_missing(updater: &LatestOnlyUpdater, kind: UserActionKind, field: &str) {
    updater.set(UserActionCompute::failed(
        kind,
        0,
        format!("missing required input field `{field}`"),
    ));
}

/// Map a finished call into the action compute.
fn finish(
    updater: &LatestOnlyUpdater,
    kind: UserActionKind,
    user_id: i64,
    result: ApiResult<CommonResponse>,
) {
    match result {
        Ok(resp) if resp.status => {
            updater.set(UserActionCompute::success(kind, user_id));
        }
        Ok(resp) => {
            log::warn!("{kind:?} for user {user_id} rejected: {}", resp.reason());
            updater.set(UserActionCompute::failed(
                kind,
                user_id,
                resp.reason().to_owned(),
            ));
        }
        Err(err) => {
            log::warn!("{kind:?} for user {user_id} failed: {err}");
            updater.set(UserActionCompute::failed(kind, user_id, err.to_string()));
        }
    }
}

#[derive(Debug, Default)]
pub struct ResetPasswordCommand;

impl Command for ResetPasswordCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = UserActionKind::ResetPassword;
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };
            let Some(password) = input.password else {
                fail_missing(&updater, kind, "password");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::update_password(&client, user_id, &password).await,
            );
        })
    }
}

#[derive(Debug, Default)]
pub struct ChangeEmailCommand;

impl Command for ChangeEmailCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = UserActionKind::ChangeEmail;
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };
            let Some(email) = input.email else {
                fail_missing(&updater, kind, "email");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::update_email(&client, user_id, &email).await,
            );
        })
    }
}

/// Covers both the delta adjustment and the absolute set; the backend call is
/// the same, distinguished by the `override` flag.
#[derive(Debug, Default)]
pub struct QuotaCommand;

impl Command for QuotaCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = if input.absolute {
                UserActionKind::SetQuota
            } else {
                UserActionKind::AdjustQuota
            };
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };
            let Some(amount) = input.amount else {
                fail_missing(&updater, kind, "amount");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::quota_operation(&client, user_id, amount, input.absolute).await,
            );
        })
    }
}

#[derive(Debug, Default)]
pub struct ExtendSubscriptionCommand;

impl Command for ExtendSubscriptionCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = UserActionKind::ExtendSubscription;
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };
            let Some(months) = input.months else {
                fail_missing(&updater, kind, "months");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::subscription_operation(&client, user_id, months).await,
            );
        })
    }
}

#[derive(Debug, Default)]
pub struct SubscriptionLevelCommand;

impl Command for SubscriptionLevelCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = UserActionKind::SetSubscriptionLevel;
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };
            let Some(level) = input.level else {
                fail_missing(&updater, kind, "level");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::subscription_level_operation(&client, user_id, level).await,
            );
        })
    }
}

#[derive(Debug, Default)]
pub struct ReleaseUsageCommand;

impl Command for ReleaseUsageCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let input: UserActionInput = snap.state();
        let config: AdminConfig = snap.state();

        Box::pin(async move {
            let kind = UserActionKind::ReleaseUsage;
            let Some(user_id) = input.user_id else {
                fail_missing(&updater, kind, "user_id");
                return;
            };

            updater.set(UserActionCompute::in_flight(kind, user_id));
            let client = super::api_client(&config, input.api_base_url.as_ref());
            finish(
                &updater,
                kind,
                user_id,
                api::release_usage_operation(&client, user_id).await,
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_state_transitions() {
        let compute = UserActionCompute::default();
        assert_eq!(compute.state(), &UserActionState::Idle);
        assert!(!compute.is_in_flight());
        assert!(!compute.is_finished());

        let compute = UserActionCompute::in_flight(UserActionKind::AdjustQuota, 3);
        assert!(compute.is_in_flight());
        assert!(!compute.is_finished());

        let compute = UserActionCompute::success(UserActionKind::AdjustQuota, 3);
        assert!(compute.is_finished());

        let compute =
            UserActionCompute::failed(UserActionKind::AdjustQuota, 3, "nope".to_owned());
        assert!(compute.is_finished());
        assert!(matches!(
            compute.state(),
            UserActionState::Error { message, .. } if message == "nope"
        ));
    }

    #[test]
    fn for_user_sets_only_the_target() {
        let input = UserActionInput::for_user(9);
        assert_eq!(input.user_id, Some(9));
        assert_eq!(input.password, None);
        assert_eq!(input.amount, None);
        assert!(!input.absolute);
    }
}
