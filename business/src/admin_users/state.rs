//! State for the user-table screen.
//!
//! This file lives in the business crate so UI code can remain "dumb":
//! - UI reads state + computes and renders
//! - UI enqueues commands
//! - State / compute / command definitions live here
//!
//! Dialog state is a single tagged action plus one set of input buffers:
//! only one confirmation dialog can be open at a time, so per-action open
//! flags would just multiply the state surface.

use std::any::Any;

use steward_states::State;

use crate::types::UserRecord;

/// The currently open per-row action, carrying the target user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserAction {
    /// No dialog open.
    #[default]
    None,

    /// Reset the user's password (destructive; invalidates the session when
    /// the target is the signed-in admin).
    ResetPassword(i64),

    /// Change the user's email address.
    ChangeEmail(i64),

    /// Add to / subtract from the quota balance.
    AdjustQuota(i64),

    /// Overwrite the quota balance.
    SetQuota(i64),

    /// Grant subscription months.
    ExtendSubscription(i64),

    /// Set the subscription tier.
    SetSubscriptionLevel(i64),

    /// Release/reclaim subscription usage (no input).
    ReleaseUsage(i64),
}

impl UserAction {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::ResetPassword(id)
            | Self::ChangeEmail(id)
            | Self::AdjustQuota(id)
            | Self::SetQuota(id)
            | Self::ExtendSubscription(id)
            | Self::SetSubscriptionLevel(id)
            | Self::ReleaseUsage(id) => Some(*id),
        }
    }
}

/// State for the user-table screen: the open action, its input buffers and a
/// little bookkeeping for surfacing fetch errors exactly once.
#[derive(Debug, Clone, Default)]
pub struct UserTableState {
    /// Action whose confirmation dialog is currently open.
    pub current_action: UserAction,

    /// Free-text buffer (password / email dialogs).
    pub text_input: String,

    /// Numeric buffer (quota / months / level dialogs).
    pub amount_input: String,

    /// Last list-fetch error already surfaced as a notice.
    reported_list_error: Option<String>,
}

impl UserTableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `action`, prefilling inputs from the row.
    pub fn start_action(&mut self, action: UserAction, user: &UserRecord) {
        self.current_action = action;
        self.text_input.clear();
        self.amount_input.clear();

        match action {
            UserAction::ChangeEmail(_) => {
                self.text_input = user.email.clone().unwrap_or_default();
            }
            UserAction::AdjustQuota(_) | UserAction::ExtendSubscription(_) => {
                self.amount_input = "0".to_owned();
            }
            UserAction::SetQuota(_) => {
                self.amount_input = format!("{:.2}", user.quota);
            }
            UserAction::SetSubscriptionLevel(_) => {
                self.amount_input = user.level.to_string();
            }
            _ => {}
        }
    }

    /// Close the current dialog and clear its buffers.
    pub fn close_action(&mut self) {
        self.current_action = UserAction::None;
        self.text_input.clear();
        self.amount_input.clear();
    }

    /// Record a list-fetch error; returns true the first time this exact
    /// error is seen, so the caller raises one notice per failed fetch.
    pub fn note_list_error(&mut self, error: &str) -> bool {
        if self.reported_list_error.as_deref() == Some(error) {
            return false;
        }
        self.reported_list_error = Some(error.to_owned());
        true
    }

    /// Forget the reported error; called when a new fetch starts so the next
    /// failure is surfaced again even with an identical message.
    pub fn clear_list_error_report(&mut self) {
        self.reported_list_error = None;
    }
}

impl State for UserTableState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
