//! Authenticated-admin session state.
//!
//! The console needs the session identity for exactly one thing: detecting
//! that the admin just reset their own password. The comparison is by stable
//! user id, not username, and the consequence is an explicit invalidation
//! flag the app reacts to — not a raw page reload.

use std::any::Any;

use steward_states::State;
use ustr::Ustr;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user_id: Option<i64>,
    username: Option<Ustr>,
    invalidated: bool,
}

impl SessionState {
    pub fn signed_in(user_id: i64, username: impl AsRef<str>) -> Self {
        Self {
            user_id: Some(user_id),
            username: Some(Ustr::from(username.as_ref())),
            invalidated: false,
        }
    }

    /// Session identity from the environment, for launching the console from
    /// an operator shell. Absent variables leave the session anonymous, which
    /// only disables the self-reset detection.
    pub fn from_env() -> Self {
        let user_id = std::env::var("STEWARD_ADMIN_ID")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok());
        let username = std::env::var("STEWARD_ADMIN_USER")
            .ok()
            .map(|name| Ustr::from(&name));
        Self {
            user_id,
            username,
            invalidated: false,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn username(&self) -> Option<Ustr> {
        self.username
    }

    /// True when `user_id` identifies the signed-in admin.
    pub fn is_self(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }

    /// Mark the session credentials as stale. The app swaps to a
    /// sign-in-again screen on the next frame.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}

impl State for SessionState {
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
