use steward_business::{
    AdminConfig, ChangeEmailCommand, ExtendSubscriptionCommand, NoticeState, QuotaCommand,
    RefreshUserListCommand, ReleaseUsageCommand, ResetPasswordCommand, SessionState,
    SubscriptionLevelCommand, UserActionCompute, UserActionInput, UserListCompute, UserListQuery,
    UserTableState,
};
use steward_states::{StateCtx, Time};

/// The main application state: one `StateCtx` with every state, compute and
/// command the console uses.
pub struct State {
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::with(AdminConfig::default(), SessionState::from_env())
    }
}

impl State {
    fn with(config: AdminConfig, session: SessionState) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        ctx.add_state(config);
        ctx.add_state(session);
        ctx.add_state(NoticeState::default());
        ctx.add_state(UserListQuery::default());
        ctx.add_state(UserTableState::default());
        ctx.add_state(UserActionInput::default());

        ctx.record_compute(UserListCompute::default());
        ctx.record_compute(UserActionCompute::default());

        ctx.record_command(RefreshUserListCommand);
        ctx.record_command(ResetPasswordCommand);
        ctx.record_command(ChangeEmailCommand);
        ctx.record_command(QuotaCommand);
        ctx.record_command(ExtendSubscriptionCommand);
        ctx.record_command(SubscriptionLevelCommand);
        ctx.record_command(ReleaseUsageCommand);

        Self { ctx }
    }

    /// State wired against an arbitrary base URL, for tests.
    pub fn test(base_url: String) -> Self {
        Self::with(AdminConfig::new(base_url), SessionState::default())
    }

    /// Test state with a signed-in admin identity.
    pub fn test_signed_in(base_url: String, user_id: i64, username: &str) -> Self {
        Self::with(
            AdminConfig::new(base_url),
            SessionState::signed_in(user_id, username),
        )
    }
}
