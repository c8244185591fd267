//! The users screen: toolbar, table/placeholder, pager and the action result
//! pump.

use egui::{Button, TextEdit, Ui};
use steward_business::{
    NoticeState, RefreshUserListCommand, SessionState, UserActionCompute, UserActionKind,
    UserActionState, UserListCompute, UserListQuery, UserTableState,
};
use steward_states::{StateCtx, Time};

use super::{dialogs, table};
use crate::text::{Text, operate_failed_prompt, tr};

/// What fills the area under the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TablePlaceholder {
    Table,
    Spinner,
    Empty,
}

/// Rendering policy: keep showing the table when there are rows or the admin
/// has paged past the first page (avoids flicker when paging past the end);
/// otherwise a spinner while loading, else the empty-state label.
pub(crate) fn placeholder_for(page: u64, rows: usize, loading: bool) -> TablePlaceholder {
    if rows > 0 || page > 0 {
        TablePlaceholder::Table
    } else if loading {
        TablePlaceholder::Spinner
    } else {
        TablePlaceholder::Empty
    }
}

/// Pager button states: previous is enabled off the first page, next is
/// disabled exactly when `page + 1` equals the reported page count.
pub(crate) fn pager_flags(page: u64, total: u64) -> (bool, bool) {
    (page > 0, page + 1 != total)
}

/// Displays the users panel.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) {
    pump_action_results(state_ctx);
    surface_list_errors(state_ctx);

    // Initial fetch: the compute starts idle exactly once.
    if state_ctx
        .cached::<UserListCompute>()
        .map(UserListCompute::is_idle)
        .unwrap_or(false)
    {
        state_ctx.enqueue_command::<RefreshUserListCommand>();
    }

    toolbar(state_ctx, ui);
    ui.add_space(8.0);

    let list = state_ctx.cached::<UserListCompute>();
    let rows = list.map(|list| list.rows().to_vec()).unwrap_or_default();
    let total = list.map(UserListCompute::total_pages).unwrap_or(0);
    let loading = list.map(UserListCompute::is_loading).unwrap_or(false);
    let page = state_ctx.state::<UserListQuery>().page;

    match placeholder_for(page, rows.len(), loading) {
        TablePlaceholder::Table => {
            let action = table::render_users_table(ui, &rows);
            if let Some(action) = action
                && let Some(user) = action
                    .user_id()
                    .and_then(|id| rows.iter().find(|user| user.id == id))
            {
                state_ctx
                    .state_mut::<UserTableState>()
                    .start_action(action, user);
            }
            ui.add_space(8.0);
            pager(state_ctx, ui, page, total);
        }
        TablePlaceholder::Spinner => {
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                ui.spinner();
            });
        }
        TablePlaceholder::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                ui.label(tr(Text::EmptyUsers));
            });
        }
    }

    dialogs::show_current_dialog(state_ctx, ui);
}

/// Search field + search/refresh buttons. Enter in the field and both
/// buttons funnel into the same single enqueue, so one frame produces at
/// most one fetch.
fn toolbar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let loading = state_ctx
        .cached::<UserListCompute>()
        .map(UserListCompute::is_loading)
        .unwrap_or(false);

    let mut fetch = false;
    let query = state_ctx.state_mut::<UserListQuery>();
    ui.horizontal(|ui| {
        let response = ui.add(
            TextEdit::singleline(&mut query.search)
                .hint_text(tr(Text::SearchPlaceholder))
                .desired_width(220.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            fetch = true;
        }
        if ui.button(tr(Text::Search)).clicked() {
            fetch = true;
        }
        if ui.button(tr(Text::Refresh)).clicked() {
            fetch = true;
        }
        if loading {
            ui.spinner();
        }
    });

    if fetch {
        state_ctx.enqueue_command::<RefreshUserListCommand>();
    }
}

fn pager(state_ctx: &mut StateCtx, ui: &mut Ui, page: u64, total: u64) {
    let (prev_enabled, next_enabled) = pager_flags(page, total);

    let mut new_page = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(prev_enabled, Button::new("◀"))
            .on_hover_text(tr(Text::PrevPage))
            .clicked()
        {
            new_page = Some(page - 1);
        }
        ui.label((page + 1).to_string());
        if ui
            .add_enabled(next_enabled, Button::new("▶"))
            .on_hover_text(tr(Text::NextPage))
            .clicked()
        {
            new_page = Some(page + 1);
        }
    });

    if let Some(new_page) = new_page {
        state_ctx.state_mut::<UserListQuery>().page = new_page;
        state_ctx.enqueue_command::<RefreshUserListCommand>();
    }
}

/// Consume a finished mutation exactly once.
///
/// Success: notice, close the dialog, queue a refresh — and when the admin
/// just reset their own password (matched by stable user id), invalidate the
/// session. Failure: notice naming the reason, dialog stays open, no refresh.
pub(crate) fn pump_action_results(state_ctx: &mut StateCtx) {
    let finished = match state_ctx.cached::<UserActionCompute>() {
        Some(compute) if compute.is_finished() => compute.state().clone(),
        _ => return,
    };
    if let Some(compute) = state_ctx.cached_mut::<UserActionCompute>() {
        *compute = UserActionCompute::default();
    }

    let now = *state_ctx.state::<Time>().as_ref();
    match finished {
        UserActionState::Success { kind, user_id } => {
            state_ctx.state_mut::<NoticeState>().push(
                tr(Text::OperateSuccess),
                tr(Text::OperateSuccessPrompt),
                now,
            );
            if kind == UserActionKind::ResetPassword
                && state_ctx.state::<SessionState>().is_self(user_id)
            {
                log::info!("own password changed, invalidating the session");
                state_ctx.state_mut::<SessionState>().invalidate();
            }
            state_ctx.state_mut::<UserTableState>().close_action();
            state_ctx.enqueue_command::<RefreshUserListCommand>();
        }
        UserActionState::Error { message, .. } => {
            state_ctx.state_mut::<NoticeState>().push(
                tr(Text::OperateFailed),
                operate_failed_prompt(&message),
                now,
            );
        }
        UserActionState::Idle | UserActionState::InFlight { .. } => {}
    }
}

/// Raise one notice per failed fetch; the stale page stays on screen.
fn surface_list_errors(state_ctx: &mut StateCtx) {
    let (loading, error) = match state_ctx.cached::<UserListCompute>() {
        Some(list) => (list.is_loading(), list.error().map(str::to_owned)),
        None => return,
    };

    if loading {
        state_ctx
            .state_mut::<UserTableState>()
            .clear_list_error_report();
        return;
    }

    let Some(error) = error else { return };
    let now = *state_ctx.state::<Time>().as_ref();
    if state_ctx.state_mut::<UserTableState>().note_list_error(&error) {
        state_ctx
            .state_mut::<NoticeState>()
            .push(tr(Text::FetchFailed), error, now);
    }
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use steward_business::{
        AdminConfig, QuotaCommand, ResetPasswordCommand, UserActionInput, UserPage, UserRecord,
    };

    use super::*;

    fn sample_user(id: i64, username: &str) -> UserRecord {
        UserRecord {
            id,
            username: username.to_owned(),
            email: Some(format!("{username}@example.com")),
            quota: 100.0,
            used_quota: 12.5,
            is_subscribed: true,
            level: 1,
            total_month: 3,
            enterprise: false,
            is_banned: false,
            is_admin: false,
        }
    }

    fn test_state_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Time::default());
        ctx.add_state(AdminConfig::new("http://test".to_owned()));
        ctx.add_state(SessionState::default());
        ctx.add_state(NoticeState::default());
        ctx.add_state(UserListQuery::default());
        ctx.add_state(UserTableState::default());
        ctx.add_state(UserActionInput::default());
        ctx.record_compute(UserListCompute::default());
        ctx.record_compute(UserActionCompute::default());
        ctx.record_command(RefreshUserListCommand);
        ctx.record_command(QuotaCommand);
        ctx.record_command(ResetPasswordCommand);
        ctx
    }

    /// Several cells can repeat the same text (username and email both
    /// contain the username), so existence checks go through `query_all`.
    fn has_label(harness: &Harness<'_, StateCtx>, label: &str) -> bool {
        harness.query_all_by_label_contains(label).next().is_some()
    }

    fn with_loaded_page(total: u64, users: Vec<UserRecord>) -> StateCtx {
        let mut ctx = test_state_ctx();
        if let Some(list) = ctx.cached_mut::<UserListCompute>() {
            *list = UserListCompute::ready(UserPage { total, data: users });
        }
        ctx
    }

    // Pure policy helpers

    #[test]
    fn placeholder_policy_matches_spec() {
        // Empty first page: spinner while loading, empty label otherwise.
        assert_eq!(placeholder_for(0, 0, false), TablePlaceholder::Empty);
        assert_eq!(placeholder_for(0, 0, true), TablePlaceholder::Spinner);
        // Rows always win.
        assert_eq!(placeholder_for(0, 3, false), TablePlaceholder::Table);
        assert_eq!(placeholder_for(0, 3, true), TablePlaceholder::Table);
        // Paged past an empty page: keep the table/pager, no flicker.
        assert_eq!(placeholder_for(1, 0, false), TablePlaceholder::Table);
        assert_eq!(placeholder_for(1, 0, true), TablePlaceholder::Table);
    }

    #[test]
    fn pager_flags_disable_at_bounds() {
        // Previous disabled exactly on page 0.
        assert_eq!(pager_flags(0, 5), (false, true));
        assert_eq!(pager_flags(1, 5), (true, true));
        // Next disabled exactly when page + 1 == total.
        assert_eq!(pager_flags(4, 5), (true, false));
        assert_eq!(pager_flags(3, 5), (true, true));
    }

    // Action result pump

    #[test]
    fn successful_action_closes_dialog_and_queues_refresh() {
        let mut ctx = with_loaded_page(1, vec![sample_user(1, "alice")]);
        ctx.state_mut::<UserTableState>()
            .start_action(steward_business::UserAction::AdjustQuota(1), &sample_user(1, "alice"));
        if let Some(action) = ctx.cached_mut::<UserActionCompute>() {
            *action = UserActionCompute::success(UserActionKind::AdjustQuota, 1);
        }

        pump_action_results(&mut ctx);

        assert_eq!(
            ctx.state::<UserTableState>().current_action,
            steward_business::UserAction::None
        );
        assert_eq!(ctx.pending_commands(), 1);
        assert_eq!(ctx.state::<NoticeState>().len(), 1);
        // The compute was acknowledged back to idle.
        assert!(!ctx.cached::<UserActionCompute>().expect("recorded").is_finished());
    }

    #[test]
    fn failed_action_keeps_dialog_open_and_skips_refresh() {
        let mut ctx = with_loaded_page(1, vec![sample_user(1, "alice")]);
        ctx.state_mut::<UserTableState>()
            .start_action(steward_business::UserAction::AdjustQuota(1), &sample_user(1, "alice"));
        if let Some(action) = ctx.cached_mut::<UserActionCompute>() {
            *action = UserActionCompute::failed(
                UserActionKind::AdjustQuota,
                1,
                "insufficient balance".to_owned(),
            );
        }

        pump_action_results(&mut ctx);

        assert_eq!(
            ctx.state::<UserTableState>().current_action,
            steward_business::UserAction::AdjustQuota(1)
        );
        assert_eq!(ctx.pending_commands(), 0);
        let notice = ctx.state::<NoticeState>().iter().next().expect("one notice");
        assert!(notice.description.contains("insufficient balance"));
    }

    #[test]
    fn self_password_reset_invalidates_session() {
        let mut ctx = test_state_ctx();
        ctx.add_state(SessionState::signed_in(7, "root"));
        if let Some(action) = ctx.cached_mut::<UserActionCompute>() {
            *action = UserActionCompute::success(UserActionKind::ResetPassword, 7);
        }

        pump_action_results(&mut ctx);

        assert!(ctx.state::<SessionState>().is_invalidated());
        // The refresh is still queued alongside the invalidation.
        assert_eq!(ctx.pending_commands(), 1);
    }

    #[test]
    fn other_users_password_reset_keeps_session() {
        let mut ctx = test_state_ctx();
        ctx.add_state(SessionState::signed_in(7, "root"));
        if let Some(action) = ctx.cached_mut::<UserActionCompute>() {
            *action = UserActionCompute::success(UserActionKind::ResetPassword, 8);
        }

        pump_action_results(&mut ctx);

        assert!(!ctx.state::<SessionState>().is_invalidated());
    }

    // Widget behavior through the kittest harness

    #[test]
    fn headers_and_rows_render_for_a_loaded_page() {
        let ctx = with_loaded_page(
            1,
            vec![sample_user(1, "alice"), sample_user(2, "bob")],
        );

        let harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );

        assert!(has_label(&harness, "Username"));
        assert!(has_label(&harness, "Quota"));
        assert!(has_label(&harness, "alice"));
        assert!(has_label(&harness, "bob"));
        assert!(has_label(&harness, "alice@example.com"));
    }

    #[test]
    fn empty_first_page_shows_empty_state() {
        let ctx = with_loaded_page(0, Vec::new());

        let harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );

        assert!(harness.query_by_label_contains("No users found").is_some());
    }

    #[test]
    fn empty_later_page_keeps_table_and_pager() {
        let mut ctx = with_loaded_page(2, Vec::new());
        ctx.state_mut::<UserListQuery>().page = 1;

        let harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );

        // No empty-state flicker; the pager shows the 1-based page number.
        assert!(!has_label(&harness, "No users found"));
        assert!(harness.query_all_by_label("2").next().is_some());
    }

    #[test]
    fn search_button_queues_exactly_one_fetch_with_page_unchanged() {
        let mut ctx = with_loaded_page(3, vec![sample_user(1, "alice")]);
        ctx.state_mut::<UserListQuery>().page = 1;
        ctx.state_mut::<UserListQuery>().search = "ali".to_owned();

        let mut harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );
        harness.step();
        assert_eq!(harness.state().pending_commands(), 0);

        harness.get_by_label("Search").click();
        harness.step();

        let state_ctx = harness.state_mut();
        assert_eq!(state_ctx.pending_commands(), 1);
        assert_eq!(state_ctx.state::<UserListQuery>().page, 1);
        assert_eq!(state_ctx.state::<UserListQuery>().search, "ali");
    }

    #[test]
    fn next_page_button_advances_and_queues_fetch() {
        let ctx = with_loaded_page(3, vec![sample_user(1, "alice")]);

        let mut harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );
        harness.step();

        harness.get_by_label("▶").click();
        harness.step();

        let state_ctx = harness.state_mut();
        assert_eq!(state_ctx.state::<UserListQuery>().page, 1);
        assert_eq!(state_ctx.pending_commands(), 1);
    }

    #[test]
    fn prev_page_button_is_inert_on_first_page() {
        let ctx = with_loaded_page(3, vec![sample_user(1, "alice")]);

        let mut harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );
        harness.step();

        harness.get_by_label("◀").click();
        harness.step();

        let state_ctx = harness.state_mut();
        // Disabled button: page stays 0 and nothing was queued.
        assert_eq!(state_ctx.state::<UserListQuery>().page, 0);
        assert_eq!(state_ctx.pending_commands(), 0);
    }

    #[test]
    fn idle_list_triggers_the_initial_fetch() {
        let ctx = test_state_ctx();

        let mut harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );
        harness.step();

        assert_eq!(harness.state().pending_commands(), 1);
    }

    #[test]
    fn fetch_failure_raises_one_notice_and_keeps_stale_rows() {
        let mut ctx = with_loaded_page(1, vec![sample_user(1, "alice")]);
        if let Some(list) = ctx.cached_mut::<UserListCompute>() {
            let previous = list.clone().into_page();
            *list = UserListCompute::failed(previous, "connection refused".to_owned());
        }

        let mut harness = Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                users_panel(state_ctx, ui);
            },
            ctx,
        );
        harness.step();
        harness.step();

        let state_ctx = harness.state_mut();
        // Exactly one notice despite rendering several frames.
        assert_eq!(state_ctx.state::<NoticeState>().len(), 1);
        // The stale row is still visible.
        assert!(has_label(&harness, "alice"));
    }
}
