//! Confirmation dialogs for the per-row actions.
//!
//! All seven actions share three shapes: a free-text dialog (password,
//! email), a numeric dialog (quota delta/set, months, level) and a plain
//! confirmation (release usage). Submits are disabled until the input is
//! valid, so nothing unparsable is ever sent to the backend. While the
//! mutation is in flight the dialog shows a spinner; the panel's result pump
//! decides whether it closes.

use egui::{Button, Color32, RichText, Ui, Window};
use steward_business::{
    ChangeEmailCommand, ExtendSubscriptionCommand, QuotaCommand, ReleaseUsageCommand,
    ResetPasswordCommand, SubscriptionLevelCommand, UserAction, UserActionCompute,
    UserActionInput, UserActionKind, UserTableState, parse_amount, parse_whole,
    sanitize_numeric_input,
};
use steward_states::StateCtx;

use crate::text::{Text, tr};

struct TextDialogParams {
    user_id: i64,
    kind: UserActionKind,
    title: &'static str,
    description: &'static str,
    field: &'static str,
    destructive: bool,
}

struct NumericDialogParams {
    user_id: i64,
    kind: UserActionKind,
    title: &'static str,
    description: &'static str,
    field: &'static str,
    /// Whole numbers only (months, level).
    whole: bool,
}

/// Whether the numeric buffer is submittable for this dialog shape.
pub(crate) fn numeric_can_submit(whole: bool, raw: &str) -> bool {
    if whole {
        parse_whole(raw).is_some()
    } else {
        parse_amount(raw).is_some()
    }
}

/// Renders the dialog for the currently open action, if any.
pub(crate) fn show_current_dialog(state_ctx: &mut StateCtx, ui: &mut Ui) {
    match state_ctx.state::<UserTableState>().current_action {
        UserAction::None => {}
        UserAction::ResetPassword(user_id) => text_dialog(
            state_ctx,
            ui,
            TextDialogParams {
                user_id,
                kind: UserActionKind::ResetPassword,
                title: tr(Text::PasswordAction),
                description: tr(Text::PasswordActionDesc),
                field: tr(Text::PasswordField),
                destructive: true,
            },
        ),
        UserAction::ChangeEmail(user_id) => text_dialog(
            state_ctx,
            ui,
            TextDialogParams {
                user_id,
                kind: UserActionKind::ChangeEmail,
                title: tr(Text::EmailAction),
                description: tr(Text::EmailActionDesc),
                field: tr(Text::EmailField),
                destructive: true,
            },
        ),
        UserAction::AdjustQuota(user_id) => numeric_dialog(
            state_ctx,
            ui,
            NumericDialogParams {
                user_id,
                kind: UserActionKind::AdjustQuota,
                title: tr(Text::QuotaAction),
                description: tr(Text::QuotaActionDesc),
                field: tr(Text::QuotaField),
                whole: false,
            },
        ),
        UserAction::SetQuota(user_id) => numeric_dialog(
            state_ctx,
            ui,
            NumericDialogParams {
                user_id,
                kind: UserActionKind::SetQuota,
                title: tr(Text::QuotaSetAction),
                description: tr(Text::QuotaSetActionDesc),
                field: tr(Text::QuotaField),
                whole: false,
            },
        ),
        UserAction::ExtendSubscription(user_id) => numeric_dialog(
            state_ctx,
            ui,
            NumericDialogParams {
                user_id,
                kind: UserActionKind::ExtendSubscription,
                title: tr(Text::SubscriptionAction),
                description: tr(Text::SubscriptionActionDesc),
                field: tr(Text::MonthField),
                whole: true,
            },
        ),
        UserAction::SetSubscriptionLevel(user_id) => numeric_dialog(
            state_ctx,
            ui,
            NumericDialogParams {
                user_id,
                kind: UserActionKind::SetSubscriptionLevel,
                title: tr(Text::SubscriptionLevelAction),
                description: tr(Text::SubscriptionLevelActionDesc),
                field: tr(Text::LevelField),
                whole: true,
            },
        ),
        UserAction::ReleaseUsage(user_id) => release_dialog(state_ctx, ui, user_id),
    }
}

fn in_flight(state_ctx: &StateCtx) -> bool {
    state_ctx
        .cached::<UserActionCompute>()
        .map(UserActionCompute::is_in_flight)
        .unwrap_or(false)
}

fn spinner_row(ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(tr(Text::Applying));
    });
}

fn submit_label(destructive: bool) -> RichText {
    if destructive {
        RichText::new(tr(Text::Submit)).color(Color32::RED)
    } else {
        RichText::new(tr(Text::Submit))
    }
}

fn text_dialog(state_ctx: &mut StateCtx, ui: &mut Ui, params: TextDialogParams) {
    let busy = in_flight(state_ctx);
    let mut open = true;
    let mut submitted = false;
    let mut cancelled = false;

    Window::new(params.title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.label(params.description);
            ui.add_space(8.0);

            if busy {
                spinner_row(ui);
                return;
            }

            let state = state_ctx.state_mut::<UserTableState>();
            ui.horizontal(|ui| {
                ui.label(params.field);
                ui.text_edit_singleline(&mut state.text_input);
            });
            ui.add_space(16.0);

            let can_submit = !state.text_input.trim().is_empty();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_submit, Button::new(submit_label(params.destructive)))
                    .clicked()
                {
                    submitted = true;
                }
                if ui.button(tr(Text::Cancel)).clicked() {
                    cancelled = true;
                }
            });
        });

    if submitted {
        submit_text_action(state_ctx, params.kind, params.user_id);
    }
    if !open || cancelled {
        state_ctx.state_mut::<UserTableState>().close_action();
    }
}

fn numeric_dialog(state_ctx: &mut StateCtx, ui: &mut Ui, params: NumericDialogParams) {
    let busy = in_flight(state_ctx);
    let mut open = true;
    let mut submitted = false;
    let mut cancelled = false;

    Window::new(params.title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.label(params.description);
            ui.add_space(8.0);

            if busy {
                spinner_row(ui);
                return;
            }

            let state = state_ctx.state_mut::<UserTableState>();
            // Mirror the input filtering the backend-facing parser expects.
            let sanitized = sanitize_numeric_input(&state.amount_input);
            if sanitized != state.amount_input {
                state.amount_input = sanitized;
            }

            ui.horizontal(|ui| {
                ui.label(params.field);
                ui.text_edit_singleline(&mut state.amount_input);
            });
            ui.add_space(16.0);

            let can_submit = numeric_can_submit(params.whole, &state.amount_input);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_submit, Button::new(submit_label(false)))
                    .clicked()
                {
                    submitted = true;
                }
                if ui.button(tr(Text::Cancel)).clicked() {
                    cancelled = true;
                }
            });
        });

    if submitted {
        submit_numeric_action(state_ctx, params.kind, params.user_id);
    }
    if !open || cancelled {
        state_ctx.state_mut::<UserTableState>().close_action();
    }
}

fn release_dialog(state_ctx: &mut StateCtx, ui: &mut Ui, user_id: i64) {
    let busy = in_flight(state_ctx);
    let mut open = true;
    let mut submitted = false;
    let mut cancelled = false;

    Window::new(tr(Text::ReleaseAction))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.label(tr(Text::ReleaseActionDesc));
            ui.add_space(4.0);
            ui.colored_label(Color32::from_rgb(255, 165, 0), tr(Text::ReleaseWarning));
            ui.add_space(16.0);

            if busy {
                spinner_row(ui);
                return;
            }

            ui.horizontal(|ui| {
                if ui.button(submit_label(true)).clicked() {
                    submitted = true;
                }
                if ui.button(tr(Text::Cancel)).clicked() {
                    cancelled = true;
                }
            });
        });

    if submitted {
        state_ctx.update::<UserActionInput>(|input| {
            *input = UserActionInput::for_user(user_id);
        });
        state_ctx.enqueue_command::<ReleaseUsageCommand>();
    }
    if !open || cancelled {
        state_ctx.state_mut::<UserTableState>().close_action();
    }
}

fn submit_text_action(state_ctx: &mut StateCtx, kind: UserActionKind, user_id: i64) {
    let value = state_ctx
        .state::<UserTableState>()
        .text_input
        .trim()
        .to_owned();

    state_ctx.update::<UserActionInput>(|input| {
        *input = UserActionInput::for_user(user_id);
        match kind {
            UserActionKind::ResetPassword => input.password = Some(value.clone()),
            UserActionKind::ChangeEmail => input.email = Some(value.clone()),
            _ => {}
        }
    });

    match kind {
        UserActionKind::ResetPassword => state_ctx.enqueue_command::<ResetPasswordCommand>(),
        UserActionKind::ChangeEmail => state_ctx.enqueue_command::<ChangeEmailCommand>(),
        _ => {}
    }
}

fn submit_numeric_action(state_ctx: &mut StateCtx, kind: UserActionKind, user_id: i64) {
    let raw = state_ctx.state::<UserTableState>().amount_input.clone();

    state_ctx.update::<UserActionInput>(|input| {
        *input = UserActionInput::for_user(user_id);
        match kind {
            UserActionKind::AdjustQuota => input.amount = parse_amount(&raw),
            UserActionKind::SetQuota => {
                input.amount = parse_amount(&raw);
                input.absolute = true;
            }
            UserActionKind::ExtendSubscription => input.months = parse_whole(&raw),
            UserActionKind::SetSubscriptionLevel => input.level = parse_whole(&raw),
            _ => {}
        }
    });

    match kind {
        UserActionKind::AdjustQuota | UserActionKind::SetQuota => {
            state_ctx.enqueue_command::<QuotaCommand>();
        }
        UserActionKind::ExtendSubscription => {
            state_ctx.enqueue_command::<ExtendSubscriptionCommand>();
        }
        UserActionKind::SetSubscriptionLevel => {
            state_ctx.enqueue_command::<SubscriptionLevelCommand>();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use steward_business::{
        AdminConfig, NoticeState, RefreshUserListCommand, SessionState, UserListCompute,
        UserListQuery, UserRecord,
    };
    use steward_states::Time;

    use super::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            id: 1,
            username: "alice".to_owned(),
            email: Some("alice@example.com".to_owned()),
            quota: 100.0,
            used_quota: 0.0,
            is_subscribed: false,
            level: 2,
            total_month: 0,
            enterprise: false,
            is_banned: false,
            is_admin: false,
        }
    }

    fn dialog_ctx(action: UserAction) -> StateCtx {
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
        ctx.record_command(ChangeEmailCommand);
        ctx.record_command(ExtendSubscriptionCommand);
        ctx.record_command(SubscriptionLevelCommand);
        ctx.record_command(ReleaseUsageCommand);
        ctx.state_mut::<UserTableState>()
            .start_action(action, &sample_user());
        ctx
    }

    fn dialog_harness(ctx: StateCtx) -> Harness<'static, StateCtx> {
        Harness::new_ui_state(
            |ui, state_ctx: &mut StateCtx| {
                show_current_dialog(state_ctx, ui);
            },
            ctx,
        )
    }

    #[test]
    fn numeric_gate_accepts_amounts_and_wholes() {
        assert!(numeric_can_submit(false, "50"));
        assert!(numeric_can_submit(false, "1,5"));
        assert!(numeric_can_submit(false, "-12.25"));
        assert!(!numeric_can_submit(false, ""));
        assert!(!numeric_can_submit(false, "1.2.3"));

        assert!(numeric_can_submit(true, "3"));
        assert!(!numeric_can_submit(true, "3.5"));
        assert!(!numeric_can_submit(true, ""));
    }

    #[test]
    fn email_dialog_prefills_and_submits_change() {
        let ctx = dialog_ctx(UserAction::ChangeEmail(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        // Prefilled with the current address.
        assert_eq!(
            harness.state().state::<UserTableState>().text_input,
            "alice@example.com"
        );

        harness.state_mut().state_mut::<UserTableState>().text_input =
            "new@example.com".to_owned();
        harness.step();

        harness.get_by_label("Confirm").click();
        harness.step();

        let state_ctx = harness.state_mut();
        assert_eq!(state_ctx.pending_commands(), 1);
        assert_eq!(
            state_ctx.state::<UserActionInput>().email.as_deref(),
            Some("new@example.com")
        );
        assert_eq!(state_ctx.state::<UserActionInput>().user_id, Some(1));
    }

    #[test]
    fn quota_set_dialog_prefills_balance_and_sets_absolute() {
        let ctx = dialog_ctx(UserAction::SetQuota(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        assert_eq!(
            harness.state().state::<UserTableState>().amount_input,
            "100.00"
        );

        harness.state_mut().state_mut::<UserTableState>().amount_input = "50".to_owned();
        harness.step();

        harness.get_by_label("Confirm").click();
        harness.step();

        let state_ctx = harness.state_mut();
        let input = state_ctx.state::<UserActionInput>();
        assert_eq!(input.amount, Some(50.0));
        assert!(input.absolute);
        assert_eq!(state_ctx.pending_commands(), 1);
    }

    #[test]
    fn quota_delta_dialog_does_not_set_absolute() {
        let ctx = dialog_ctx(UserAction::AdjustQuota(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        harness.state_mut().state_mut::<UserTableState>().amount_input = "50".to_owned();
        harness.step();

        harness.get_by_label("Confirm").click();
        harness.step();

        let state_ctx = harness.state_mut();
        let input = state_ctx.state::<UserActionInput>();
        assert_eq!(input.amount, Some(50.0));
        assert!(!input.absolute);
    }

    #[test]
    fn unparsable_amount_disables_submit() {
        let ctx = dialog_ctx(UserAction::ExtendSubscription(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        harness.state_mut().state_mut::<UserTableState>().amount_input = "2.5".to_owned();
        harness.step();

        harness.get_by_label("Confirm").click();
        harness.step();

        // The submit button is disabled: nothing queued, nothing written.
        let state_ctx = harness.state_mut();
        assert_eq!(state_ctx.pending_commands(), 0);
        assert_eq!(state_ctx.state::<UserActionInput>().months, None);
    }

    #[test]
    fn cancel_closes_the_dialog() {
        let ctx = dialog_ctx(UserAction::ResetPassword(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        harness.get_by_label("Cancel").click();
        harness.step();

        let state_ctx = harness.state_mut();
        assert_eq!(
            state_ctx.state::<UserTableState>().current_action,
            UserAction::None
        );
        assert_eq!(state_ctx.pending_commands(), 0);
    }

    #[test]
    fn release_dialog_submits_with_only_the_user_id() {
        let ctx = dialog_ctx(UserAction::ReleaseUsage(1));
        let mut harness = dialog_harness(ctx);
        harness.step();

        assert!(harness.query_by_label_contains("cannot be undone").is_some());

        harness.get_by_label("Confirm").click();
        harness.step();

        let state_ctx = harness.state_mut();
        assert_eq!(state_ctx.pending_commands(), 1);
        let input = state_ctx.state::<UserActionInput>();
        assert_eq!(input.user_id, Some(1));
        assert_eq!(input.amount, None);
        assert_eq!(input.months, None);
    }

    #[test]
    fn in_flight_dialog_shows_spinner_instead_of_inputs() {
        let mut ctx = dialog_ctx(UserAction::AdjustQuota(1));
        if let Some(action) = ctx.cached_mut::<UserActionCompute>() {
            *action = UserActionCompute::in_flight(UserActionKind::AdjustQuota, 1);
        }

        let mut harness = dialog_harness(ctx);
        harness.step();

        assert!(harness.query_by_label_contains("Applying").is_some());
        assert!(harness.query_by_label("Confirm").is_none());
    }
}
