//! Cell rendering functions for the users table.

use egui::{Color32, RichText, Ui};
use steward_business::UserAction;

use crate::text::{Text, tr, yes_no};

pub fn render_id_cell(ui: &mut Ui, id: i64) {
    ui.label(RichText::new(id.to_string()).monospace());
}

pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.label(text);
}

/// Email cell; a missing address renders as a dash.
pub fn render_email_cell(ui: &mut Ui, email: Option<&str>) {
    match email {
        Some(email) if !email.is_empty() => {
            ui.label(email);
        }
        _ => {
            ui.label("-");
        }
    }
}

/// Quota balances, always with two decimals.
pub fn render_amount_cell(ui: &mut Ui, value: f64) {
    ui.label(RichText::new(format!("{value:.2}")).monospace());
}

pub fn render_count_cell(ui: &mut Ui, value: i64) {
    ui.label(RichText::new(value.to_string()).monospace());
}

/// Boolean flags as Yes/No; Yes is tinted so banned/admin rows stand out.
pub fn render_flag_cell(ui: &mut Ui, value: bool) {
    if value {
        ui.label(RichText::new(yes_no(value)).color(Color32::from_rgb(34, 139, 34)));
    } else {
        ui.label(yes_no(value));
    }
}

/// The per-row "⋯" menu. Returns the action whose dialog should open.
pub fn render_actions_cell(ui: &mut Ui, user_id: i64) -> Option<UserAction> {
    let mut action = None;

    ui.menu_button("⋯", |ui| {
        if ui.button(tr(Text::PasswordAction)).clicked() {
            action = Some(UserAction::ResetPassword(user_id));
            ui.close();
        }
        if ui.button(tr(Text::EmailAction)).clicked() {
            action = Some(UserAction::ChangeEmail(user_id));
            ui.close();
        }
        if ui.button(tr(Text::QuotaAction)).clicked() {
            action = Some(UserAction::AdjustQuota(user_id));
            ui.close();
        }
        if ui.button(tr(Text::QuotaSetAction)).clicked() {
            action = Some(UserAction::SetQuota(user_id));
            ui.close();
        }
        if ui.button(tr(Text::SubscriptionAction)).clicked() {
            action = Some(UserAction::ExtendSubscription(user_id));
            ui.close();
        }
        if ui.button(tr(Text::ReleaseAction)).clicked() {
            action = Some(UserAction::ReleaseUsage(user_id));
            ui.close();
        }
        if ui.button(tr(Text::SubscriptionLevelAction)).clicked() {
            action = Some(UserAction::SetSubscriptionLevel(user_id));
            ui.close();
        }
    });

    action
}
