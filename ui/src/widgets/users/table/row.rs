//! Row rendering for the users table.

use egui_extras::TableRow;
use steward_business::{UserAction, UserRecord};

use super::cells::{
    render_actions_cell, render_amount_cell, render_count_cell, render_email_cell,
    render_flag_cell, render_id_cell, render_text_cell,
};

/// Renders one user row; cell order must stay in sync with
/// [`super::columns::table_columns`]. Returns the action picked from the row
/// menu, if any.
pub fn render_user_row(row: &mut TableRow<'_, '_>, user: &UserRecord) -> Option<UserAction> {
    let mut action = None;

    row.col(|ui| {
        render_id_cell(ui, user.id);
    });
    row.col(|ui| {
        render_text_cell(ui, &user.username);
    });
    row.col(|ui| {
        render_email_cell(ui, user.email.as_deref());
    });
    row.col(|ui| {
        render_amount_cell(ui, user.quota);
    });
    row.col(|ui| {
        render_amount_cell(ui, user.used_quota);
    });
    row.col(|ui| {
        render_flag_cell(ui, user.is_subscribed);
    });
    row.col(|ui| {
        render_count_cell(ui, user.level);
    });
    row.col(|ui| {
        render_count_cell(ui, user.total_month);
    });
    #[cfg(feature = "enterprise")]
    row.col(|ui| {
        render_flag_cell(ui, user.enterprise);
    });
    row.col(|ui| {
        render_flag_cell(ui, user.is_banned);
    });
    row.col(|ui| {
        render_flag_cell(ui, user.is_admin);
    });
    row.col(|ui| {
        if let Some(picked) = render_actions_cell(ui, user.id) {
            action = Some(picked);
        }
    });

    action
}
