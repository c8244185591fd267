//! Header rendering for the users table.

use egui_extras::TableRow;

use crate::text::{Text, tr};

/// Header labels in render order; must stay in sync with
/// [`super::columns::table_columns`] and the row cells.
pub(crate) fn header_labels() -> Vec<&'static str> {
    let mut labels = vec![
        tr(Text::ColId),
        tr(Text::ColUsername),
        tr(Text::ColEmail),
        tr(Text::ColQuota),
        tr(Text::ColUsedQuota),
        tr(Text::ColSubscribed),
        tr(Text::ColLevel),
        tr(Text::ColTotalMonth),
    ];
    #[cfg(feature = "enterprise")]
    labels.push(tr(Text::ColEnterprise));
    labels.push(tr(Text::ColBanned));
    labels.push(tr(Text::ColAdmin));
    labels.push(tr(Text::ColActions));
    labels
}

/// Renders the table header with bold labels.
pub fn render_table_header(header: &mut TableRow<'_, '_>) {
    for label in header_labels() {
        header.col(|ui| {
            ui.strong(label);
        });
    }
}
