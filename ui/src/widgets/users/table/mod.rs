//! Table rendering for the users screen, split into focused pieces:
//! - `columns`: column definitions and widths
//! - `header`: header row
//! - `cells`: cell renderers per column type
//! - `row`: one user row

mod cells;
pub mod columns;
pub mod header;
pub mod row;

use egui::Ui;
use egui_extras::TableBuilder;
use steward_business::{UserAction, UserRecord};

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};

/// Renders the users table; returns the action picked from any row menu.
pub fn render_users_table(ui: &mut Ui, rows: &[UserRecord]) -> Option<UserAction> {
    let mut action = None;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for column in table_columns() {
        builder = builder.column(column);
    }

    builder
        .header(HEADER_HEIGHT, |mut table_header| {
            header::render_table_header(&mut table_header);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                let user = &rows[table_row.index()];
                if let Some(picked) = row::render_user_row(&mut table_row, user) {
                    action = Some(picked);
                }
            });
        });

    action
}
