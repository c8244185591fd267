//! Column definitions for the users table.

use egui_extras::Column;

/// Fixed column widths for consistent table layout
pub const ID_WIDTH: f32 = 48.0;
pub const AMOUNT_WIDTH: f32 = 78.0;
pub const COUNT_WIDTH: f32 = 58.0;
pub const FLAG_WIDTH: f32 = 72.0;
pub const ACTIONS_WIDTH: f32 = 64.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Table column configuration, in render order. Username and email flex,
/// everything else is fixed.
pub fn table_columns() -> Vec<Column> {
    let mut columns = vec![
        Column::exact(ID_WIDTH),
        Column::remainder().at_least(110.0), // username
        Column::remainder().at_least(150.0), // email
        Column::exact(AMOUNT_WIDTH),         // quota
        Column::exact(AMOUNT_WIDTH),         // used quota
        Column::exact(FLAG_WIDTH),           // subscribed
        Column::exact(COUNT_WIDTH),          // level
        Column::exact(COUNT_WIDTH),          // total months
    ];
    #[cfg(feature = "enterprise")]
    columns.push(Column::exact(FLAG_WIDTH));
    columns.push(Column::exact(FLAG_WIDTH)); // banned
    columns.push(Column::exact(FLAG_WIDTH)); // admin
    columns.push(Column::exact(ACTIONS_WIDTH));
    columns
}
