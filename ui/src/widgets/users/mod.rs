//! Users screen widgets:
//! - `panel`: toolbar, table/placeholder, pager and the action result pump
//! - `table`: table rendering (columns, header, row, cells)
//! - `dialogs`: per-action confirmation dialogs

mod dialogs;
mod panel;
pub mod table;

pub use panel::users_panel;
