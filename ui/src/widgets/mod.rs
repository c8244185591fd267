mod env_version;
mod toasts;
pub mod users;

pub use env_version::env_version;
pub use toasts::show_toasts;
pub use users::users_panel;
