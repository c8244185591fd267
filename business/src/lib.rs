//! Business layer of the Steward admin console.
//!
//! Everything the UI needs to drive the user-table screen lives here: wire
//! types, API calls, configuration, session identity, notices and the
//! computes/commands for fetching pages and mutating accounts. The UI crate
//! renders and enqueues; it defines no domain state of its own.

pub mod admin_users;
pub mod config;
pub mod http;
pub mod notices;
pub mod numeric;
pub mod session;
pub mod types;

pub use steward_utils::version_info;

pub use admin_users::{
    ChangeEmailCommand, ExtendSubscriptionCommand, QuotaCommand, RefreshUserListCommand,
    ReleaseUsageCommand, ResetPasswordCommand, SubscriptionLevelCommand, UserAction,
    UserActionCompute, UserActionInput, UserActionKind, UserActionState, UserListCompute,
    UserListQuery, UserListStatus, UserTableState,
};
pub use config::AdminConfig;
pub use http::{ApiClient, HttpError, HttpResult};
pub use notices::{Notice, NoticeState};
pub use numeric::{parse_amount, parse_whole, sanitize_numeric_input};
pub use session::SessionState;
pub use types::{CommonResponse, UserListEnvelope, UserPage, UserRecord};
