//! "List users" compute + refresh command.
//!
//! - A compute-shaped cache (`UserListCompute`) stores the latest page and
//!   fetch status. The previous page is retained across loading and failure
//!   so the table never blanks out under the admin.
//! - A manual-only command (`RefreshUserListCommand`) performs the network IO
//!   and updates the compute via `LatestOnlyUpdater::set()`.
//!
//! UI reads the compute via `ctx.cached::<UserListCompute>()` and triggers a
//! fetch via `ctx.enqueue_command::<RefreshUserListCommand>()`. Overlapping
//! refreshes resolve latest-dispatch-wins: the superseded request is
//! cancelled and its late updates are dropped by generation.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use steward_states::{Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, assign_impl};
use ustr::Ustr;

use crate::admin_users::api;
use crate::config::AdminConfig;
use crate::types::{UserPage, UserRecord};

/// Status of the last list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserListStatus {
    /// No fetch attempted yet.
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading,

    /// The held page is current.
    Ready,

    /// The last fetch failed; the held page (if any) is stale but kept.
    Error(String),
}

/// Compute-shaped cache for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserListCompute {
    page: Option<UserPage>,
    status: UserListStatus,
}

impl UserListCompute {
    pub fn loading(previous: Option<UserPage>) -> Self {
        Self {
            page: previous,
            status: UserListStatus::Loading,
        }
    }

    pub fn ready(page: UserPage) -> Self {
        Self {
            page: Some(page),
            status: UserListStatus::Ready,
        }
    }

    pub fn failed(previous: Option<UserPage>, message: String) -> Self {
        Self {
            page: previous,
            status: UserListStatus::Error(message),
        }
    }

    pub fn status(&self) -> &UserListStatus {
        &self.status
    }

    pub fn is_idle(&self) -> bool {
        self.status == UserListStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == UserListStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            UserListStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&UserPage> {
        self.page.as_ref()
    }

    pub fn into_page(self) -> Option<UserPage> {
        self.page
    }

    pub fn rows(&self) -> &[UserRecord] {
        self.page.as_ref().map(|page| page.data.as_slice()).unwrap_or(&[])
    }

    /// Reported page count; zero before the first successful fetch.
    pub fn total_pages(&self) -> u64 {
        self.page.as_ref().map(|page| page.total).unwrap_or(0)
    }
}

impl Compute for UserListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Query parameters of the list fetch, owned by the toolbar/pager widgets.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    /// Zero-based page index.
    pub page: u64,

    /// Username filter; empty means no filter.
    pub search: String,

    /// Optional override of the API base URL (tests point this at a mock
    /// server). Falls back to `AdminConfig::api_url()` when unset.
    pub api_base_url: Option<Ustr>,
}

impl State for UserListQuery {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

/// Manual-only command that fetches the current page.
#[derive(Debug, Default)]
pub struct RefreshUserListCommand;

impl Command for RefreshUserListCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: tokio_util::sync::CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let query: UserListQuery = snap.state();
        let config: AdminConfig = snap.state();
        let previous = snap.compute::<UserListCompute>().into_page();

        Box::pin(async move {
            let client = super::api_client(&config, query.api_base_url.as_ref());

            updater.set(UserListCompute::loading(previous.clone()));

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("RefreshUserListCommand: superseded, dropping request");
                    return;
                }
                result = api::get_user_list(&client, query.page, &query.search) => result,
            };

            match result {
                Ok(page) => {
                    log::info!(
                        "fetched user page {} ({} rows, {} pages)",
                        query.page,
                        page.data.len(),
                        page.total
                    );
                    updater.set(UserListCompute::ready(page));
                }
                Err(err) => {
                    log::warn!("user list fetch failed: {err}");
                    updater.set(UserListCompute::failed(previous, err.to_string()));
                }
            }
        })
    }
}
