//! Typed state/compute/command runtime shared by the business and UI crates.
//!
//! The pieces fit together like this:
//! - [`State`]: plain mutable data owned by the UI thread, stored in a
//!   [`StateCtx`] keyed by type.
//! - [`Compute`]: a cache that is only ever written by commands, read by the
//!   UI via `ctx.cached::<T>()`.
//! - [`Command`]: an async side effect (network IO). Dispatching snapshots the
//!   states/computes it reads, runs the future on a background runtime, and
//!   publishes results through a [`LatestOnlyUpdater`].
//! - [`StateCtx::sync_computes`]: applies published results at the start of a
//!   frame, dropping anything from a superseded dispatch so the screen always
//!   reflects the most recently requested operation.

mod command;
mod compute;
mod ctx;
mod error;
mod runtime;
mod snapshot;
mod state;
mod task;
mod time;

pub use command::{Command, LatestOnlyUpdater};
pub use compute::{Compute, assign_impl};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
pub use state::{State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use time::Time;
