//! Bookkeeping for in-flight command tasks.
//!
//! Each dispatch of a command gets a [`TaskId`] combining the command's
//! `TypeId` with a monotonically increasing generation. The generation is the
//! key of the latest-only filter in [`crate::StateCtx::sync_computes`]: only
//! updates from the highest generation per command type are applied. The
//! [`TaskHandle`] additionally carries a `CancellationToken` so a superseded
//! request can be told to stop early.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Identifier for one dispatch of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations are more recent dispatches of the same command.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to an in-flight command with cooperative cancellation.
///
/// Cancellation is cooperative: the command future must check the token (for
/// example with `tokio::select!`); even when it does not, its stale updates
/// are still filtered out by generation.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
