use std::any::{Any, TypeId};
use std::future::Future;
use std::pin::Pin;

use flume::Sender;
use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Compute};

/// An async side effect, dispatched explicitly via
/// [`crate::StateCtx::dispatch`] (never run implicitly).
///
/// The returned future runs on a background runtime, so it must be `Send` and
/// must not touch `StateCtx` directly: it reads through the snapshot and
/// writes through the updater. Long-running work should bail out when
/// `cancel` fires; a superseding dispatch of the same command cancels the
/// previous one.
pub trait Command: Any + Send {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// One compute value published by a command, tagged with the dispatch that
/// produced it.
pub(crate) struct ComputeUpdate {
    pub(crate) command: TypeId,
    pub(crate) generation: u64,
    pub(crate) compute: TypeId,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Write half handed to a running command.
///
/// Every update carries the generation of the dispatch that created this
/// updater. [`crate::StateCtx::sync_computes`] only applies updates whose
/// generation matches the latest dispatch of that command, so a response that
/// arrives after the user has already asked for something newer is discarded
/// instead of overwriting fresh data.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    command: TypeId,
    generation: u64,
    sender: Sender<ComputeUpdate>,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(command: TypeId, generation: u64, sender: Sender<ComputeUpdate>) -> Self {
        Self {
            command,
            generation,
            sender,
        }
    }

    /// Publish a new value for a compute cache.
    pub fn set<T: Compute + Send>(&self, value: T) {
        let update = ComputeUpdate {
            command: self.command,
            generation: self.generation,
            compute: TypeId::of::<T>(),
            value: Box::new(value),
        };
        // The receiver only goes away when the whole ctx is dropped.
        if self.sender.send(update).is_err() {
            log::debug!("LatestOnlyUpdater: ctx gone, dropping update");
        }
    }
}
