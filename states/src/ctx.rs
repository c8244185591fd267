use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::command::ComputeUpdate;
use crate::snapshot::{ComputeSnapshot, StateSnapshot};
use crate::{Command, CommandSnapshot, Compute, Error, LatestOnlyUpdater, State, TaskHandle, TaskId, runtime};

type DispatchFn = fn(&mut StateCtx);

/// Owner of all states, compute caches and command registrations.
///
/// Lives on the UI thread. The only cross-thread traffic is the flume channel
/// that command futures publish compute updates into; [`StateCtx::sync_computes`]
/// drains it at the start of each frame.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    /// Latest dispatch per command type; the generation in the `TaskId` is
    /// the latest-only filter key for incoming updates.
    in_flight: BTreeMap<TypeId, TaskHandle>,

    /// Commands queued during the frame, dispatched by `flush_commands` at
    /// frame end. Deduplicated by command type.
    queue: Vec<(TypeId, DispatchFn)>,

    sender: Sender<ComputeUpdate>,
    receiver: Receiver<ComputeUpdate>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            in_flight: BTreeMap::new(),
            queue: Vec::new(),
            sender,
            receiver,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(TypeId::of::<T>(), Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// Read a state. Panics when the state was never added; that is a wiring
    /// bug surfaced by the first frame of any test.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn state_mut<T: State>(&mut self) -> &mut T {
        match self
            .states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => state,
            None => panic!(
                "{}",
                Error::state_not_found(TypeId::of::<T>(), type_name::<T>())
            ),
        }
    }

    /// Mutate a state in place.
    pub fn update<T: State>(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// Mutable access to a compute cache.
    ///
    /// Intended for acknowledging one-shot results (resetting an action
    /// compute to idle after the UI consumed it), not for general writes —
    /// those belong to commands.
    pub fn cached_mut<T: Compute>(&mut self) -> Option<&mut T> {
        self.computes
            .get_mut(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any_mut().downcast_mut::<T>())
    }

    /// Dispatch a command now.
    ///
    /// Snapshots the readable states/computes, supersedes any in-flight run
    /// of the same command (cancel + generation bump), and spawns the future
    /// on the background runtime.
    pub fn dispatch<C: Command>(&mut self) {
        let command = TypeId::of::<C>();
        if !self.commands.contains_key(&command) {
            log::error!("dispatch: command {} was never recorded", type_name::<C>());
            return;
        }

        let snap = self.snapshot();
        let generation = self
            .in_flight
            .get(&command)
            .map(|handle| handle.id().generation() + 1)
            .unwrap_or(1);
        if let Some(previous) = self.in_flight.get(&command) {
            previous.cancel();
        }

        let token = CancellationToken::new();
        let updater = LatestOnlyUpdater::new(command, generation, self.sender.clone());
        let fut = match self.commands.get(&command) {
            Some(cmd) => cmd.run(snap, updater, token.clone()),
            None => return,
        };
        self.in_flight
            .insert(command, TaskHandle::new(TaskId::new(command, generation), token));
        runtime::spawn(fut);
    }

    /// Queue a command for `flush_commands` at frame end.
    ///
    /// Widgets enqueue instead of dispatching so a frame produces at most one
    /// dispatch per command type no matter how many code paths asked for it.
    pub fn enqueue_command<C: Command>(&mut self) {
        let command = TypeId::of::<C>();
        if self.queue.iter().any(|(queued, _)| *queued == command) {
            return;
        }
        self.queue.push((command, dispatch_erased::<C>));
    }

    /// Number of commands waiting for the next flush.
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch everything enqueued during this frame.
    pub fn flush_commands(&mut self) {
        let queue = std::mem::take(&mut self.queue);
        for (_, dispatch) in queue {
            dispatch(self);
        }
    }

    /// Apply compute updates published by command futures.
    ///
    /// Updates from a superseded dispatch (older generation than the latest
    /// for that command) are dropped: the screen reflects the most recently
    /// requested operation, not the most recently resolved one.
    pub fn sync_computes(&mut self) {
        while let Ok(update) = self.receiver.try_recv() {
            let latest = self
                .in_flight
                .get(&update.command)
                .map(|handle| handle.id().generation())
                .unwrap_or(0);
            if update.generation != latest {
                log::debug!(
                    "sync_computes: dropping stale update (generation {} < {latest})",
                    update.generation
                );
                continue;
            }
            match self.computes.get_mut(&update.compute) {
                Some(compute) => compute.assign_box(update.value),
                None => log::error!("sync_computes: update for unrecorded compute {:?}", update.compute),
            }
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut states = StateSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.snapshot() {
                states.insert_cloned(*id, cloned);
            }
        }
        let mut computes = ComputeSnapshot::new();
        for (id, compute) in &self.computes {
            if let Some(cloned) = compute.snapshot() {
                computes.insert_cloned(*id, cloned);
            }
        }
        CommandSnapshot::new(states, computes)
    }
}

fn dispatch_erased<C: Command>(ctx: &mut StateCtx) {
    ctx.dispatch::<C>();
}
