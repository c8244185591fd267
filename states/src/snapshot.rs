use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

/// Cloned states captured at dispatch time.
#[derive(Default)]
pub struct StateSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn get<T: State + Clone>(&self) -> Option<T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }
}

/// Cloned computes captured at dispatch time.
#[derive(Default)]
pub struct ComputeSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl ComputeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn get<T: Compute + Clone>(&self) -> Option<T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }
}

/// Everything a command is allowed to read.
///
/// Built by [`crate::StateCtx::dispatch`] from the states/computes that opted
/// into snapshotting. Commands own the snapshot, so their futures stay `Send`
/// and never race the UI thread.
#[derive(Default)]
pub struct CommandSnapshot {
    states: StateSnapshot,
    computes: ComputeSnapshot,
}

impl CommandSnapshot {
    pub fn new(states: StateSnapshot, computes: ComputeSnapshot) -> Self {
        Self { states, computes }
    }

    /// Read a state, panicking when it was never registered or does not
    /// implement `snapshot`. Both are wiring bugs caught by the first
    /// dispatch in any test.
    pub fn state<T: State + Clone>(&self) -> T {
        self.states
            .get::<T>()
            .unwrap_or_else(|| panic!("state snapshot for {} is missing", type_name::<T>()))
    }

    pub fn try_state<T: State + Clone>(&self) -> Option<T> {
        self.states.get::<T>()
    }

    /// Read a compute cache. Same panic contract as [`CommandSnapshot::state`].
    pub fn compute<T: Compute + Clone>(&self) -> T {
        self.computes
            .get::<T>()
            .unwrap_or_else(|| panic!("compute snapshot for {} is missing", type_name::<T>()))
    }

    pub fn try_compute<T: Compute + Clone>(&self) -> Option<T> {
        self.computes.get::<T>()
    }
}
