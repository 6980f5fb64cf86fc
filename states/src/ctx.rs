use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Error, State, StateRuntime, StateSyncStatus, StateUpdater};

struct Slot {
    name: &'static str,
    value: Box<dyn State>,
    status: StateSyncStatus,
}

/// Owns the states of one screen.
///
/// Reads and writes happen on the UI thread. Background work holds a
/// [`StateUpdater`] and its mutations land on the next [`StateCtx::sync`].
#[derive(Default)]
pub struct StateCtx {
    runtime: StateRuntime,
    storage: BTreeMap<TypeId, Slot>,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field(
                "states",
                &self
                    .storage
                    .values()
                    .map(|slot| (slot.name, slot.status))
                    .collect::<Vec<_>>(),
            )
            .field("pending", &self.runtime.pending())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state`, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        let previous = self.storage.insert(
            TypeId::of::<T>(),
            Slot {
                name: type_name::<T>(),
                value: Box::new(state),
                status: StateSyncStatus::Init,
            },
        );
        if previous.is_some() {
            log::debug!("Replaced registered state {}", type_name::<T>());
        }
    }

    pub fn contains<T: State>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<T>())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        let slot = self
            .storage
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(Error::state_not_found::<T>)?;
        slot.status = StateSyncStatus::Dirty;
        slot.value
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered; that is a wiring bug in the screen.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access; marks the slot dirty.
    ///
    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn updater<T: State>(&self) -> StateUpdater<T> {
        self.runtime.updater::<T>()
    }

    pub fn status<T: State>(&self) -> Option<StateSyncStatus> {
        self.storage.get(&TypeId::of::<T>()).map(|slot| slot.status)
    }

    pub fn is_dirty<T: State>(&self) -> bool {
        self.status::<T>() == Some(StateSyncStatus::Dirty)
    }

    pub fn mark_clean<T: State>(&mut self) {
        if let Some(slot) = self.storage.get_mut(&TypeId::of::<T>()) {
            slot.status = StateSyncStatus::Clean;
        }
    }

    /// Apply every mutation queued by updaters, in send order.
    ///
    /// Returns the number of mutations applied. Mutations addressed to a type
    /// that is not registered are dropped.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        for envelope in self.runtime.drain() {
            match self.storage.get_mut(&envelope.id) {
                Some(slot) => {
                    (envelope.apply)(slot.value.as_any_mut());
                    slot.status = StateSyncStatus::Dirty;
                    applied += 1;
                }
                None => {
                    log::warn!("Dropping update for unregistered state {}", envelope.name);
                }
            }
        }
        applied
    }

    pub fn runtime(&self) -> &StateRuntime {
        &self.runtime
    }
}
