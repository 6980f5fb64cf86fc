use std::any::{Any, TypeId};

use flume::{Receiver, Sender};

use crate::{State, StateUpdater};

pub(crate) type Mutation = Box<dyn FnOnce(&mut dyn Any) + Send>;

/// A queued mutation addressed to one state type.
pub(crate) struct Envelope {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) apply: Mutation,
}

/// Channel between background updaters and the owning [`crate::StateCtx`].
#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<Envelope>,
    recv: Receiver<Envelope>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub fn updater<T: State>(&self) -> StateUpdater<T> {
        StateUpdater::new(self.send.clone())
    }

    /// Number of mutations waiting for the next sync.
    pub fn pending(&self) -> usize {
        self.recv.len()
    }

    pub(crate) fn drain(&self) -> impl Iterator<Item = Envelope> + '_ {
        self.recv.try_iter()
    }
}
