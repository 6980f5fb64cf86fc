use std::any::{Any, TypeId, type_name};
use std::marker::PhantomData;

use flume::Sender;

use crate::runtime::Envelope;

/// A piece of state stored in [`crate::StateCtx`].
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Queues mutations of a `T` stored in a [`crate::StateCtx`].
///
/// Updaters are `Send` and cheap to clone, so async tasks can hold one and
/// report results without touching the context directly. Nothing is applied
/// until the owning context calls [`crate::StateCtx::sync`].
pub struct StateUpdater<T: State> {
    send: Sender<Envelope>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: State> Clone for StateUpdater<T> {
    fn clone(&self) -> Self {
        Self {
            send: self.send.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: State> std::fmt::Debug for StateUpdater<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateUpdater")
            .field("state", &type_name::<T>())
            .finish()
    }
}

impl<T: State> StateUpdater<T> {
    pub(crate) fn new(send: Sender<Envelope>) -> Self {
        Self {
            send,
            _marker: PhantomData,
        }
    }

    /// Queue an in-place mutation.
    pub fn update(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let envelope = Envelope {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply: Box::new(move |any: &mut dyn Any| {
                if let Some(state) = any.downcast_mut::<T>() {
                    f(state);
                }
            }),
        };

        if self.send.send(envelope).is_err() {
            // The context is gone (screen closed); late results are dropped.
            log::debug!("Discarding update for {}: runtime dropped", type_name::<T>());
        }
    }

    /// Queue a full replacement.
    pub fn set(&self, state: T)
    where
        T: Send,
    {
        self.update(move |current| *current = state);
    }
}
