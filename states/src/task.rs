//! In-flight task bookkeeping with cooperative cancellation.
//!
//! Background requests started by a screen are registered in a [`TaskSet`]
//! under a label such as `delete:42`. While a label is running, starting it
//! again is refused, which is how double clicks on a row action are absorbed.
//! Closing a screen cancels every outstanding token so late responses can be
//! dropped by the task itself.
//!
//! ```ignore
//! let Some(handle) = tasks.begin("delete:42") else { return };
//! let token = handle.cancellation_token();
//! tokio::spawn(async move {
//!     tokio::select! {
//!         _ = token.cancelled() => {}
//!         result = api.delete(42) => { /* report */ }
//!     }
//! });
//! ```

use std::any::Any;
use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::State;

/// Identifies one run of a labelled task.
///
/// The generation distinguishes a finished run from a newer run under the
/// same label, so a stale completion cannot clear a fresh registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    label: Ustr,
    generation: u64,
}

impl TaskId {
    pub fn new(label: Ustr, generation: u64) -> Self {
        Self { label, generation }
    }

    pub fn label(&self) -> Ustr {
        self.label
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A registered task and its cancellation token.
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

    /// Clone of the token for the spawned future to observe.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Request cancellation. The task stops at its next check point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Running tasks keyed by label.
#[derive(Debug, Default)]
pub struct TaskSet {
    generation: u64,
    running: BTreeMap<Ustr, TaskHandle>,
}

impl State for TaskSet {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run under `label`.
    ///
    /// Returns `None` while another run with the same label is still active.
    pub fn begin(&mut self, label: impl AsRef<str>) -> Option<TaskHandle> {
        let label = Ustr::from(label.as_ref());
        if self.is_running(label.as_str()) {
            log::debug!("Task {label} already in flight");
            return None;
        }

        self.generation += 1;
        let handle = TaskHandle::new(
            TaskId::new(label, self.generation),
            CancellationToken::new(),
        );
        self.running.insert(label, handle.clone());
        Some(handle)
    }

    /// Drop the registration for `id` if it is still the current run.
    pub fn finish(&mut self, id: TaskId) {
        if self
            .running
            .get(&id.label())
            .is_some_and(|handle| handle.id() == id)
        {
            self.running.remove(&id.label());
        }
    }

    pub fn is_running(&self, label: &str) -> bool {
        self.running
            .get(&Ustr::from(label))
            .is_some_and(|handle| !handle.is_cancelled())
    }

    /// Cancel the run under `label`, if any. Returns whether one was running.
    pub fn cancel(&mut self, label: &str) -> bool {
        match self.running.remove(&Ustr::from(label)) {
            Some(handle) => {
                handle.cancel();
                log::debug!("Cancelled task {label}");
                true
            }
            None => false,
        }
    }

    /// Cancel every running task and forget them.
    pub fn cancel_all(&mut self) {
        for handle in self.running.values() {
            handle.cancel();
        }
        if !self.running.is_empty() {
            log::info!("Cancelled {} in-flight task(s)", self.running.len());
        }
        self.running.clear();
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}
