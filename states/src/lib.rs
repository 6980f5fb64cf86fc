//! State plumbing shared by the dashboard crates.
//!
//! - [`StateCtx`] owns every piece of screen state, keyed by type.
//! - [`StateUpdater`] lets background tasks mutate that state from any thread;
//!   the mutations are queued and applied by [`StateCtx::sync`] on the UI thread.
//! - [`TaskSet`] tracks in-flight background work with cooperative cancellation.

mod ctx;
mod error;
mod runtime;
mod state;
mod state_sync_status;
mod task;

pub use ctx::StateCtx;
pub use error::Error;
pub use runtime::StateRuntime;
pub use state::{State, StateUpdater};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId, TaskSet};
