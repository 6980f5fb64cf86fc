/// Lifecycle of a state slot inside [`crate::StateCtx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never touched since.
    #[default]
    Init,
    /// Mutated since the last [`crate::StateCtx::mark_clean`].
    Dirty,
    Clean,
}
