/// Lifecycle of a recorded compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Recorded, never run.
    #[default]
    BeforeInit,
    /// Ran; its result has not been synced yet (or it kept the old value).
    Pending,
    /// Holds the value published by its last run.
    Clean,
}
