use time::OffsetDateTime;

/// Dirty flag plus the time of the last completed sync.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Local add/import happened since the last successful push.
    pub pending_changes: bool,
    pub last_sync_time: Option<OffsetDateTime>,
}
