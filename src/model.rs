mod config;
mod entry;
mod filter;
mod sync_state;

pub use self::config::{DEFAULT_SYNC_INTERVAL_SECS, QuotebookConfig, RemoteConfig};
pub use self::entry::{Conflict, Entry, RejectReason, default_entries};
pub use self::filter::{ALL_CATEGORIES, CategoryFilter};
pub use self::sync_state::SyncState;
