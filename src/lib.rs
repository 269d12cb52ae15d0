//! Quote collection with category filtering, JSON import/export and remote-wins sync.

pub mod error;
pub mod kv;
pub mod logging;
pub mod merge;
pub mod model;
pub mod remote;
pub mod schedule;
pub mod store;
pub mod sync;
pub mod workspace;

pub use self::error::{QuoteError, QuoteResult};
