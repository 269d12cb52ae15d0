//! Remote gateway: fetch the shared collection, push the local list.

use async_trait::async_trait;

use crate::error::QuoteResult;
use crate::model::Entry;

mod http_client;
pub use self::http_client::HttpRemote;

mod types;
pub use self::types::*;

#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Current remote snapshot.
    async fn fetch(&self) -> QuoteResult<Vec<Entry>>;

    /// Sends the full local list.
    async fn push(&self, entries: &[Entry]) -> QuoteResult<()>;
}
