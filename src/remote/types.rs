//! Wire payloads exchanged with the collection server.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PushResponse {
    pub stored: usize,
}
