use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{PushResponse, RemoteGateway};
use crate::error::{QuoteError, QuoteResult};
use crate::model::{Entry, RemoteConfig};

const COLLECTION_PATH: &str = "/quotes";

/// JSON collection endpoint: `GET /quotes` returns the list, `POST /quotes` replaces it.
pub struct HttpRemote {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(remote: &RemoteConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("quotebook")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: remote.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn ensure_ok(&self, resp: reqwest::Response, label: &str) -> QuoteResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        Err(QuoteError::transport_status(
            status.as_u16(),
            format!("{} returned {}", label, status),
        ))
    }
}

fn transport(label: &str, err: reqwest::Error) -> QuoteError {
    match err.status() {
        Some(status) => QuoteError::transport_status(status.as_u16(), format!("{}: {}", label, err)),
        None => QuoteError::transport(format!("{}: {}", label, err)),
    }
}

#[async_trait]
impl RemoteGateway for HttpRemote {
    async fn fetch(&self) -> QuoteResult<Vec<Entry>> {
        let resp = self
            .client
            .get(self.url(COLLECTION_PATH))
            .send()
            .await
            .map_err(|e| transport("fetch quotes", e))?;
        let raw: Vec<serde_json::Value> = self
            .ensure_ok(resp, "fetch quotes")?
            .json()
            .await
            .map_err(|e| transport("parse fetched quotes", e))?;

        let mut entries = Vec::with_capacity(raw.len());
        for (idx, item) in raw.iter().enumerate() {
            match Entry::from_json(item) {
                Ok(entry) => entries.push(entry),
                Err(reason) => debug!(element = idx, %reason, "dropped malformed remote quote"),
            }
        }
        Ok(entries)
    }

    async fn push(&self, entries: &[Entry]) -> QuoteResult<()> {
        let resp = self
            .client
            .post(self.url(COLLECTION_PATH))
            .json(entries)
            .send()
            .await
            .map_err(|e| transport("push quotes", e))?;
        let ack: PushResponse = self
            .ensure_ok(resp, "push quotes")?
            .json()
            .await
            .map_err(|e| transport("parse push response", e))?;
        debug!(stored = ack.stored, "remote accepted push");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
