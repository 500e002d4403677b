//! HTTP client for the secondary-network candidate service.
//!
//! `GET {endpoint}/candidate/{stash}` returns a JSON object with optional
//! `invalidityReasons` and `rank` fields.

use std::time::Duration;

use async_trait::async_trait;
use nomi_core::error::LookupError;
use nomi_core::traits::CandidateLookup;
use nomi_core::types::CrossNetworkReport;
use reqwest::Client;
use tracing::debug;

pub struct HttpCandidateLookup {
    client: Client,
    endpoint: String,
}

impl HttpCandidateLookup {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, stash: &str) -> String {
        format!("{}/candidate/{}", self.endpoint, stash)
    }
}

#[async_trait]
impl CandidateLookup for HttpCandidateLookup {
    async fn lookup(&self, stash: &str) -> Result<CrossNetworkReport, LookupError> {
        let url = self.url(stash);
        debug!(%url, "cross-network lookup");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        resp.json::<CrossNetworkReport>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}
