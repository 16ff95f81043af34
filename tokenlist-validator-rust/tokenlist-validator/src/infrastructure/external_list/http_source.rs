use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{ExternalList, ExternalListError, ExternalListSource, ListedToken};

#[derive(Debug, Deserialize)]
struct TokenListDocument {
    tokens: Vec<ListedToken>,
}

/// Fetches a published token list (`{ "tokens": [{ "chainId", "address", .. }] }`).
pub struct HttpExternalListSource {
    client: Client,
    url: String,
    chain_id: u64,
    timeout: Duration,
}

impl HttpExternalListSource {
    pub fn new(url: impl Into<String>, chain_id: u64, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            chain_id,
            timeout,
        }
    }

    pub fn parse(chain_id: u64, body: &str) -> Result<ExternalList, ExternalListError> {
        let document: TokenListDocument = serde_json::from_str(body)?;
        Ok(ExternalList::from_tokens(chain_id, document.tokens))
    }
}

#[async_trait]
impl ExternalListSource for HttpExternalListSource {
    async fn fetch(&self) -> Result<ExternalList, ExternalListError> {
        debug!("Fetching external token list from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let list = Self::parse(self.chain_id, &body)?;
        info!(
            "Fetched {} tokens for chain id {} from {}",
            list.len(),
            self.chain_id,
            self.url
        );
        Ok(list)
    }

    fn source_name(&self) -> String {
        self.url.clone()
    }
}
