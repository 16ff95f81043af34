//! External canonical token list
//!
//! Fetched once per run and shared read-only by every entry.

pub mod http_source;

pub use http_source::HttpExternalListSource;

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExternalListError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("list source error: {0}")]
    Source(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExternalListSource: Send + Sync {
    async fn fetch(&self) -> Result<ExternalList, ExternalListError>;

    fn source_name(&self) -> String;
}

/// Token as published by a token list; every other field is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedToken {
    pub chain_id: u64,
    pub address: String,
}

/// Snapshot of the addresses a list carries for one chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalList {
    addresses: HashSet<String>,
}

impl ExternalList {
    /// Keeps only tokens of `chain_id`; addresses are stored lower-cased.
    pub fn from_tokens<I: IntoIterator<Item = ListedToken>>(chain_id: u64, tokens: I) -> Self {
        let addresses = tokens
            .into_iter()
            .filter(|token| token.chain_id == chain_id)
            .map(|token| token.address.to_lowercase())
            .collect();
        Self { addresses }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&address.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
