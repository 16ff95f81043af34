use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use tokenlist_core::shared::constants::{TOKEN_LIST_KEYWORDS, TOKEN_LIST_LOGO_URI, TOKEN_LIST_NAME};
use tokenlist_core::{ChainId, ChainToken, Entry};

use crate::domain::error::ValidatorError;
use crate::infrastructure::storage::DataDir;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("data directory unreadable: {0}")]
    DataDir(#[from] ValidatorError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Compiles the data directory into the publishable list.
#[cfg_attr(test, mockall::automock)]
pub trait ListGenerator: Send + Sync {
    fn generate(&self, datadir: &Path) -> Result<Value, GeneratorError>;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Default for ListVersion {
    fn default() -> Self {
        Self {
            major: parse_version_part(env!("CARGO_PKG_VERSION_MAJOR")),
            minor: parse_version_part(env!("CARGO_PKG_VERSION_MINOR")),
            patch: parse_version_part(env!("CARGO_PKG_VERSION_PATCH")),
        }
    }
}

fn parse_version_part(part: &str) -> u64 {
    part.parse().unwrap_or(0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfo {
    chain_id: u64,
    address: String,
    name: String,
    symbol: String,
    decimals: u8,
    extensions: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenList {
    name: String,
    #[serde(rename = "logoURI")]
    logo_uri: String,
    keywords: Vec<String>,
    timestamp: String,
    version: ListVersion,
    tokens: Vec<TokenInfo>,
}

/// Default generator: one token per (entry, chain), per-chain overrides
/// replacing the declared values. Entries that do not parse are left out.
#[derive(Debug, Clone, Default)]
pub struct TokenListGenerator {
    version: ListVersion,
}

impl TokenListGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: ListVersion) -> Self {
        Self { version }
    }

    fn token_info(entry: &Entry, chain: ChainId, token: &ChainToken) -> TokenInfo {
        let overrides = token.overrides();

        let mut extensions = Map::new();
        extensions.insert("opTokenId".to_string(), Value::String(entry.key.clone()));
        if !entry.nobridge {
            if let Some(bridge) = overrides.bridge {
                extensions.insert("optimismBridgeAddress".to_string(), Value::String(bridge));
            }
        }

        TokenInfo {
            chain_id: chain.chain_id(),
            address: token.address.clone(),
            name: overrides.name.unwrap_or_else(|| entry.name.clone()),
            symbol: overrides.symbol.unwrap_or_else(|| entry.symbol.clone()),
            decimals: overrides.decimals.unwrap_or(entry.decimals),
            extensions,
        }
    }
}

impl ListGenerator for TokenListGenerator {
    fn generate(&self, datadir: &Path) -> Result<Value, GeneratorError> {
        let datadir = DataDir::new(datadir);
        let mut tokens = Vec::new();

        for key in datadir.folders()? {
            let entry = match datadir
                .read_entry(&key)
                .and_then(|raw| serde_json::from_value::<Entry>(raw).map_err(ValidatorError::from))
            {
                Ok(entry) => entry.with_key(&key),
                Err(e) => {
                    warn!("Leaving {} out of the compiled list: {}", key, e);
                    continue;
                }
            };

            tokens.extend(
                entry
                    .tokens
                    .iter()
                    .map(|(chain, token)| Self::token_info(&entry, chain, token)),
            );
        }

        debug!("Compiled {} tokens from {}", tokens.len(), datadir.root().display());

        let list = TokenList {
            name: TOKEN_LIST_NAME.to_string(),
            logo_uri: TOKEN_LIST_LOGO_URI.to_string(),
            keywords: TOKEN_LIST_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: self.version.clone(),
            tokens,
        };
        Ok(serde_json::to_value(list)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_entry(dir: &TempDir, key: &str, body: Value) {
        fs::create_dir_all(dir.path().join(key)).unwrap();
        fs::write(dir.path().join(key).join("data.json"), body.to_string()).unwrap();
    }

    #[test]
    fn test_generates_one_token_per_chain_with_overrides() {
        let dir = TempDir::new().unwrap();
        write_entry(
            &dir,
            "FOO",
            json!({
                "name": "Foo",
                "symbol": "FOO",
                "decimals": 18,
                "tokens": {
                    "ethereum": { "address": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
                    "optimism": {
                        "address": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                        "overrides": {
                            "symbol": "FOO.e",
                            "bridge": "0xcccccccccccccccccccccccccccccccccccccccc"
                        }
                    }
                }
            }),
        );

        let list = TokenListGenerator::new().generate(dir.path()).unwrap();

        assert_eq!(list["name"], "Superchain Token List");
        let tokens = list["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0]["chainId"], 1);
        assert_eq!(tokens[0]["symbol"], "FOO");
        assert_eq!(tokens[0]["extensions"]["opTokenId"], "FOO");
        assert!(tokens[0]["extensions"].get("optimismBridgeAddress").is_none());
        assert_eq!(tokens[1]["chainId"], 10);
        assert_eq!(tokens[1]["symbol"], "FOO.e");
        assert_eq!(
            tokens[1]["extensions"]["optimismBridgeAddress"],
            "0xcccccccccccccccccccccccccccccccccccccccc"
        );
    }

    #[test]
    fn test_unparseable_entries_are_left_out() {
        let dir = TempDir::new().unwrap();
        write_entry(&dir, "BAD", json!({ "name": "Bad" }));
        write_entry(
            &dir,
            "GOOD",
            json!({
                "name": "Good",
                "symbol": "GOOD",
                "decimals": 6,
                "nobridge": true,
                "tokens": {
                    "base": {
                        "address": "0xdddddddddddddddddddddddddddddddddddddddd",
                        "overrides": { "bridge": "0xcccccccccccccccccccccccccccccccccccccccc" }
                    }
                }
            }),
        );

        let list = TokenListGenerator::with_version(ListVersion {
            major: 2,
            minor: 1,
            patch: 0,
        })
        .generate(dir.path())
        .unwrap();

        let tokens = list["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0]["chainId"], 8453);
        assert!(tokens[0]["extensions"].get("optimismBridgeAddress").is_none());
        assert_eq!(list["version"], json!({ "major": 2, "minor": 1, "patch": 0 }));
    }

    #[test]
    fn test_missing_datadir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = TokenListGenerator::new().generate(&dir.path().join("absent"));
        assert!(matches!(result, Err(GeneratorError::DataDir(_))));
    }
}
