//! Token entry entity
//!
//! One entry is one token's declaration across every chain it is deployed on,
//! stored as `<datadir>/<KEY>/data.json`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::chain::ChainId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Folder name the entry was loaded from.
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default)]
    pub nonstandard: bool,
    #[serde(default)]
    pub nobridge: bool,
    pub tokens: ChainTokens,
}

impl Entry {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChainToken {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<TokenOverrides>,
}

impl ChainToken {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: TokenOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn overrides(&self) -> TokenOverrides {
        self.overrides.clone().unwrap_or_default()
    }
}

/// Per-chain replacements for declared fields. A present field is taken as-is
/// and never verified against the chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TokenOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
}

/// Pre-approved differences between the declared and on-chain symbol or name.
///
/// A `decimals` record is accepted so the file still loads, but it never
/// excuses a decimals mismatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExpectedMismatches {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl ExpectedMismatches {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.name.is_none()
    }
}

/// Chain tokens in the order they were declared in the entry file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainTokens(Vec<(ChainId, ChainToken)>);

impl ChainTokens {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces the token for `chain`, keeping first-declared position.
    pub fn insert(&mut self, chain: ChainId, token: ChainToken) {
        match self.0.iter_mut().find(|(existing, _)| *existing == chain) {
            Some(slot) => slot.1 = token,
            None => self.0.push((chain, token)),
        }
    }

    pub fn get(&self, chain: ChainId) -> Option<&ChainToken> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == chain)
            .map(|(_, token)| token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &ChainToken)> {
        self.0.iter().map(|(chain, token)| (*chain, token))
    }

    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.0.iter().map(|(chain, _)| *chain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ChainId, ChainToken)> for ChainTokens {
    fn from_iter<I: IntoIterator<Item = (ChainId, ChainToken)>>(iter: I) -> Self {
        let mut tokens = ChainTokens::new();
        for (chain, token) in iter {
            tokens.insert(chain, token);
        }
        tokens
    }
}

impl Serialize for ChainTokens {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (chain, token) in &self.0 {
            map.serialize_entry(chain, token)?;
        }
        map.end()
    }
}

struct ChainTokensVisitor;

impl<'de> Visitor<'de> for ChainTokensVisitor {
    type Value = ChainTokens;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of chain keys to token declarations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tokens = ChainTokens::new();
        while let Some((chain, token)) = access.next_entry::<ChainId, ChainToken>()? {
            if tokens.get(chain).is_some() {
                return Err(serde::de::Error::custom(format!("duplicate chain key `{chain}`")));
            }
            tokens.insert(chain, token);
        }
        Ok(tokens)
    }
}

impl<'de> Deserialize<'de> for ChainTokens {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ChainTokensVisitor)
    }
}
