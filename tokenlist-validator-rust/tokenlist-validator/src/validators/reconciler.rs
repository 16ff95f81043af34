use futures::future::join_all;
use std::fmt::Display;
use std::sync::Arc;
use tokenlist_core::shared::constants::NATIVE_ASSET_KEY;
use tokenlist_core::{ChainId, ChainToken, Diagnostic, Entry, ExpectedMismatches};
use tracing::debug;

use super::entry_loader::LoadedEntry;
use super::external_list_checker::ExternalListChecker;
use crate::domain::error::ValidatorError;
use crate::infrastructure::blockchain::ethereum::parse_address;
use crate::infrastructure::blockchain::{ChainRegistry, RpcError};
use crate::infrastructure::logger::Logger;

/// Verifies every declared token of an entry against the chain it lives on.
///
/// For each of `decimals`, `symbol` and `name`:
/// - an override skips the chain call and yields one warning;
/// - an on-chain value equal to the declared one yields nothing;
/// - a differing `symbol`/`name` is excused when the entry's expected
///   mismatch for that field equals the declared value;
/// - anything else, including a failed call, is an error.
pub struct Reconciler {
    registry: Arc<ChainRegistry>,
    external_list: Arc<ExternalListChecker>,
}

impl Reconciler {
    pub fn new(registry: Arc<ChainRegistry>, external_list: Arc<ExternalListChecker>) -> Self {
        Self {
            registry,
            external_list,
        }
    }

    pub fn is_exempt(entry: &Entry) -> bool {
        entry.key == NATIVE_ASSET_KEY || entry.nonstandard
    }

    /// Diagnostics for one entry, grouped by token in declaration order.
    /// Only an unknown chain fails the call.
    pub async fn reconcile(&self, loaded: &LoadedEntry) -> Result<Vec<Diagnostic>, ValidatorError> {
        let entry = &loaded.entry;
        if Self::is_exempt(entry) {
            debug!("Skipping chain checks for {}", entry.key);
            return Ok(Vec::new());
        }

        let checks = entry
            .tokens
            .iter()
            .map(|(chain, token)| self.reconcile_token(entry, &loaded.expected_mismatches, chain, token));

        let mut diagnostics = Vec::new();
        for result in join_all(checks).await {
            diagnostics.extend(result?);
        }
        Ok(diagnostics)
    }

    async fn reconcile_token(
        &self,
        entry: &Entry,
        expected: &ExpectedMismatches,
        chain: ChainId,
        token: &ChainToken,
    ) -> Result<Vec<Diagnostic>, ValidatorError> {
        let network = self.registry.get(chain)?;
        let reader = network.client();
        let subject = TokenSubject {
            key: &entry.key,
            chain,
            address: &token.address,
        };
        let mut diagnostics = Vec::new();

        let address = match parse_address(&token.address) {
            Ok(address) => address,
            Err(e) => {
                diagnostics.push(subject.error(format!("has an invalid address: {}", e)));
                return Ok(diagnostics);
            }
        };

        match reader.get_code(address).await {
            Ok(code) if code.is_empty() => {
                diagnostics.push(subject.error("does not exist"));
                return Ok(diagnostics);
            }
            Ok(_) => {}
            Err(e) => {
                subject.log_failure("eth_getCode", &e);
                diagnostics.push(subject.error(format!("failed to get bytecode: {}", e)));
                return Ok(diagnostics);
            }
        }

        let overrides = token.overrides();

        if overrides.decimals.is_some() {
            diagnostics.push(subject.overridden("decimals"));
        } else {
            let onchain = reader.decimals(address).await;
            diagnostics.extend(subject.compare("decimals", &entry.decimals, onchain, None));
        }

        if overrides.symbol.is_some() {
            diagnostics.push(subject.overridden("symbol"));
        } else {
            let onchain = reader.symbol(address).await;
            diagnostics.extend(subject.compare(
                "symbol",
                &entry.symbol,
                onchain,
                expected.symbol.as_ref(),
            ));
        }

        if overrides.name.is_some() {
            diagnostics.push(subject.overridden("name"));
        } else {
            let onchain = reader.name(address).await;
            diagnostics.extend(subject.compare("name", &entry.name, onchain, expected.name.as_ref()));
        }

        if self.external_list.applies_to(chain) {
            diagnostics.extend(self.external_list.check(&entry.key, chain, &token.address));
        }

        Ok(diagnostics)
    }
}

struct TokenSubject<'a> {
    key: &'a str,
    chain: ChainId,
    address: &'a str,
}

impl TokenSubject<'_> {
    fn error(&self, problem: impl Display) -> Diagnostic {
        Diagnostic::error(format!(
            "{} on chain {} token {} {}",
            self.key, self.chain, self.address, problem
        ))
    }

    fn overridden(&self, field: &str) -> Diagnostic {
        Diagnostic::warning(format!(
            "{} on chain {} token {} has overridden {}",
            self.key, self.chain, self.address, field
        ))
    }

    fn log_failure(&self, call: &str, error: &RpcError) {
        Logger::rpc_call_failed(self.chain, self.address, call, &error.to_string());
    }

    /// `excused_when` is the expected-mismatch value; a mismatch is accepted
    /// only if it equals the declared value.
    fn compare<T>(
        &self,
        field: &str,
        declared: &T,
        onchain: Result<T, RpcError>,
        excused_when: Option<&T>,
    ) -> Option<Diagnostic>
    where
        T: PartialEq + Display,
    {
        match onchain {
            Err(e) => {
                self.log_failure(field, &e);
                Some(self.error(format!("failed to get {}: {}", field, e)))
            }
            Ok(value) if &value == declared => None,
            Ok(_) if excused_when == Some(declared) => None,
            Ok(value) => Some(self.error(format!(
                "has incorrect {} (declared {}, on-chain {})",
                field, declared, value
            ))),
        }
    }
}
