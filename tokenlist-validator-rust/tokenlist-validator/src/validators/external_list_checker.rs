use std::sync::Arc;
use tokenlist_core::{ChainId, Diagnostic};
use tracing::debug;

use crate::infrastructure::external_list::{ExternalList, ExternalListSource};
use crate::infrastructure::logger::Logger;

/// Cross-references privileged-chain tokens against an external list that was
/// fetched once for the whole run.
#[derive(Debug, Clone)]
pub struct ExternalListChecker {
    privileged_chain: ChainId,
    list: Option<Arc<ExternalList>>,
}

impl ExternalListChecker {
    /// Fetches the list. A failed fetch degrades to a disabled checker plus
    /// the single run-level warning.
    pub async fn fetch(
        source: &dyn ExternalListSource,
        privileged_chain: ChainId,
    ) -> (Self, Option<Diagnostic>) {
        match source.fetch().await {
            Ok(list) => (Self::with_list(privileged_chain, list), None),
            Err(e) => {
                Logger::external_list_unavailable(&source.source_name(), &e.to_string());
                (
                    Self::disabled(privileged_chain),
                    Some(Diagnostic::warning(format!("external token list unavailable: {}", e))),
                )
            }
        }
    }

    pub fn with_list(privileged_chain: ChainId, list: ExternalList) -> Self {
        Self {
            privileged_chain,
            list: Some(Arc::new(list)),
        }
    }

    pub fn disabled(privileged_chain: ChainId) -> Self {
        Self {
            privileged_chain,
            list: None,
        }
    }

    pub fn applies_to(&self, chain: ChainId) -> bool {
        self.list.is_some() && chain == self.privileged_chain
    }

    pub fn check(&self, key: &str, chain: ChainId, address: &str) -> Option<Diagnostic> {
        if chain != self.privileged_chain {
            return None;
        }
        let list = self.list.as_ref()?;

        if list.contains(address) {
            None
        } else {
            debug!("{} ({}) is missing from the external list", key, address);
            Some(Diagnostic::warning(format!(
                "{} on chain {} token {} not found in external token list",
                key, chain, address
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::external_list::{ExternalListError, ListedToken, MockExternalListSource};

    const LISTED: &str = "0xAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaa";
    const UNLISTED: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn listed_on_mainnet() -> ExternalList {
        ExternalList::from_tokens(
            1,
            vec![ListedToken {
                chain_id: 1,
                address: LISTED.to_string(),
            }],
        )
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let checker = ExternalListChecker::with_list(ChainId::Ethereum, listed_on_mainnet());
        assert!(checker
            .check("FOO", ChainId::Ethereum, &LISTED.to_lowercase())
            .is_none());
    }

    #[test]
    fn test_absent_token_yields_one_warning() {
        let checker = ExternalListChecker::with_list(ChainId::Ethereum, listed_on_mainnet());
        let diagnostic = checker.check("BAR", ChainId::Ethereum, UNLISTED).unwrap();
        assert!(diagnostic.is_warning());
        assert_eq!(
            diagnostic.message(),
            format!("BAR on chain ethereum token {} not found in external token list", UNLISTED)
        );
    }

    #[test]
    fn test_other_chains_are_never_checked() {
        let checker = ExternalListChecker::with_list(ChainId::Ethereum, listed_on_mainnet());
        assert!(!checker.applies_to(ChainId::Optimism));
        assert!(checker.check("BAR", ChainId::Optimism, UNLISTED).is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_one_warning() {
        let mut source = MockExternalListSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|| Err(ExternalListError::Source("connection refused".to_string())));
        source.expect_source_name().returning(|| "mock".to_string());

        let (checker, warning) = ExternalListChecker::fetch(&source, ChainId::Ethereum).await;

        let warning = warning.unwrap();
        assert!(warning.is_warning());
        assert!(warning.message().starts_with("external token list unavailable"));
        assert!(!checker.applies_to(ChainId::Ethereum));
        assert!(checker.check("BAR", ChainId::Ethereum, UNLISTED).is_none());
    }

    #[tokio::test]
    async fn test_fetch_success_enables_checks() {
        let mut source = MockExternalListSource::new();
        source.expect_fetch().times(1).returning(|| Ok(listed_on_mainnet()));

        let (checker, warning) = ExternalListChecker::fetch(&source, ChainId::Ethereum).await;

        assert!(warning.is_none());
        assert!(checker.applies_to(ChainId::Ethereum));
    }
}
