use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokenlist_core::{ChainId, Layer};
use tracing::debug;

use super::chain_reader::ChainReader;
use super::ethereum::EthersChainReader;
use crate::domain::error::ValidatorError;
use crate::infrastructure::config::ValidatorConfig;

/// One supported chain with the client used to read it.
#[derive(Clone)]
pub struct Network {
    pub chain: ChainId,
    pub name: &'static str,
    pub layer: Layer,
    client: Arc<dyn ChainReader>,
}

impl Network {
    pub fn new(chain: ChainId, client: Arc<dyn ChainReader>) -> Self {
        Self {
            chain,
            name: chain.name(),
            layer: chain.layer(),
            client,
        }
    }

    pub fn client(&self) -> &dyn ChainReader {
        self.client.as_ref()
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("chain", &self.chain)
            .field("name", &self.name)
            .field("layer", &self.layer)
            .finish()
    }
}

/// Immutable chain id -> network mapping, built once per process.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    networks: HashMap<ChainId, Network>,
}

impl ChainRegistry {
    pub fn new(config: &ValidatorConfig) -> Result<Self, ValidatorError> {
        let mut networks = HashMap::new();

        for (chain, rpc_url) in &config.rpc_urls {
            let reader = EthersChainReader::new(*chain, rpc_url, config.rpc_timeout())
                .map_err(|e| ValidatorError::config(e.to_string()))?;
            debug!("Registered chain {} ({}) at {}", chain, chain.name(), rpc_url);
            networks.insert(*chain, Network::new(*chain, Arc::new(reader)));
        }

        Ok(Self { networks })
    }

    pub fn from_networks<I: IntoIterator<Item = Network>>(networks: I) -> Self {
        Self {
            networks: networks.into_iter().map(|network| (network.chain, network)).collect(),
        }
    }

    /// Fails with `UnknownChain` for a chain the registry was not built with.
    pub fn get(&self, chain: ChainId) -> Result<&Network, ValidatorError> {
        self.networks.get(&chain).ok_or(ValidatorError::UnknownChain(chain))
    }

    pub fn contains(&self, chain: ChainId) -> bool {
        self.networks.contains_key(&chain)
    }

    pub fn chains(&self) -> Vec<ChainId> {
        let mut chains: Vec<ChainId> = self.networks.keys().copied().collect();
        chains.sort();
        chains
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::blockchain::MockChainReader;

    #[test]
    fn test_registry_from_default_config() {
        let registry = ChainRegistry::new(&ValidatorConfig::default()).unwrap();
        assert_eq!(registry.len(), ChainId::ALL.len());
        let network = registry.get(ChainId::Optimism).unwrap();
        assert_eq!(network.name, "OP Mainnet");
        assert_eq!(network.layer, Layer::L2);
    }

    #[test]
    fn test_unmapped_chain_is_a_configuration_error() {
        let registry =
            ChainRegistry::from_networks(vec![Network::new(ChainId::Ethereum, Arc::new(MockChainReader::new()))]);
        assert!(registry.contains(ChainId::Ethereum));
        let err = registry.get(ChainId::Base).unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownChain(ChainId::Base)));
    }

    #[test]
    fn test_bad_rpc_url_fails_registry_construction() {
        let mut config = ValidatorConfig::default();
        config.rpc_urls.insert(ChainId::Mode, "::not-a-url".to_string());
        assert!(matches!(ChainRegistry::new(&config), Err(ValidatorError::Config(_))));
    }

    #[test]
    fn test_chains_are_sorted() {
        let registry = ChainRegistry::from_networks(vec![
            Network::new(ChainId::Base, Arc::new(MockChainReader::new())),
            Network::new(ChainId::Ethereum, Arc::new(MockChainReader::new())),
        ]);
        assert_eq!(registry.chains(), vec![ChainId::Ethereum, ChainId::Base]);
    }
}
