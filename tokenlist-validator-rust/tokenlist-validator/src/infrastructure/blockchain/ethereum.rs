use async_trait::async_trait;
use ethers::{
    abi::{parse_abi, Abi, Detokenize},
    contract::Contract,
    core::types::{Address, Bytes},
    providers::{Http, Middleware, Provider},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokenlist_core::ChainId;

use super::chain_reader::{ChainReader, RpcError};

const ERC20_METADATA_ABI: [&str; 3] = [
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function decimals() view returns (uint8)",
];

/// `ChainReader` over a JSON-RPC endpoint. Every call is bounded by `timeout`.
pub struct EthersChainReader {
    chain: ChainId,
    provider: Arc<Provider<Http>>,
    erc20: Abi,
    timeout: Duration,
}

impl EthersChainReader {
    pub fn new(chain: ChainId, rpc_url: &str, timeout: Duration) -> Result<Self, RpcError> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            RpcError::provider(format!("Failed to create HTTP provider for chain {}: {}", chain, e))
        })?;
        let erc20 = parse_abi(&ERC20_METADATA_ABI)
            .map_err(|e| RpcError::contract(format!("Failed to parse ERC-20 ABI: {}", e)))?;

        Ok(Self {
            chain,
            provider: Arc::new(provider),
            erc20,
            timeout,
        })
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    async fn bounded<T, E, F>(&self, call: F) -> Result<T, RpcError>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| RpcError::contract(e.to_string())),
            Err(_) => Err(RpcError::Timeout(self.timeout)),
        }
    }

    async fn call_view<T: Detokenize>(&self, address: Address, method: &str) -> Result<T, RpcError> {
        let contract = Contract::new(address, self.erc20.clone(), Arc::clone(&self.provider));
        let call = contract
            .method::<_, T>(method, ())
            .map_err(|e| RpcError::contract(format!("{}(): {}", method, e)))?;
        self.bounded(call.call()).await
    }
}

#[async_trait]
impl ChainReader for EthersChainReader {
    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError> {
        match tokio::time::timeout(self.timeout, self.provider.get_code(address, None)).await {
            Ok(result) => result.map_err(|e| RpcError::provider(e.to_string())),
            Err(_) => Err(RpcError::Timeout(self.timeout)),
        }
    }

    async fn decimals(&self, address: Address) -> Result<u8, RpcError> {
        self.call_view(address, "decimals").await
    }

    async fn symbol(&self, address: Address) -> Result<String, RpcError> {
        self.call_view(address, "symbol").await
    }

    async fn name(&self, address: Address) -> Result<String, RpcError> {
        self.call_view(address, "name").await
    }
}

pub fn parse_address(address: &str) -> Result<Address, RpcError> {
    address
        .parse::<Address>()
        .map_err(|e| RpcError::InvalidAddress(format!("{}: {}", address, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_reports_input() {
        let err = parse_address("0x12").unwrap_err();
        assert!(matches!(err, RpcError::InvalidAddress(ref msg) if msg.starts_with("0x12")));
    }

    #[test]
    fn test_reader_rejects_malformed_rpc_url() {
        let result = EthersChainReader::new(ChainId::Base, "not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(RpcError::Provider(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        // Nothing listens on port 9; the call fails or times out, never panics
        let reader =
            EthersChainReader::new(ChainId::Sepolia, "http://127.0.0.1:9", Duration::from_millis(500))
                .unwrap();
        assert_eq!(reader.chain(), ChainId::Sepolia);
        let address = parse_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6").unwrap();
        assert!(reader.get_code(address).await.is_err());
        assert!(reader.decimals(address).await.is_err());
    }
}
