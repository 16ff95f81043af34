use async_trait::async_trait;
use ethers::types::{Address, Bytes};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl RpcError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }
}

/// Read-only view of one chain: bytecode plus the ERC-20 metadata getters.
/// Every call either returns the value or an explicit failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError>;

    async fn decimals(&self, address: Address) -> Result<u8, RpcError>;

    async fn symbol(&self, address: Address) -> Result<String, RpcError>;

    async fn name(&self, address: Address) -> Result<String, RpcError>;
}
