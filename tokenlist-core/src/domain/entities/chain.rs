//! Supported chains
//!
//! The set of chains a token may be declared on is closed. Unknown chain keys
//! are rejected when entries are loaded; a chain the registry cannot resolve
//! later on is a configuration defect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    Ethereum,
    Optimism,
    Base,
    Mode,
    Lisk,
    Sepolia,
    OptimismSepolia,
    BaseSepolia,
    LiskSepolia,
}

/// Settlement layer of a chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Layer {
    L1,
    L2,
}

impl Layer {
    pub fn number(&self) -> u8 {
        match self {
            Layer::L1 => 1,
            Layer::L2 => 2,
        }
    }
}

impl ChainId {
    pub const ALL: [ChainId; 9] = [
        ChainId::Ethereum,
        ChainId::Optimism,
        ChainId::Base,
        ChainId::Mode,
        ChainId::Lisk,
        ChainId::Sepolia,
        ChainId::OptimismSepolia,
        ChainId::BaseSepolia,
        ChainId::LiskSepolia,
    ];

    /// Key used in entry files and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Optimism => "optimism",
            ChainId::Base => "base",
            ChainId::Mode => "mode",
            ChainId::Lisk => "lisk",
            ChainId::Sepolia => "sepolia",
            ChainId::OptimismSepolia => "optimism-sepolia",
            ChainId::BaseSepolia => "base-sepolia",
            ChainId::LiskSepolia => "lisk-sepolia",
        }
    }

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            ChainId::Ethereum => 1,
            ChainId::Optimism => 10,
            ChainId::Base => 8453,
            ChainId::Mode => 34443,
            ChainId::Lisk => 1135,
            ChainId::Sepolia => 11155111,
            ChainId::OptimismSepolia => 11155420,
            ChainId::BaseSepolia => 84532,
            ChainId::LiskSepolia => 4202,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "Ethereum",
            ChainId::Optimism => "OP Mainnet",
            ChainId::Base => "Base",
            ChainId::Mode => "Mode",
            ChainId::Lisk => "Lisk",
            ChainId::Sepolia => "Sepolia",
            ChainId::OptimismSepolia => "OP Sepolia",
            ChainId::BaseSepolia => "Base Sepolia",
            ChainId::LiskSepolia => "Lisk Sepolia",
        }
    }

    pub fn layer(&self) -> Layer {
        match self {
            ChainId::Ethereum | ChainId::Sepolia => Layer::L1,
            _ => Layer::L2,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "https://ethereum-rpc.publicnode.com",
            ChainId::Optimism => "https://mainnet.optimism.io",
            ChainId::Base => "https://mainnet.base.org",
            ChainId::Mode => "https://mainnet.mode.network",
            ChainId::Lisk => "https://rpc.api.lisk.com",
            ChainId::Sepolia => "https://ethereum-sepolia-rpc.publicnode.com",
            ChainId::OptimismSepolia => "https://sepolia.optimism.io",
            ChainId::BaseSepolia => "https://sepolia.base.org",
            ChainId::LiskSepolia => "https://rpc.sepolia-api.lisk.com",
        }
    }

    /// Environment variable that overrides the RPC endpoint, e.g. `BASE_SEPOLIA_RPC_URL`.
    pub fn rpc_env_key(&self) -> String {
        format!("{}_RPC_URL", self.as_str().replace('-', "_").to_uppercase())
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .iter()
            .copied()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| CoreError::unknown_chain(s))
    }
}
