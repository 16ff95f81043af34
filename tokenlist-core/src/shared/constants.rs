//! Constants for the token list

use crate::domain::entities::chain::ChainId;

/// Entry exempt from every chain-level check (the native gas asset).
pub const NATIVE_ASSET_KEY: &str = "ETH";

/// Chain whose tokens are cross-checked against the external token list.
pub const DEFAULT_PRIVILEGED_CHAIN: ChainId = ChainId::Ethereum;

pub const DEFAULT_EXTERNAL_LIST_URL: &str = "https://tokens.coingecko.com/uniswap/all.json";

// Data directory layout
pub const ENTRY_FILE_NAME: &str = "data.json";
pub const EXPECTED_MISMATCHES_FILE_NAME: &str = "expected_mismatches.json";

// Published list metadata
pub const TOKEN_LIST_NAME: &str = "Superchain Token List";
pub const TOKEN_LIST_LOGO_URI: &str = "https://ethereum-optimism.github.io/optimism.svg";
pub const TOKEN_LIST_KEYWORDS: [&str; 3] = ["scaling", "layer2", "infrastructure"];
