pub mod chain_reader;
pub mod ethereum;
pub mod manager;

pub use chain_reader::{ChainReader, RpcError};
pub use ethereum::EthersChainReader;
pub use manager::{ChainRegistry, Network};

#[cfg(test)]
pub use chain_reader::MockChainReader;
