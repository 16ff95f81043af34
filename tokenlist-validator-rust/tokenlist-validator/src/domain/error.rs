//! Run-fatal errors
//!
//! Problems with individual entries or tokens are reported as diagnostics and
//! never show up here. A `ValidatorError` means the run itself cannot
//! continue: the registry and the entry schema disagree about the supported
//! chains, the configuration is unusable, or the data directory is unreadable.

use thiserror::Error;
use tokenlist_core::ChainId;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Chain {0} is not configured in the chain registry")]
    UnknownChain(ChainId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data directory error: {0}")]
    DataDir(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidatorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_dir(message: impl Into<String>) -> Self {
        Self::DataDir(message.into())
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Exit code for the CLI; per-entry failures exit with 1, these with 2.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_chain_display() {
        let error = ValidatorError::UnknownChain(ChainId::Mode);
        assert_eq!(error.to_string(), "Chain mode is not configured in the chain registry");
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: ValidatorError = io_error.into();
        assert!(matches!(error, ValidatorError::Io(_)));
        assert_eq!(error.exit_code(), 2);
    }
}
