//! Error handling for the token list core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
}

impl CoreError {
    pub fn unknown_chain(chain: impl Into<String>) -> Self {
        Self::UnknownChain(chain.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::unknown_chain("polygon");
        let display = format!("{}", error);
        assert!(display.contains("Unknown chain"));
        assert!(display.contains("polygon"));
    }
}
