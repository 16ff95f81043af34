//! Token List Core
//!
//! Domain model for a community-maintained, multi-chain token list.
//!
//! ## Architecture
//!
//! - **Domain**: entries as declared in the data directory, the closed set of
//!   supported chains, and the diagnostics a validation run produces
//! - **Shared**: constants, error type and small helpers
//!
//! Nothing in this crate performs I/O. Reading the data directory, talking to
//! chains and fetching external lists lives in `tokenlist-validator`.
//!
//! ## Usage
//!
//! ```rust
//! use tokenlist_core::{ChainId, Diagnostic, DiagnosticReport};
//!
//! let chain: ChainId = "optimism".parse().unwrap();
//! assert_eq!(chain.chain_id(), 10);
//!
//! let mut report = DiagnosticReport::new();
//! report.push(Diagnostic::warning("FOO on chain optimism token 0x.. has overridden symbol"));
//! assert!(!report.has_errors());
//! ```

pub mod domain;
pub mod shared;

// Re-export domain entities
pub use domain::entities::chain::{ChainId, Layer};
pub use domain::entities::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticReport, Outcome};
pub use domain::entities::entry::{ChainToken, ChainTokens, Entry, ExpectedMismatches, TokenOverrides};

// Re-export shared components
pub use shared::error::CoreError;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
