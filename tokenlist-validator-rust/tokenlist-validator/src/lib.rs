//! Token list validator
//!
//! Checks every entry of the token list data directory before the list is
//! compiled and published: schema conformance, on-chain reconciliation of
//! decimals/symbol/name, cross-listing on an external canonical list and
//! structural validity of the compiled list.

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod validators;

pub use app::validation_service::{RunOptions, ValidationService};
pub use domain::error::ValidatorError;
