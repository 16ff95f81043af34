//! Domain entities and value objects
//!
//! Entries and chain tokens are read-only and rebuilt from the data directory
//! on every run. Diagnostics are created during validation and only read
//! afterwards.

pub mod chain;
pub mod diagnostic;
pub mod entry;

pub use chain::*;
pub use diagnostic::*;
pub use entry::*;
