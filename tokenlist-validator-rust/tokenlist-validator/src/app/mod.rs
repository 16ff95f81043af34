pub mod generator;
pub mod report;
pub mod validation_service;

pub use generator::{GeneratorError, ListGenerator, TokenListGenerator};
pub use validation_service::{RunOptions, ValidationService};
