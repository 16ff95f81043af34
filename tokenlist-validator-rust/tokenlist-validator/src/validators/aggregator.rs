use serde_json::Value;
use std::path::Path;
use tokenlist_core::Diagnostic;
use tracing::debug;

use super::schema::{SchemaValidator, TOKEN_LIST_SCHEMA};
use crate::app::generator::ListGenerator;
use crate::domain::error::ValidatorError;

/// Validates the compiled list as a whole. At most one diagnostic comes out,
/// carrying every violation found.
pub struct Aggregator {
    schema: SchemaValidator,
}

impl Aggregator {
    pub fn new() -> Result<Self, ValidatorError> {
        Ok(Self::from_schema(SchemaValidator::compile("token list schema", TOKEN_LIST_SCHEMA)?))
    }

    pub fn from_schema(schema: SchemaValidator) -> Self {
        Self { schema }
    }

    pub fn validate(&self, generator: &dyn ListGenerator, datadir: &Path) -> Vec<Diagnostic> {
        match generator.generate(datadir) {
            Ok(list) => self.validate_list(&list).into_iter().collect(),
            Err(e) => vec![Diagnostic::error(format!("failed to generate final token list: {}", e))],
        }
    }

    pub fn validate_list(&self, list: &Value) -> Option<Diagnostic> {
        let violations = self.schema.violations(list);
        if violations.is_empty() {
            return None;
        }

        debug!("Compiled list has {} {} violations", violations.len(), self.schema.name());
        let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
        Some(Diagnostic::error(format!(
            "final token list is invalid: {}",
            details.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::generator::{GeneratorError, MockListGenerator};
    use serde_json::json;

    fn valid_list() -> Value {
        json!({
            "name": "Superchain Token List",
            "logoURI": "https://ethereum-optimism.github.io/optimism.svg",
            "keywords": ["scaling", "layer2"],
            "timestamp": "2024-05-01T12:00:00.000Z",
            "version": { "major": 1, "minor": 0, "patch": 0 },
            "tokens": [{
                "chainId": 10,
                "address": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "name": "Foo",
                "symbol": "FOO",
                "decimals": 18,
                "extensions": { "opTokenId": "FOO" }
            }]
        })
    }

    #[test]
    fn test_valid_list_passes() {
        let aggregator = Aggregator::new().unwrap();
        assert!(aggregator.validate_list(&valid_list()).is_none());
    }

    #[test]
    fn test_missing_top_level_field_yields_one_error() {
        let mut list = valid_list();
        list.as_object_mut().unwrap().remove("timestamp");

        let mut generator = MockListGenerator::new();
        generator.expect_generate().times(1).return_once(move |_| Ok(list));

        let aggregator = Aggregator::new().unwrap();
        let diagnostics = aggregator.validate(&generator, Path::new("data"));

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
        assert!(diagnostics[0].message().starts_with("final token list is invalid: "));
        assert!(diagnostics[0].message().contains("timestamp"));
    }

    #[test]
    fn test_every_violation_is_embedded() {
        let mut list = valid_list();
        list["tokens"][0]["decimals"] = json!(300);
        list["tokens"][0]["address"] = json!("0x1234");

        let aggregator = Aggregator::new().unwrap();
        let diagnostic = aggregator.validate_list(&list).unwrap();
        assert!(diagnostic.message().contains("/tokens/0/decimals"));
        assert!(diagnostic.message().contains("/tokens/0/address"));
    }

    #[test]
    fn test_generator_failure_yields_one_error() {
        let mut generator = MockListGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(GeneratorError::Other("disk on fire".to_string())));

        let aggregator = Aggregator::new().unwrap();
        let diagnostics = aggregator.validate(&generator, Path::new("data"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message(),
            "failed to generate final token list: disk on fire"
        );
    }
}
