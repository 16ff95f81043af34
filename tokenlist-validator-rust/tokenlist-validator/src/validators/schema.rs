use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::fmt;

use crate::domain::error::ValidatorError;

pub const ENTRY_SCHEMA: &str = include_str!("../../schemas/entry.schema.json");
pub const EXPECTED_MISMATCHES_SCHEMA: &str = include_str!("../../schemas/expected_mismatches.schema.json");
pub const TOKEN_LIST_SCHEMA: &str = include_str!("../../schemas/tokenlist.schema.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() { "/" } else { &self.instance_path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Compiled draft 2020-12 schema that reports every violation, not just the first.
pub struct SchemaValidator {
    name: String,
    validator: Validator,
}

impl SchemaValidator {
    pub fn compile(name: impl Into<String>, schema_json: &str) -> Result<Self, ValidatorError> {
        let name = name.into();
        let schema: Value = serde_json::from_str(schema_json)
            .map_err(|e| ValidatorError::schema(format!("{} is not valid JSON: {}", name, e)))?;
        Self::from_value(name, &schema)
    }

    pub fn from_value(name: impl Into<String>, schema: &Value) -> Result<Self, ValidatorError> {
        let name = name.into();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| ValidatorError::schema(format!("failed to build {}: {}", name, e)))?;
        Ok(Self { name, validator })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn violations(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.validator
            .iter_errors(instance)
            .map(|err| SchemaViolation {
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_schemas_compile() {
        assert!(SchemaValidator::compile("entry schema", ENTRY_SCHEMA).is_ok());
        assert!(SchemaValidator::compile("expected mismatches schema", EXPECTED_MISMATCHES_SCHEMA).is_ok());
        assert!(SchemaValidator::compile("token list schema", TOKEN_LIST_SCHEMA).is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let validator = SchemaValidator::compile("entry schema", ENTRY_SCHEMA).unwrap();
        let violations = validator.violations(&json!({
            "name": "Foo",
            "decimals": "eighteen",
            "tokens": {}
        }));
        // missing symbol, wrong decimals type, empty tokens
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().any(|v| v.instance_path == "/decimals"));
        assert!(violations.iter().any(|v| v.instance_path == "/tokens"));
    }

    #[test]
    fn test_violation_display_uses_root_for_empty_path() {
        let violation = SchemaViolation {
            instance_path: String::new(),
            message: "\"symbol\" is a required property".to_string(),
        };
        assert_eq!(violation.to_string(), "/: \"symbol\" is a required property");
    }

    #[test]
    fn test_invalid_schema_is_a_schema_error() {
        let err = SchemaValidator::from_value("broken", &json!({ "type": 12 })).err().unwrap();
        assert!(matches!(err, ValidatorError::Schema(_)));
    }
}
