use serde_json::Value;
use tokenlist_core::{Diagnostic, Entry, ExpectedMismatches};
use tracing::debug;

use super::schema::{SchemaValidator, ENTRY_SCHEMA, EXPECTED_MISMATCHES_SCHEMA};
use crate::domain::error::ValidatorError;
use crate::infrastructure::storage::DataDir;

/// An entry that passed loading, ready for chain-level checks.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedEntry {
    pub entry: Entry,
    pub expected_mismatches: ExpectedMismatches,
}

impl LoadedEntry {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            expected_mismatches: ExpectedMismatches::default(),
        }
    }

    pub fn with_expected_mismatches(mut self, expected_mismatches: ExpectedMismatches) -> Self {
        self.expected_mismatches = expected_mismatches;
        self
    }

    pub fn key(&self) -> &str {
        &self.entry.key
    }
}

/// Turns raw entry JSON into typed entries. A failing entry yields one error
/// diagnostic per schema violation and never reaches the reconciler.
pub struct EntryLoader {
    entry_schema: SchemaValidator,
    mismatch_schema: SchemaValidator,
}

impl EntryLoader {
    pub fn new() -> Result<Self, ValidatorError> {
        Ok(Self {
            entry_schema: SchemaValidator::compile("entry schema", ENTRY_SCHEMA)?,
            mismatch_schema: SchemaValidator::compile("expected mismatches schema", EXPECTED_MISMATCHES_SCHEMA)?,
        })
    }

    pub fn load_from(&self, datadir: &DataDir, key: &str) -> Result<LoadedEntry, Vec<Diagnostic>> {
        let raw = datadir
            .read_entry(key)
            .map_err(|e| vec![Diagnostic::error(format!("{}: {}", key, e))])?;
        let raw_mismatches = datadir
            .read_expected_mismatches(key)
            .map_err(|e| vec![Diagnostic::error(format!("{}: {}", key, e))])?;
        self.load(key, &raw, raw_mismatches.as_ref())
    }

    pub fn load(
        &self,
        key: &str,
        raw: &Value,
        raw_mismatches: Option<&Value>,
    ) -> Result<LoadedEntry, Vec<Diagnostic>> {
        let mut diagnostics: Vec<Diagnostic> = self
            .entry_schema
            .violations(raw)
            .into_iter()
            .map(|violation| Diagnostic::error(format!("{}: schema violation at {}", key, violation)))
            .collect();

        if let Some(raw_mismatches) = raw_mismatches {
            diagnostics.extend(self.mismatch_schema.violations(raw_mismatches).into_iter().map(
                |violation| {
                    Diagnostic::error(format!(
                        "{}: expected mismatches schema violation at {}",
                        key, violation
                    ))
                },
            ));
        }

        if !diagnostics.is_empty() {
            debug!("Entry {} failed schema validation with {} violations", key, diagnostics.len());
            return Err(diagnostics);
        }

        let entry = serde_json::from_value::<Entry>(raw.clone())
            .map_err(|e| vec![Diagnostic::error(format!("{}: invalid entry: {}", key, e))])?
            .with_key(key);

        let expected_mismatches: ExpectedMismatches = match raw_mismatches {
            Some(raw_mismatches) => serde_json::from_value(raw_mismatches.clone()).map_err(|e| {
                vec![Diagnostic::error(format!("{}: invalid expected mismatches: {}", key, e))]
            })?,
            None => ExpectedMismatches::default(),
        };
        if let Some(decimals) = expected_mismatches.decimals {
            debug!("Ignoring expected decimals mismatch ({}) for {}", decimals, key);
        }

        Ok(LoadedEntry {
            entry,
            expected_mismatches,
        })
    }
}
