//! Validation diagnostics
//!
//! Every stage of a run reports problems as [`Diagnostic`] values instead of
//! failing. A run collects them into one ordered [`DiagnosticReport`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Blocks publication.
    Error,
    /// Needs a human to look at it, never blocks.
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => write!(f, "error"),
            DiagnosticKind::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    pub fn is_warning(&self) -> bool {
        self.kind == DiagnosticKind::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Overall result of a run as seen by whoever embeds the validator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    /// Passed, but at least one warning needs manual review.
    NeedsReview,
    Failed,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Passed | Outcome::NeedsReview => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Ordered diagnostics of one validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if self.has_errors() {
            Outcome::Failed
        } else if self.diagnostics.is_empty() {
            Outcome::Passed
        } else {
            Outcome::NeedsReview
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl From<Vec<Diagnostic>> for DiagnosticReport {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticReport {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::error("FOO on chain ethereum token 0x1 does not exist");
        assert_eq!(
            diagnostic.to_string(),
            "error: FOO on chain ethereum token 0x1 does not exist"
        );
        assert!(diagnostic.is_error());
        assert!(!diagnostic.is_warning());
    }

    #[test]
    fn test_diagnostic_serialization() {
        let json = serde_json::to_value(Diagnostic::warning("check me")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "warning", "message": "check me" }));
    }

    #[test]
    fn test_outcomes() {
        let mut report = DiagnosticReport::new();
        assert_eq!(report.outcome(), Outcome::Passed);

        report.push(Diagnostic::warning("overridden symbol"));
        assert_eq!(report.outcome(), Outcome::NeedsReview);
        assert_eq!(report.outcome().exit_code(), 0);

        report.push(Diagnostic::error("incorrect decimals"));
        assert_eq!(report.outcome(), Outcome::Failed);
        assert_eq!(report.outcome().exit_code(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_report_keeps_insertion_order() {
        let mut report = DiagnosticReport::new();
        report.push(Diagnostic::error("first"));
        report.extend(vec![Diagnostic::warning("second"), Diagnostic::error("third")]);
        let messages: Vec<&str> = report.iter().map(Diagnostic::message).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    proptest! {
        #[test]
        fn prop_failed_iff_any_error(kinds in proptest::collection::vec(any::<bool>(), 0..32)) {
            let report: DiagnosticReport = kinds
                .iter()
                .map(|is_error| if *is_error { Diagnostic::error("e") } else { Diagnostic::warning("w") })
                .collect::<Vec<_>>()
                .into();
            prop_assert_eq!(report.has_errors(), kinds.iter().any(|k| *k));
            prop_assert_eq!(report.error_count() + report.warning_count(), kinds.len());
        }
    }
}
