//! Report output
//!
//! Terminal rendering of a run's diagnostics and the optional JSON report file
//! consumed by CI.

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tokenlist_core::{Diagnostic, DiagnosticKind, DiagnosticReport, Outcome};

use crate::domain::error::ValidatorError;

#[derive(Debug, Serialize)]
struct ReportFile<'a> {
    generated_at: String,
    outcome: Outcome,
    errors: usize,
    warnings: usize,
    diagnostics: &'a DiagnosticReport,
}

fn render_line(diagnostic: &Diagnostic, colorize: bool) -> String {
    let label = match (diagnostic.kind(), colorize) {
        (DiagnosticKind::Error, true) => "error".red().bold().to_string(),
        (DiagnosticKind::Warning, true) => "warning".yellow().bold().to_string(),
        (kind, false) => kind.to_string(),
    };
    format!("{}: {}", label, diagnostic.message())
}

pub fn summary_line(report: &DiagnosticReport) -> String {
    let outcome = match report.outcome() {
        Outcome::Passed => "passed",
        Outcome::NeedsReview => "passed, manual review required",
        Outcome::Failed => "failed",
    };
    format!(
        "{} errors, {} warnings: {}",
        report.error_count(),
        report.warning_count(),
        outcome
    )
}

/// One line per diagnostic followed by the summary line.
pub fn render(report: &DiagnosticReport, colorize: bool) -> String {
    let mut lines: Vec<String> = report.iter().map(|d| render_line(d, colorize)).collect();

    let summary = summary_line(report);
    lines.push(match (report.outcome(), colorize) {
        (Outcome::Passed, true) => summary.green().to_string(),
        (Outcome::NeedsReview, true) => summary.yellow().to_string(),
        (Outcome::Failed, true) => summary.red().to_string(),
        (_, false) => summary,
    });

    lines.join("\n")
}

pub fn write_json_report(path: &Path, report: &DiagnosticReport) -> Result<(), ValidatorError> {
    let file = ReportFile {
        generated_at: Utc::now().to_rfc3339(),
        outcome: report.outcome(),
        errors: report.error_count(),
        warnings: report.warning_count(),
        diagnostics: report,
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}
