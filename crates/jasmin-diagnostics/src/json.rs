// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for editors and other tools.

use jasmin_ast::LineMap;
use serde::Serialize;

use crate::codes::ErrorCodeRegistry;
use crate::{Diagnostic, LabelStyle, Severity};

/// All diagnostics produced for one source file.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version.
    pub version: u32,
    pub file: String,
    /// True when there are no errors.
    pub success: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary location, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
    pub source_line: String,
}

#[derive(Debug, Serialize)]
pub struct JsonLabel {
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub start: usize,
    pub end: usize,
}

pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = LineMap::new(source);

    let count = |sev: Severity| diagnostics.iter().filter(|d| d.severity == sev).count();
    let error_count = count(Severity::Error);
    let warning_count = count(Severity::Warning);

    let diagnostics = diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, source, &line_map, &registry))
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        diagnostics,
        error_count,
        warning_count,
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    source: &str,
    line_map: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_deref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let (line, column) = line_map.line_col(span.start);
        SourceLocation {
            line,
            column,
            byte_offset: span.start,
            source_line: line_map.line(source, line).unwrap_or("").to_string(),
        }
    });

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: l.style,
            message: l.message.clone(),
            start: l.span.start,
            end: l.span.end,
        })
        .collect();

    JsonDiagnostic {
        severity: diag.severity,
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Serialize a report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
