// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Jasmin AST diagnostics.
//!
//! Turns AST errors into a display-ready `Diagnostic` that the parser and
//! emitter front-ends print, either as colored terminal text or as a JSON
//! report. Conversion goes through the `ToDiagnostic` trait so the AST crate
//! stays free of presentation concerns.

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;

use jasmin_ast::Span;
use serde::Serialize;

/// An error or warning with the context needed to display it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

/// A labeled source span within a diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub span: Span,
    pub style: LabelStyle,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Where the error is.
    Primary,
    /// Related location.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// An error code like E0101.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn with_label(mut self, span: Span, style: LabelStyle, msg: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            style,
            message: Some(msg.into()),
        });
        self
    }

    pub fn with_primary(self, span: Span, msg: impl Into<String>) -> Self {
        self.with_label(span, LabelStyle::Primary, msg)
    }

    pub fn with_secondary(self, span: Span, msg: impl Into<String>) -> Self {
        self.with_label(span, LabelStyle::Secondary, msg)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// First primary label, falling back to the first label of any style.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|l| l.style == LabelStyle::Primary)
            .or(self.labels.first())
            .map(|l| l.span)
    }
}

/// Convert an error into a diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
