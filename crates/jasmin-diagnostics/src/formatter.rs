// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0101]: division by zero
//!   --> Hello.j:3:5
//!    |
//!  3 |     ldc 10 / 0
//!    |     ^^^^^^^^^^ in this instruction
//!    |
//!    = note: both operands are integers, so the division is not done in floating point
//! ```

use colored::Colorize;

use jasmin_ast::LineMap;

use crate::{Diagnostic, Label, LabelStyle, Severity};

/// Apply `NO_COLOR` / `FORCE_COLOR` from the environment. Call once at startup.
pub fn init_color() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

/// Formats diagnostics against the source they refer to.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        // Labels are rendered in line order.
        let mut labels: Vec<&Label> = diagnostic.labels.iter().collect();
        labels.sort_by_key(|l| l.span.start);

        let gutter = labels
            .last()
            .map(|l| self.line_map.line_col(l.span.start).0.to_string().len())
            .unwrap_or(1)
            .max(2);

        if let Some(first) = labels.first() {
            let (line, col) = self.line_map.line_col(first.span.start);
            out.push_str(&format!(
                "  {} {}:{}:{}\n",
                "-->".blue(),
                self.file_name.unwrap_or("<source>"),
                line,
                col
            ));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter), "|".blue()));
            for label in &labels {
                self.format_label(&mut out, label, gutter);
            }
            out.push_str(&format!("{} {}\n", " ".repeat(gutter), "|".blue()));
        }

        self.format_footer(&mut out, diagnostic, gutter);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };
        match &diagnostic.code {
            Some(code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }
    }

    fn format_label(&self, out: &mut String, label: &Label, gutter: usize) {
        let (line, col) = self.line_map.line_col(label.span.start);
        let text = self.line_map.line(self.source, line).unwrap_or("");

        out.push_str(&format!(
            "{:>width$} {} {}\n",
            line.to_string().blue().bold(),
            "|".blue(),
            text,
            width = gutter,
        ));

        // Multi-line spans are underlined to the end of their first line.
        let (end_line, end_col) = self.line_map.line_col(label.span.end);
        let end_col = if end_line == line { end_col } else { text.len() + 1 };
        let width = end_col.saturating_sub(col).max(1);

        let (marks, message) = match label.style {
            LabelStyle::Primary => (
                "^".repeat(width).red().bold(),
                label.message.as_deref().unwrap_or("").red().bold(),
            ),
            LabelStyle::Secondary => (
                "-".repeat(width).blue(),
                label.message.as_deref().unwrap_or("").blue(),
            ),
        };
        out.push_str(&format!(
            "{} {} {}{} {}\n",
            " ".repeat(gutter),
            "|".blue(),
            " ".repeat(col - 1),
            marks,
            message
        ));
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter: usize) {
        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }
        if let Some(help) = &diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter),
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }
}
