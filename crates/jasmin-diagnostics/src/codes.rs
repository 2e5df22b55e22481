// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps codes (E0001, E0101, ...) to titles and categories for display and
//! for the JSON report.

use std::collections::HashMap;

pub const UNKNOWN_OPERATOR: &str = "E0001";
pub const UNHANDLED_OPERATION: &str = "E0002";
pub const DIVISION_BY_ZERO: &str = "E0101";
pub const ARITHMETIC_OVERFLOW: &str = "E0102";
pub const NESTING_TOO_DEEP: &str = "E0201";

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed operator text or tags.
    Operator,
    /// Constant folding failures.
    Evaluation,
    /// Tree shape problems.
    Structure,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Operator => write!(f, "Operator"),
            ErrorCategory::Evaluation => write!(f, "Evaluation"),
            ErrorCategory::Structure => write!(f, "Structure"),
        }
    }
}

macro_rules! register_codes {
    ($($code:expr => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                UNKNOWN_OPERATOR => ("unknown arithmetic operator", Operator),
                UNHANDLED_OPERATION => ("unhandled operation tag", Operator),
                DIVISION_BY_ZERO => ("division by zero", Evaluation),
                ARITHMETIC_OVERFLOW => ("integer overflow", Evaluation),
                NESTING_TOO_DEEP => ("nesting too deep", Structure),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}
