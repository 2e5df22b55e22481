// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Arithmetic operation registry.
//!
//! Maps operator symbols to operation tags and back, plus the one-byte tag
//! encoding used when a tree crosses a serialization boundary.

use std::fmt;
use std::str::FromStr;

use crate::error::{AstError, AstErrorKind, AstResult};

/// Version of the symbol/tag table below. Bump when a tag changes meaning.
pub const OP_TABLE_VERSION: u32 = 1;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArithmeticOperation {
    Add,
    Sub,
    Div,
    Mul,
}

impl ArithmeticOperation {
    pub const ALL: [ArithmeticOperation; 4] = [
        ArithmeticOperation::Add,
        ArithmeticOperation::Sub,
        ArithmeticOperation::Div,
        ArithmeticOperation::Mul,
    ];

    /// Look up an operator by its source text.
    pub fn from_symbol(symbol: &str) -> AstResult<Self> {
        match symbol {
            "+" => Ok(ArithmeticOperation::Add),
            "-" => Ok(ArithmeticOperation::Sub),
            "/" => Ok(ArithmeticOperation::Div),
            "*" => Ok(ArithmeticOperation::Mul),
            _ => Err(AstErrorKind::UnknownOperator {
                symbol: symbol.to_string(),
            }
            .into()),
        }
    }

    /// Canonical source text of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOperation::Add => "+",
            ArithmeticOperation::Sub => "-",
            ArithmeticOperation::Div => "/",
            ArithmeticOperation::Mul => "*",
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            ArithmeticOperation::Add => 0,
            ArithmeticOperation::Sub => 1,
            ArithmeticOperation::Div => 2,
            ArithmeticOperation::Mul => 3,
        }
    }

    /// Decode a tag written by `tag()`.
    pub fn from_tag(tag: u8) -> AstResult<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.tag() == tag)
            .ok_or_else(|| AstErrorKind::UnhandledOperation { tag }.into())
    }
}

impl FromStr for ArithmeticOperation {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for ArithmeticOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
