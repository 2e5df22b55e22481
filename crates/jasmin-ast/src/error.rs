// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors raised while building, evaluating or rendering a tree.

use std::fmt;

use thiserror::Error;

use crate::op::ArithmeticOperation;
use crate::Span;

/// An AST error, optionally tied to the node it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AstError {
    pub kind: AstErrorKind,
    pub context: Option<NodeContext>,
}

/// The kind of AST error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstErrorKind {
    /// Operator text not present in the operation registry.
    #[error("unknown arithmetic operator `{symbol}`")]
    UnknownOperator { symbol: String },

    /// Integer division with a zero divisor.
    #[error("division by zero in integer expression")]
    DivisionByZero,

    /// Encoded operation tag outside the registry table.
    #[error("unhandled arithmetic operation tag {tag}")]
    UnhandledOperation { tag: u8 },

    /// Label or expression nesting deeper than the configured bound.
    #[error("nesting exceeds the maximum depth of {limit}")]
    MaxNestingExceeded { limit: usize },

    /// Integer result does not fit in 64 bits.
    #[error("integer overflow evaluating `{lhs} {op} {rhs}`")]
    ArithmeticOverflow {
        op: ArithmeticOperation,
        lhs: i64,
        rhs: i64,
    },
}

/// Which program node an error belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeContext {
    pub node: NodeKind,
    pub name: String,
    pub span: Option<Span>,
}

/// Named node kinds that can carry error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directive,
    Instruction,
    Label,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directive => write!(f, "directive"),
            NodeKind::Instruction => write!(f, "instruction"),
            NodeKind::Label => write!(f, "label"),
        }
    }
}

impl AstError {
    /// Attach node context, keeping the innermost one if already set.
    pub fn in_node(mut self, node: NodeKind, name: &str, span: Option<Span>) -> Self {
        if self.context.is_none() {
            self.context = Some(NodeContext {
                node,
                name: name.to_string(),
                span,
            });
        }
        self
    }

    pub fn span(&self) -> Option<Span> {
        self.context.as_ref().and_then(|c| c.span)
    }
}

impl From<AstErrorKind> for AstError {
    fn from(kind: AstErrorKind) -> Self {
        AstError { kind, context: None }
    }
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "in {} `{}`: {}", ctx.node, ctx.name, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for AstError {}

/// Result type for AST operations.
pub type AstResult<T> = Result<T, AstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_context() {
        let err = AstError::from(AstErrorKind::DivisionByZero);
        assert_eq!(err.to_string(), "division by zero in integer expression");
        assert_eq!(err.span(), None);
    }

    #[test]
    fn innermost_context_wins() {
        let err = AstError::from(AstErrorKind::MaxNestingExceeded { limit: 4 })
            .in_node(NodeKind::Label, "inner", Some(Span::new(10, 15)))
            .in_node(NodeKind::Label, "outer", None);
        assert_eq!(
            err.to_string(),
            "in label `inner`: nesting exceeds the maximum depth of 4"
        );
        assert_eq!(err.span(), Some(Span::new(10, 15)));
    }

    #[test]
    fn overflow_message_names_operands() {
        let kind = AstErrorKind::ArithmeticOverflow {
            op: ArithmeticOperation::Mul,
            lhs: i64::MAX,
            rhs: 2,
        };
        assert_eq!(
            kind.to_string(),
            format!("integer overflow evaluating `{} * 2`", i64::MAX)
        );
    }
}
