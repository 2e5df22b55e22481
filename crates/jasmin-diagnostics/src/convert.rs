// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from AST errors to `Diagnostic`.

use jasmin_ast::{ArithmeticOperation, AstError, AstErrorKind};

use crate::codes;
use crate::{Diagnostic, ToDiagnostic};

impl ToDiagnostic for AstError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = match &self.kind {
            AstErrorKind::UnknownOperator { symbol } => {
                let valid: Vec<_> = ArithmeticOperation::ALL
                    .iter()
                    .map(|op| format!("`{}`", op.symbol()))
                    .collect();
                Diagnostic::error(format!("unknown arithmetic operator `{}`", symbol))
                    .with_code(codes::UNKNOWN_OPERATOR)
                    .with_help(format!("valid operators are {}", valid.join(", ")))
            }

            AstErrorKind::UnhandledOperation { tag } => {
                Diagnostic::error(format!("unhandled arithmetic operation tag {}", tag))
                    .with_code(codes::UNHANDLED_OPERATION)
                    .with_note(format!(
                        "operation tags 0-{} are defined by table version {}",
                        ArithmeticOperation::ALL.len() - 1,
                        jasmin_ast::op::OP_TABLE_VERSION
                    ))
            }

            AstErrorKind::DivisionByZero => Diagnostic::error("division by zero")
                .with_code(codes::DIVISION_BY_ZERO)
                .with_note("both operands are integers, so the division is not done in floating point"),

            AstErrorKind::ArithmeticOverflow { op, lhs, rhs } => {
                Diagnostic::error(format!("integer overflow in `{} {} {}`", lhs, op, rhs))
                    .with_code(codes::ARITHMETIC_OVERFLOW)
                    .with_help("make one operand a float literal to fold in floating point")
            }

            AstErrorKind::MaxNestingExceeded { limit } => {
                Diagnostic::error(format!("nesting exceeds the maximum depth of {}", limit))
                    .with_code(codes::NESTING_TOO_DEEP)
                    .with_help("check for a label that contains itself, or raise `max_depth`")
            }
        };

        if let Some(ctx) = &self.context {
            let msg = format!("in this {}", ctx.node);
            diag = match ctx.span {
                Some(span) => diag.with_primary(span, msg),
                None => diag.with_note(format!("{} `{}`", msg, ctx.name)),
            };
        }

        diag
    }
}
