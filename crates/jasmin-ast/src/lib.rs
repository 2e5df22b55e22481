// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Jasmin assembler language.
//!
//! The parser builds these nodes bottom-up (immediates, then expressions,
//! then instructions, labels and directives). Downstream consumers walk the
//! finished tree to fold constant expressions and to render it as text.

pub mod config;
pub mod error;
pub mod node;
pub mod number;
pub mod op;
pub mod render;
pub mod span;
pub mod value;

pub use config::{AstConfig, MAX_TREE_DEPTH};
pub use error::{AstError, AstErrorKind, AstResult, NodeContext, NodeKind};
pub use node::{ArgValue, Argument, Directive, Instruction, Label, Node, Program};
pub use number::{NumKind, Number};
pub use op::ArithmeticOperation;
pub use span::{LineMap, Span};
pub use value::{BinaryExpression, ImmediateValue, StrValue, Value};
