// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Value nodes: immediates and constant-foldable binary expressions.

use std::fmt;

use crate::config::{AstConfig, MAX_TREE_DEPTH};
use crate::error::{AstErrorKind, AstResult};
use crate::number::{NumKind, Number};
use crate::op::ArithmeticOperation;

/// A literal embedded directly in the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImmediateValue {
    pub value: Number,
}

impl ImmediateValue {
    pub fn new(value: impl Into<Number>) -> Self {
        Self { value: value.into() }
    }

    pub fn get_value(&self) -> Number {
        self.value
    }
}

impl fmt::Display for ImmediateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImmediateValue{{{}}}", self.value)
    }
}

/// A string literal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrValue(pub String);

impl StrValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImmediateValue{{{}}}", self.0)
    }
}

/// Two operands combined by an arithmetic operation.
///
/// The result kind and nesting depth are fixed when the node is built, so
/// both are available without walking the operands. Deserialized nodes go
/// through [`BinaryExpression::new`] as well; the cached fields are never
/// read from input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBinary"))]
pub struct BinaryExpression {
    op: ArithmeticOperation,
    lhs: Box<Value>,
    rhs: Box<Value>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    kind: NumKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    depth: usize,
}

impl BinaryExpression {
    /// Fails with `MaxNestingExceeded` when the result would nest deeper
    /// than [`MAX_TREE_DEPTH`].
    pub fn new(op: ArithmeticOperation, lhs: Value, rhs: Value) -> AstResult<Self> {
        let depth = lhs.depth().max(rhs.depth()) + 1;
        if depth > MAX_TREE_DEPTH {
            return Err(AstErrorKind::MaxNestingExceeded {
                limit: MAX_TREE_DEPTH,
            }
            .into());
        }
        Ok(Self {
            op,
            kind: NumKind::common(lhs.kind(), rhs.kind()),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            depth,
        })
    }

    /// Build from operator text, e.g. `"+"`.
    pub fn from_symbol(symbol: &str, lhs: Value, rhs: Value) -> AstResult<Self> {
        let op = ArithmeticOperation::from_symbol(symbol)?;
        Self::new(op, lhs, rhs)
    }

    pub fn op(&self) -> ArithmeticOperation {
        self.op
    }

    pub fn lhs(&self) -> &Value {
        &self.lhs
    }

    pub fn rhs(&self) -> &Value {
        &self.rhs
    }

    /// Kind of the folded result: the common kind of both operands.
    pub fn result_kind(&self) -> NumKind {
        self.kind
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get_value(&self) -> AstResult<Number> {
        self.evaluate(&AstConfig::default())
    }

    pub fn evaluate(&self, config: &AstConfig) -> AstResult<Number> {
        check_depth(self.depth, config)?;
        self.fold()
    }

    // Post-order: both operands, then the operation.
    fn fold(&self) -> AstResult<Number> {
        let lhs = self.lhs.fold()?;
        let rhs = self.rhs.fold()?;
        Number::apply(self.op, lhs, rhs)
    }
}

/// Wire form of [`BinaryExpression`]: operands only.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBinary {
    op: ArithmeticOperation,
    lhs: Box<Value>,
    rhs: Box<Value>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBinary> for BinaryExpression {
    type Error = crate::error::AstError;

    fn try_from(raw: RawBinary) -> AstResult<Self> {
        Self::new(raw.op, *raw.lhs, *raw.rhs)
    }
}

/// A node that produces a number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Immediate(ImmediateValue),
    Binary(BinaryExpression),
}

impl Value {
    pub fn immediate(value: impl Into<Number>) -> Self {
        Value::Immediate(ImmediateValue::new(value))
    }

    pub fn binary(op: ArithmeticOperation, lhs: Value, rhs: Value) -> AstResult<Self> {
        BinaryExpression::new(op, lhs, rhs).map(Value::Binary)
    }

    /// Kind of the value this node folds to.
    pub fn kind(&self) -> NumKind {
        match self {
            Value::Immediate(imm) => imm.value.kind(),
            Value::Binary(bin) => bin.result_kind(),
        }
    }

    /// Expression nesting depth; an immediate is depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Value::Immediate(_) => 1,
            Value::Binary(bin) => bin.depth(),
        }
    }

    /// Fold the tree using the default limits.
    pub fn get_value(&self) -> AstResult<Number> {
        self.evaluate(&AstConfig::default())
    }

    pub fn evaluate(&self, config: &AstConfig) -> AstResult<Number> {
        check_depth(self.depth(), config)?;
        self.fold()
    }

    fn fold(&self) -> AstResult<Number> {
        match self {
            Value::Immediate(imm) => Ok(imm.get_value()),
            Value::Binary(bin) => bin.fold(),
        }
    }
}

impl From<ImmediateValue> for Value {
    fn from(imm: ImmediateValue) -> Self {
        Value::Immediate(imm)
    }
}

impl From<BinaryExpression> for Value {
    fn from(bin: BinaryExpression) -> Self {
        Value::Binary(bin)
    }
}

pub(crate) fn check_depth(depth: usize, config: &AstConfig) -> AstResult<()> {
    if depth > config.max_depth {
        return Err(AstErrorKind::MaxNestingExceeded {
            limit: config.max_depth,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ArithmeticOperation::*;

    fn bin(op: ArithmeticOperation, lhs: Value, rhs: Value) -> Value {
        Value::binary(op, lhs, rhs).unwrap()
    }

    #[test]
    fn immediate_returns_literal() {
        let imm = ImmediateValue::new(42);
        assert_eq!(imm.get_value(), Number::Int(42));
        assert_eq!(imm.to_string(), "ImmediateValue{42}");
        assert_eq!(StrValue::new("hello").to_string(), "ImmediateValue{hello}");
    }

    #[test]
    fn binary_result_kind_is_static() {
        let bin = BinaryExpression::new(Add, Value::immediate(2), Value::immediate(1.5)).unwrap();
        assert_eq!(bin.result_kind(), NumKind::Float);
        assert_eq!(bin.get_value().unwrap(), Number::Float(3.5));

        let ints = BinaryExpression::new(Div, Value::immediate(7), Value::immediate(2)).unwrap();
        assert_eq!(ints.result_kind(), NumKind::Int);
        assert_eq!(ints.get_value().unwrap(), Number::Int(3));
    }

    #[test]
    fn nested_expression_folds_post_order() {
        // (10 - 4) * (1 / 4.0)
        let left = bin(Sub, Value::immediate(10), Value::immediate(4));
        let right = bin(Div, Value::immediate(1), Value::immediate(4.0));
        let expr = bin(Mul, left, right);
        assert_eq!(expr.kind(), NumKind::Float);
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.get_value().unwrap(), Number::Float(1.5));
    }

    #[test]
    fn error_from_inner_operand_propagates() {
        let zero_div = bin(Div, Value::immediate(5), Value::immediate(0));
        let expr = bin(Add, Value::immediate(1.0), zero_div);
        assert_eq!(expr.get_value().unwrap_err().kind, AstErrorKind::DivisionByZero);
    }

    #[test]
    fn from_symbol_rejects_unknown() {
        let err = BinaryExpression::from_symbol("%", Value::immediate(1), Value::immediate(2))
            .unwrap_err();
        assert!(matches!(err.kind, AstErrorKind::UnknownOperator { .. }));

        let ok = BinaryExpression::from_symbol("*", Value::immediate(3), Value::immediate(2))
            .unwrap();
        assert_eq!(ok.op(), Mul);
    }

    #[test]
    fn depth_bound_applies_to_expressions() {
        let mut expr = Value::immediate(1);
        for _ in 0..5 {
            expr = bin(Add, expr, Value::immediate(1));
        }
        let tight = AstConfig { max_depth: 5, ..AstConfig::default() };
        assert_eq!(
            expr.evaluate(&tight).unwrap_err().kind,
            AstErrorKind::MaxNestingExceeded { limit: 5 }
        );
        assert_eq!(expr.get_value().unwrap(), Number::Int(6));
    }

    #[test]
    fn construction_stops_at_tree_depth_ceiling() {
        let mut expr = Value::immediate(1);
        for _ in 1..MAX_TREE_DEPTH {
            expr = bin(Add, expr, Value::immediate(1));
        }
        assert_eq!(expr.depth(), MAX_TREE_DEPTH);

        // either side may carry the depth
        let err = Value::binary(Mul, Value::immediate(2), expr.clone()).unwrap_err();
        assert_eq!(
            err.kind,
            AstErrorKind::MaxNestingExceeded {
                limit: MAX_TREE_DEPTH
            }
        );
        assert!(Value::binary(Mul, expr, Value::immediate(2)).is_err());
    }
}
