// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Numeric literals and the two-operand promotion rules.

use std::fmt;

use crate::error::{AstErrorKind, AstResult};
use crate::op::ArithmeticOperation;

/// Kind of a numeric literal or expression result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumKind {
    Int,
    Float,
}

impl NumKind {
    /// Result kind of combining `lhs` and `rhs` in a binary expression.
    pub fn common(lhs: NumKind, rhs: NumKind) -> NumKind {
        match (lhs, rhs) {
            (NumKind::Int, NumKind::Int) => NumKind::Int,
            (NumKind::Int, NumKind::Float) => NumKind::Float,
            (NumKind::Float, NumKind::Int) => NumKind::Float,
            (NumKind::Float, NumKind::Float) => NumKind::Float,
        }
    }
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumKind::Int => write!(f, "int"),
            NumKind::Float => write!(f, "float"),
        }
    }
}

/// A numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn kind(&self) -> NumKind {
        match self {
            Number::Int(_) => NumKind::Int,
            Number::Float(_) => NumKind::Float,
        }
    }

    /// Widen to `f64`. Integers beyond 2^53 lose precision.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Float(_) => None,
        }
    }

    /// Apply `op` to two values after promoting them to their common kind.
    ///
    /// Integer arithmetic is checked: `Div` truncates toward zero, a zero
    /// divisor is `DivisionByZero` and any overflow is `ArithmeticOverflow`.
    /// Float arithmetic follows IEEE 754, so dividing by zero gives an
    /// infinity or NaN.
    pub fn apply(op: ArithmeticOperation, lhs: Number, rhs: Number) -> AstResult<Number> {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => int_apply(op, a, b).map(Number::Int),
            _ => Ok(Number::Float(float_apply(op, lhs.as_f64(), rhs.as_f64()))),
        }
    }
}

fn int_apply(op: ArithmeticOperation, a: i64, b: i64) -> AstResult<i64> {
    if op == ArithmeticOperation::Div && b == 0 {
        return Err(AstErrorKind::DivisionByZero.into());
    }
    let result = match op {
        ArithmeticOperation::Add => a.checked_add(b),
        ArithmeticOperation::Sub => a.checked_sub(b),
        ArithmeticOperation::Div => a.checked_div(b),
        ArithmeticOperation::Mul => a.checked_mul(b),
    };
    result.ok_or_else(|| AstErrorKind::ArithmeticOverflow { op, lhs: a, rhs: b }.into())
}

fn float_apply(op: ArithmeticOperation, a: f64, b: f64) -> f64 {
    match op {
        ArithmeticOperation::Add => a + b,
        ArithmeticOperation::Sub => a - b,
        ArithmeticOperation::Div => a / b,
        ArithmeticOperation::Mul => a * b,
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            // always carries a fraction or an exponent: `2.0`, `1e300`
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}
