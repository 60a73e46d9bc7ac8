use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::{EngineError, EngineResult};

/// Primitive operation applied to a running accumulator.
///
/// Tokens come from merchant configuration (`+`, `×`) and from order-item
/// lifecycle events (`increment`, `decrement`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    /// Stock goes back on the shelf
    pub const INCREMENT: Operator = Operator::Add;
    /// Stock is consumed
    pub const DECREMENT: Operator = Operator::Subtract;

    /// Combine `value` into `accumulator`, failing instead of overflowing.
    pub fn apply(self, value: Decimal, accumulator: Decimal) -> EngineResult<Decimal> {
        let result = match self {
            Operator::Add => accumulator.checked_add(value),
            Operator::Subtract => accumulator.checked_sub(value),
            Operator::Multiply => accumulator.checked_mul(value),
        };
        result.ok_or_else(|| EngineError::NumericOverflow(format!("{accumulator} {self} {value}")))
    }

    /// Operation that undoes this one for stock movements
    pub fn inverse(self) -> Operator {
        match self {
            Operator::Add => Operator::Subtract,
            Operator::Subtract => Operator::Add,
            Operator::Multiply => Operator::Multiply,
        }
    }
}

impl FromStr for Operator {
    type Err = EngineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "+" | "add" | "increment" => Ok(Operator::Add),
            "-" | "subtract" | "decrement" => Ok(Operator::Subtract),
            "×" | "multiply" => Ok(Operator::Multiply),
            other => {
                debug!(token = other, "rejected operator token");
                Err(EngineError::UnsupportedOperator(other.to_string()))
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
        };
        f.write_str(token)
    }
}

/// Parse `token` and apply it in one step.
pub fn apply(token: &str, value: Decimal, accumulator: Decimal) -> EngineResult<Decimal> {
    let op: Operator = token.parse()?;
    op.apply(value, accumulator)
}
