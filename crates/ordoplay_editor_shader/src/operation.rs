// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arithmetic and vector operations available as shader graph nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation performed by an operation node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a * b`
    Multiplication,
    /// `a / b`
    Division,
    /// `dot(a, b)`
    DotProduct,
    /// `cross(a, b)`
    CrossProduct,
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
    /// `pow(a, b)`
    Pow,
    /// `mix(a, b, t)`
    Mix,
}

impl Operation {
    /// All operations, in registry order
    pub const ALL: [Operation; 10] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::DotProduct,
        Operation::CrossProduct,
        Operation::Min,
        Operation::Max,
        Operation::Pow,
        Operation::Mix,
    ];

    /// Number of operands
    pub fn arity(self) -> usize {
        match self {
            Self::Mix => 3,
            _ => 2,
        }
    }

    /// Stable identifier used in rule data
    pub fn name(self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Subtraction => "Subtraction",
            Self::Multiplication => "Multiplication",
            Self::Division => "Division",
            Self::DotProduct => "DotProduct",
            Self::CrossProduct => "CrossProduct",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Pow => "Pow",
            Self::Mix => "Mix",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}

/// Error when parsing an operation identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation: {0:?}")]
pub struct ParseOperationError(pub String);
