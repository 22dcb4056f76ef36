// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operation rules and per-operation rule tables.
//!
//! A rule maps operand types to an output type. Tables are scanned in
//! declaration order and the first matching rule wins.

use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};
use ValueType::{Color, Scalar, Vec2, Vec3, Vec4};

/// Rule for a two-operand operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryRule {
    /// First operand type
    pub a: ValueType,
    /// Second operand type
    pub b: ValueType,
    /// Resulting type
    pub output: ValueType,
    /// Whether `a` and `b` may also match in swapped order
    #[serde(default)]
    pub commutative: bool,
}

impl BinaryRule {
    /// Create a rule that also matches with operands swapped
    pub const fn commutative(a: ValueType, b: ValueType, output: ValueType) -> Self {
        Self { a, b, output, commutative: true }
    }

    /// Create a rule that only matches in the given operand order
    pub const fn ordered(a: ValueType, b: ValueType, output: ValueType) -> Self {
        Self { a, b, output, commutative: false }
    }

    /// Check if the operands satisfy this rule.
    ///
    /// The swapped order is only tried after the declared order fails.
    pub fn matches(&self, a: ValueType, b: ValueType) -> bool {
        (self.a == a && self.b == b) || (self.commutative && self.a == b && self.b == a)
    }

    fn mentions_invalid(&self) -> bool {
        [self.a, self.b, self.output].contains(&ValueType::Invalid)
    }
}

/// Rule for a three-operand operation. Operand order always matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TernaryRule {
    /// First operand type
    pub a: ValueType,
    /// Second operand type
    pub b: ValueType,
    /// Third operand type
    pub c: ValueType,
    /// Resulting type
    pub output: ValueType,
}

impl TernaryRule {
    /// Create a new ternary rule
    pub const fn new(a: ValueType, b: ValueType, c: ValueType, output: ValueType) -> Self {
        Self { a, b, c, output }
    }

    /// Check if the operands satisfy this rule
    pub fn matches(&self, a: ValueType, b: ValueType, c: ValueType) -> bool {
        self.a == a && self.b == b && self.c == c
    }

    fn mentions_invalid(&self) -> bool {
        [self.a, self.b, self.c, self.output].contains(&ValueType::Invalid)
    }
}

/// Rules shared by addition, subtraction, multiplication, division, min and max
pub const ADDITIVE_RULES: &[BinaryRule] = &[
    BinaryRule::commutative(Scalar, Scalar, Scalar),
    BinaryRule::commutative(Scalar, Vec2, Vec2),
    BinaryRule::commutative(Scalar, Vec3, Vec3),
    BinaryRule::commutative(Scalar, Vec4, Vec4),
    BinaryRule::commutative(Vec2, Vec2, Vec2),
    BinaryRule::commutative(Vec3, Vec3, Vec3),
    BinaryRule::commutative(Vec4, Vec4, Vec4),
    BinaryRule::commutative(Vec4, Color, Vec4),
];

/// Dot product rules
pub const DOT_PRODUCT_RULES: &[BinaryRule] = &[BinaryRule::commutative(Vec3, Vec3, Scalar)];

/// Cross product rules
pub const CROSS_PRODUCT_RULES: &[BinaryRule] = &[BinaryRule::commutative(Vec3, Vec3, Vec3)];

/// Power rules. None of these are commutative.
pub const POW_RULES: &[BinaryRule] = &[
    BinaryRule::ordered(Scalar, Scalar, Scalar),
    BinaryRule::ordered(Vec2, Vec2, Vec2),
    BinaryRule::ordered(Vec3, Vec3, Vec3),
    BinaryRule::ordered(Vec4, Vec4, Vec4),
    BinaryRule::ordered(Color, Vec4, Vec4),
];

/// Linear interpolation rules, `mix(a, b, t)`
pub const MIX_RULES: &[TernaryRule] = &[
    TernaryRule::new(Scalar, Scalar, Scalar, Scalar),
    TernaryRule::new(Vec2, Vec2, Scalar, Vec2),
    TernaryRule::new(Vec3, Vec3, Scalar, Vec3),
    TernaryRule::new(Vec4, Vec4, Scalar, Vec4),
];

/// Ordered rules for a single operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTable {
    /// Two-operand rules
    Binary(Vec<BinaryRule>),
    /// Three-operand rules
    Ternary(Vec<TernaryRule>),
}

impl RuleTable {
    /// Create a binary table holding its own copy of `rules`
    pub fn binary(rules: &[BinaryRule]) -> Self {
        Self::Binary(rules.to_vec())
    }

    /// Create a ternary table holding its own copy of `rules`
    pub fn ternary(rules: &[TernaryRule]) -> Self {
        Self::Ternary(rules.to_vec())
    }

    /// Operand count this table matches
    pub fn arity(&self) -> usize {
        match self {
            Self::Binary(_) => 2,
            Self::Ternary(_) => 3,
        }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(rules) => rules.len(),
            Self::Ternary(rules) => rules.len(),
        }
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output of the first matching binary rule, or `Invalid`
    pub fn resolve_binary(&self, a: ValueType, b: ValueType) -> ValueType {
        match self {
            Self::Binary(rules) => rules
                .iter()
                .find(|rule| rule.matches(a, b))
                .map_or(ValueType::Invalid, |rule| rule.output),
            Self::Ternary(_) => ValueType::Invalid,
        }
    }

    /// Output of the first matching ternary rule, or `Invalid`
    pub fn resolve_ternary(&self, a: ValueType, b: ValueType, c: ValueType) -> ValueType {
        match self {
            Self::Ternary(rules) => rules
                .iter()
                .find(|rule| rule.matches(a, b, c))
                .map_or(ValueType::Invalid, |rule| rule.output),
            Self::Binary(_) => ValueType::Invalid,
        }
    }

    /// Reject rules that mention `Invalid` as an input or output
    pub fn validate(&self) -> Result<(), RuleError> {
        let bad = match self {
            Self::Binary(rules) => rules.iter().position(BinaryRule::mentions_invalid),
            Self::Ternary(rules) => rules.iter().position(TernaryRule::mentions_invalid),
        };
        match bad {
            Some(index) => Err(RuleError::InvalidInRule { index }),
            None => Ok(()),
        }
    }
}

/// Error in authored rule data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A rule uses the failure marker as a real type
    #[error("Rule {index} uses the Invalid type")]
    InvalidInRule {
        /// Position of the offending rule in its table
        index: usize,
    },
}
