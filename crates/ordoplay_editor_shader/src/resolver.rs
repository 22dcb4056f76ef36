// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output type resolution for operation nodes.
//!
//! Resolution never fails out of band: an operand combination with no
//! matching rule, or an operation without a table, resolves to
//! [`ValueType::Invalid`]. Since no rule accepts `Invalid` as an input,
//! a failure upstream invalidates every operation that consumes it.

use crate::operation::Operation;
use crate::registry::OperationRegistry;
use crate::value_type::ValueType;
use std::fmt;

impl OperationRegistry {
    /// Resolve the output type of a two-operand operation
    pub fn resolve_binary(&self, operation: Operation, a: ValueType, b: ValueType) -> ValueType {
        let output = self
            .table(operation)
            .map_or(ValueType::Invalid, |table| table.resolve_binary(a, b));
        log_resolution(operation, &[a, b], output);
        output
    }

    /// Resolve the output type of a three-operand operation
    pub fn resolve_ternary(
        &self,
        operation: Operation,
        a: ValueType,
        b: ValueType,
        c: ValueType,
    ) -> ValueType {
        let output = self
            .table(operation)
            .map_or(ValueType::Invalid, |table| table.resolve_ternary(a, b, c));
        log_resolution(operation, &[a, b, c], output);
        output
    }

    /// Resolve with however many operands the caller has.
    ///
    /// Two or three operands go to the matching resolver; any other count
    /// resolves to `Invalid`.
    pub fn resolve(&self, operation: Operation, operands: &[ValueType]) -> ValueType {
        match *operands {
            [a, b] => self.resolve_binary(operation, a, b),
            [a, b, c] => self.resolve_ternary(operation, a, b, c),
            _ => {
                tracing::debug!("{operation} given {} operands", operands.len());
                ValueType::Invalid
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but reports a mismatch as an error
    /// carrying the operation and operand types.
    pub fn check(&self, operation: Operation, operands: &[ValueType]) -> Result<ValueType, TypeMismatch> {
        match self.resolve(operation, operands) {
            ValueType::Invalid => Err(TypeMismatch {
                operation,
                operands: operands.to_vec(),
            }),
            output => Ok(output),
        }
    }
}

fn log_resolution(operation: Operation, operands: &[ValueType], output: ValueType) {
    if output.is_valid() {
        tracing::trace!("{operation}{operands:?} -> {output}");
    } else {
        tracing::debug!("{operation}{operands:?} has no matching rule");
    }
}

/// Resolve a two-operand operation against the process-wide registry
pub fn resolve_binary(operation: Operation, a: ValueType, b: ValueType) -> ValueType {
    OperationRegistry::instance().resolve_binary(operation, a, b)
}

/// Resolve a three-operand operation against the process-wide registry
pub fn resolve_ternary(operation: Operation, a: ValueType, b: ValueType, c: ValueType) -> ValueType {
    OperationRegistry::instance().resolve_ternary(operation, a, b, c)
}

/// Resolve any operand count against the process-wide registry
pub fn resolve(operation: Operation, operands: &[ValueType]) -> ValueType {
    OperationRegistry::instance().resolve(operation, operands)
}

/// No rule matches the operands of an operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Type mismatch: no {operation} rule accepts ({})", OperandList(.operands))]
pub struct TypeMismatch {
    /// Operation being resolved
    pub operation: Operation,
    /// Operand types, in slot order
    pub operands: Vec<ValueType>,
}

struct OperandList<'a>(&'a [ValueType]);

impl fmt::Display for OperandList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
