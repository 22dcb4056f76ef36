// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of rule tables, one per operation.
//!
//! The process-wide registry is built on first access and never mutated
//! afterwards, so it can be read from any thread without locking.
//! Standalone registries can also be built from RON rule data for tools.

use crate::operation::Operation;
use crate::rule::{
    RuleError, RuleTable, ADDITIVE_RULES, CROSS_PRODUCT_RULES, DOT_PRODUCT_RULES, MIX_RULES,
    POW_RULES,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static INSTANCE: Lazy<OperationRegistry> = Lazy::new(OperationRegistry::builtin);

/// Rule tables keyed by operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationRegistry {
    tables: IndexMap<Operation, RuleTable>,
}

impl OperationRegistry {
    /// The process-wide registry, built with the builtin tables on first call
    pub fn instance() -> &'static OperationRegistry {
        &INSTANCE
    }

    /// Create a registry with no tables; every query resolves to `Invalid`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding the builtin rule tables
    pub fn builtin() -> Self {
        let registry = Self::empty()
            .with_table(Operation::Addition, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::Subtraction, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::Multiplication, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::Division, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::DotProduct, RuleTable::binary(DOT_PRODUCT_RULES))
            .with_table(Operation::CrossProduct, RuleTable::binary(CROSS_PRODUCT_RULES))
            .with_table(Operation::Min, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::Max, RuleTable::binary(ADDITIVE_RULES))
            .with_table(Operation::Pow, RuleTable::binary(POW_RULES))
            .with_table(Operation::Mix, RuleTable::ternary(MIX_RULES));

        tracing::debug!("Built operation registry with {} tables", registry.tables.len());
        registry
    }

    /// Set the table for an operation, replacing any previous one
    pub fn with_table(mut self, operation: Operation, table: RuleTable) -> Self {
        self.tables.insert(operation, table);
        self
    }

    /// Get the table for an operation
    pub fn table(&self, operation: Operation) -> Option<&RuleTable> {
        self.tables.get(&operation)
    }

    /// Operations that have a table, in registration order
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.tables.keys().copied()
    }

    /// Load a registry from RON rule data.
    ///
    /// Each table must match its operation's arity and may not mention
    /// the `Invalid` type.
    pub fn from_ron(s: &str) -> Result<Self, RegistryError> {
        let registry: Self = ron::from_str(s)?;

        for (operation, table) in &registry.tables {
            if table.arity() != operation.arity() {
                tracing::warn!("Rejecting rule data: {operation} table has the wrong arity");
                return Err(RegistryError::ArityMismatch {
                    operation: *operation,
                    expected: operation.arity(),
                    found: table.arity(),
                });
            }
            table.validate().map_err(|source| {
                tracing::warn!("Rejecting rule data: {operation}: {source}");
                RegistryError::Rule { operation: *operation, source }
            })?;
        }

        Ok(registry)
    }

    /// Serialize to RON rule data
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

/// Error when loading rule data
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Malformed RON
    #[error("Failed to parse rule data: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Table arity does not match the operation
    #[error("{operation} takes {expected} operands but its table has {found}")]
    ArityMismatch {
        /// Operation whose table is wrong
        operation: Operation,
        /// Operand count of the operation
        expected: usize,
        /// Operand count of the table
        found: usize,
    },

    /// A rule is malformed
    #[error("Bad rule for {operation}: {source}")]
    Rule {
        /// Operation whose table is wrong
        operation: Operation,
        /// Underlying rule error
        source: RuleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::BinaryRule;
    use crate::value_type::ValueType;

    #[test]
    fn test_builtin_has_every_operation() {
        let registry = OperationRegistry::builtin();
        let ops: Vec<_> = registry.operations().collect();
        assert_eq!(ops, Operation::ALL);
        for op in Operation::ALL {
            assert_eq!(registry.table(op).map(RuleTable::arity), Some(op.arity()));
        }
    }

    #[test]
    fn test_instance_is_shared() {
        let a = OperationRegistry::instance();
        let b = OperationRegistry::instance();
        assert!(std::ptr::eq(a, b));
        assert_eq!(*a, OperationRegistry::builtin());
    }

    #[test]
    fn test_additive_tables_are_copies() {
        let registry = OperationRegistry::builtin();
        let add = registry.table(Operation::Addition).unwrap();
        let div = registry.table(Operation::Division).unwrap();
        assert_eq!(add, div);
        assert!(!std::ptr::eq(add, div));

        // Narrowing one table leaves its siblings alone
        let narrowed = registry.with_table(
            Operation::Division,
            RuleTable::binary(&[BinaryRule::commutative(
                ValueType::Scalar,
                ValueType::Scalar,
                ValueType::Scalar,
            )]),
        );
        assert_eq!(narrowed.table(Operation::Division).unwrap().len(), 1);
        assert_eq!(narrowed.table(Operation::Addition).unwrap().len(), ADDITIVE_RULES.len());
    }

    #[test]
    fn test_ron_round_trip() {
        let registry = OperationRegistry::builtin();
        let ron_str = registry.to_ron().unwrap();
        let loaded = OperationRegistry::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_ron_partial_registry() {
        let ron_str = r#"(
            tables: {
                Pow: Binary([
                    (a: Scalar, b: Scalar, output: Scalar),
                ]),
            },
        )"#;
        let registry = OperationRegistry::from_ron(ron_str).unwrap();
        assert_eq!(registry.operations().collect::<Vec<_>>(), vec![Operation::Pow]);
        let table = registry.table(Operation::Pow).unwrap();
        assert_eq!(table.resolve_binary(ValueType::Scalar, ValueType::Scalar), ValueType::Scalar);
        assert!(registry.table(Operation::Addition).is_none());
    }

    #[test]
    fn test_ron_rejects_arity_mismatch() {
        let ron_str = r#"(tables: { Mix: Binary([]) })"#;
        let err = OperationRegistry::from_ron(ron_str).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ArityMismatch { operation: Operation::Mix, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_ron_rejects_invalid_type() {
        let ron_str = r#"(tables: {
            Addition: Binary([(a: Invalid, b: Scalar, output: Scalar, commutative: true)]),
        })"#;
        let err = OperationRegistry::from_ron(ron_str).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Rule { operation: Operation::Addition, source: RuleError::InvalidInRule { index: 0 } }
        ));
    }

    #[test]
    fn test_ron_parse_error() {
        let err = OperationRegistry::from_ron("(tables: {").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
