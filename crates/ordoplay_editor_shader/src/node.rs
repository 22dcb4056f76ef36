// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operation nodes that own a resolved output slot.

use crate::operation::Operation;
use crate::output::{OutputFactory, OutputSlot, ShaderData};
use crate::registry::OperationRegistry;
use crate::resolver::TypeMismatch;
use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node performing one arithmetic or vector operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationNode {
    /// Unique instance ID
    pub id: NodeId,
    /// Operation performed
    pub operation: Operation,
    /// Operand types, one per input slot. Unconnected slots are `Invalid`.
    inputs: Vec<ValueType>,
    /// Resolved output
    output: Option<ShaderData>,
}

impl OperationNode {
    /// Create a node with all inputs unconnected
    pub fn new(operation: Operation) -> Self {
        Self {
            id: NodeId::new(),
            operation,
            inputs: vec![ValueType::Invalid; operation.arity()],
            output: None,
        }
    }

    /// Operand types in slot order
    pub fn inputs(&self) -> &[ValueType] {
        &self.inputs
    }

    /// Set the type of an input slot. Out-of-range slots are ignored.
    pub fn set_input(&mut self, slot: usize, ty: ValueType) -> &mut Self {
        match self.inputs.get_mut(slot) {
            Some(input) => *input = ty,
            None => tracing::warn!("{} node has no input slot {slot}", self.operation),
        }
        self
    }

    /// Take an input type from an upstream node's current output.
    ///
    /// An upstream node with no output yet counts as `Invalid`.
    pub fn connect_from(&mut self, slot: usize, upstream: &impl OutputSlot) -> &mut Self {
        let ty = upstream.output().map_or(ValueType::Invalid, ShaderData::value_type);
        self.set_input(slot, ty)
    }

    /// Resolve against the process-wide registry and rebuild the output
    pub fn resolve(&mut self) -> ShaderData {
        self.resolve_with(OperationRegistry::instance())
    }

    /// Resolve against a specific registry and rebuild the output
    pub fn resolve_with(&mut self, registry: &OperationRegistry) -> ShaderData {
        let ty = registry.resolve(self.operation, &self.inputs);
        OutputFactory::build(ty, self)
    }

    /// Current operands as a checked resolution, for surfacing errors
    pub fn check(&self) -> Result<ValueType, TypeMismatch> {
        OperationRegistry::instance().check(self.operation, &self.inputs)
    }
}

impl OutputSlot for OperationNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn output(&self) -> Option<&ShaderData> {
        self.output.as_ref()
    }

    fn replace_output(&mut self, data: ShaderData) -> Option<ShaderData> {
        self.output.replace(data)
    }
}
