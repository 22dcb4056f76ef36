// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed output values for operation nodes.

use crate::node::NodeId;
use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};

/// Kind of value an output holder carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderDataKind {
    /// Single float
    Scalar,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector
    Vec4,
    /// Resolution failed
    Invalid,
}

/// Output value holder attached to a node's output slot.
///
/// Only [`OutputFactory`] creates holders, always owned by the slot they
/// are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderData {
    owner: NodeId,
    kind: ShaderDataKind,
}

impl ShaderData {
    /// Node that owns this output
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Value kind
    pub fn kind(&self) -> ShaderDataKind {
        self.kind
    }

    /// Type downstream nodes see when they resolve against this output
    pub fn value_type(&self) -> ValueType {
        match self.kind {
            ShaderDataKind::Scalar => ValueType::Scalar,
            ShaderDataKind::Vec2 => ValueType::Vec2,
            ShaderDataKind::Vec3 => ValueType::Vec3,
            ShaderDataKind::Vec4 => ValueType::Vec4,
            ShaderDataKind::Invalid => ValueType::Invalid,
        }
    }

    /// Whether this holder marks a failed resolution
    pub fn is_invalid(&self) -> bool {
        self.kind == ShaderDataKind::Invalid
    }

    /// Number of float components
    pub fn component_count(&self) -> usize {
        self.value_type().component_count()
    }
}

/// Something that owns a single output slot
pub trait OutputSlot {
    /// ID of the owning node
    fn node_id(&self) -> NodeId;

    /// Current output, if any
    fn output(&self) -> Option<&ShaderData>;

    /// Store a new output, returning the one it replaced
    fn replace_output(&mut self, data: ShaderData) -> Option<ShaderData>;
}

/// Builds output holders from resolved types
pub struct OutputFactory;

impl OutputFactory {
    /// Holder kind for a resolved type.
    ///
    /// Only scalars and vectors have holders; everything else, `Color`
    /// included, gets the invalid holder.
    pub fn kind_for(ty: ValueType) -> ShaderDataKind {
        match ty {
            ValueType::Scalar => ShaderDataKind::Scalar,
            ValueType::Vec2 => ShaderDataKind::Vec2,
            ValueType::Vec3 => ShaderDataKind::Vec3,
            ValueType::Vec4 => ShaderDataKind::Vec4,
            ValueType::Color | ValueType::Invalid => ShaderDataKind::Invalid,
        }
    }

    /// Build a holder for `ty` and attach it to `slot`, discarding any
    /// previous output. Returns a copy of the attached holder.
    pub fn build<S: OutputSlot + ?Sized>(ty: ValueType, slot: &mut S) -> ShaderData {
        let data = ShaderData {
            owner: slot.node_id(),
            kind: Self::kind_for(ty),
        };
        if data.is_invalid() {
            tracing::debug!("Node {:?} output is invalid ({ty})", data.owner.0);
        }
        if let Some(previous) = slot.replace_output(data) {
            tracing::trace!("Replaced {:?} output on node {:?}", previous.kind, previous.owner.0);
        }
        data
    }
}
