// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader graph type resolution for `OrdoPlay` Editor.
//!
//! When operand nodes are wired into an arithmetic or vector operation
//! node, this crate decides whether the operand types are legal for the
//! operation and what the output type is, then builds a typed output
//! holder for the operation node.
//!
//! ## Architecture
//!
//! - [`ValueType`]: closed set of value kinds, plus the `Invalid` marker
//! - [`rule`]: per-operation rule tables, first match wins
//! - [`OperationRegistry`]: one table per [`Operation`], built once per process
//! - [`resolver`]: operand types in, output type (or `Invalid`) out
//! - [`OutputFactory`]: resolved type in, [`ShaderData`] holder out
//!
//! Failure is a value, not an error: `Invalid` never matches a rule input,
//! so one bad connection invalidates everything downstream of it.

pub mod value_type;
pub mod operation;
pub mod rule;
pub mod registry;
pub mod resolver;
pub mod output;
pub mod node;

pub use value_type::ValueType;
pub use operation::Operation;
pub use rule::{BinaryRule, RuleTable, TernaryRule};
pub use registry::{OperationRegistry, RegistryError};
pub use resolver::{resolve, resolve_binary, resolve_ternary, TypeMismatch};
pub use output::{OutputFactory, OutputSlot, ShaderData, ShaderDataKind};
pub use node::{NodeId, OperationNode};
