//! Schema descriptions.
//!
//! A schema is built once through the [`Schema`] factory and then handed to
//! the [`Binder`](crate::Binder) for any number of binds. Every shape is an
//! explicit [`SchemaNode`] variant; dispatch is a match over the tag, never
//! runtime reflection.
//!
//! # Example
//!
//! ```rust
//! use intake::{contract, Binder, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("name", Schema::validated(contract::bounded_string(3, 50)))
//!     .field("age", Schema::validated(contract::ranged_integer(18, 120)))
//!     .into_node();
//!
//! let result = Binder::new().bind(&schema, &json!({"name": "Alice", "age": 30}));
//! assert!(result.is_valid());
//! ```

pub mod contract;
mod node;

pub use contract::{Bounds, CollectionContract, ScalarContract};
pub use node::{FieldDef, PredicateFn, PrimitiveKind, SchemaNode, StructSchema};

use std::sync::Arc;

use serde_json::Value;

/// Entry point for building schema nodes.
pub struct Schema;

impl Schema {
    /// A bare boolean.
    pub fn boolean() -> SchemaNode {
        SchemaNode::Primitive(PrimitiveKind::Bool)
    }

    /// A bare integer. Floats and out-of-range numbers are rejected.
    pub fn integer() -> SchemaNode {
        SchemaNode::Primitive(PrimitiveKind::Integer)
    }

    /// A bare float. Any finite JSON number binds.
    pub fn float() -> SchemaNode {
        SchemaNode::Primitive(PrimitiveKind::Float)
    }

    /// A bare string.
    pub fn string() -> SchemaNode {
        SchemaNode::Primitive(PrimitiveKind::String)
    }

    /// A value that may be JSON null; null binds to null without error,
    /// anything else binds against `inner` at the same path.
    pub fn optional(inner: SchemaNode) -> SchemaNode {
        SchemaNode::Optional(Box::new(inner))
    }

    /// A homogeneous JSON array.
    pub fn sequence(element: SchemaNode) -> SchemaNode {
        SchemaNode::Sequence(Box::new(element))
    }

    /// A validated scalar: the carrier binds first, then the contract's
    /// constructor decides.
    pub fn validated(contract: ScalarContract) -> SchemaNode {
        SchemaNode::ValidatedScalar(contract)
    }

    /// A validated collection: every element binds first, then the
    /// contract's constructor runs over the full element sequence.
    pub fn validated_collection(element: SchemaNode, contract: CollectionContract) -> SchemaNode {
        SchemaNode::ValidatedCollection {
            element: Box::new(element),
            contract,
        }
    }

    /// Wraps `inner` with a default substituted when the enclosing object
    /// omits the field. Meaningful only as a struct field schema; prefer
    /// [`StructSchema::default_field`].
    pub fn with_default(inner: SchemaNode, value: Value) -> SchemaNode {
        SchemaNode::Default {
            inner: Box::new(inner),
            value,
        }
    }

    /// Wraps `inner` with a custom acceptance check evaluated after a
    /// successful bind.
    pub fn predicate<F>(inner: SchemaNode, check: F) -> SchemaNode
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        SchemaNode::Predicate {
            inner: Box::new(inner),
            check: Arc::new(check),
        }
    }

    /// Starts an object schema builder with an ordered field list.
    pub fn object() -> StructSchema {
        StructSchema::new()
    }
}
