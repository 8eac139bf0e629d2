//! The schema description the binder and serializer dispatch over.
//!
//! [`SchemaNode`] is an explicit tagged union built once per schema through
//! the builder API; binding never reflects over user types at runtime.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::contract::{CollectionContract, ScalarContract};

/// The four primitive carrier kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Integer,
    Float,
    String,
}

impl PrimitiveKind {
    /// Name used in type-mismatch diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
        }
    }
}

/// A custom acceptance check evaluated after the inner schema binds.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One shape in a schema description.
///
/// Nodes compose recursively; the [`Binder`](crate::Binder) walks a node
/// against a value tree and the serializer mirrors the same walk for output.
#[derive(Clone)]
pub enum SchemaNode {
    /// A bare primitive value.
    Primitive(PrimitiveKind),
    /// JSON null binds to null; anything else binds against the inner node.
    Optional(Box<SchemaNode>),
    /// A JSON array of homogeneous elements.
    Sequence(Box<SchemaNode>),
    /// A primitive carrier passed through a fallible constructor.
    ValidatedScalar(ScalarContract),
    /// A bound element sequence passed through a fallible constructor.
    ValidatedCollection {
        element: Box<SchemaNode>,
        contract: CollectionContract,
    },
    /// Substitutes `value` when the enclosing object omits the field.
    Default {
        inner: Box<SchemaNode>,
        value: Value,
    },
    /// Binds the inner node, then requires `check` to accept the result.
    Predicate {
        inner: Box<SchemaNode>,
        check: PredicateFn,
    },
    /// A JSON object with a declared, ordered field list.
    Struct(StructSchema),
}

impl SchemaNode {
    /// The declared default for field-absence resolution, if any.
    ///
    /// Only an outermost `Default` wrapper counts;
    /// [`StructSchema::default_field`] always places the wrapper outermost,
    /// and a default buried under another wrapper does not resolve absence.
    pub fn declared_default(&self) -> Option<&Value> {
        match self {
            SchemaNode::Default { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Declaration of one struct field.
#[derive(Clone)]
pub struct FieldDef {
    /// Shape of the field's value.
    pub schema: SchemaNode,
    /// Absent fields are simply omitted instead of reported missing.
    pub optional: bool,
    /// Excluded from serialization output.
    pub secret: bool,
}

/// An ordered field-descriptor list for a JSON object.
///
/// Field order is declaration order; the binder visits fields and the
/// serializer emits them in exactly this order.
///
/// # Example
///
/// ```rust
/// use intake::Schema;
/// use serde_json::json;
///
/// let user = Schema::object()
///     .field("name", Schema::string())
///     .optional_field("email", Schema::string())
///     .default_field("role", Schema::string(), json!("user"));
/// ```
#[derive(Clone, Default)]
pub struct StructSchema {
    fields: IndexMap<String, FieldDef>,
}

impl StructSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    pub fn field(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema,
                optional: false,
                secret: false,
            },
        );
        self
    }

    /// Declares a field that may be absent; absent fields are omitted from
    /// the bound value without error.
    pub fn optional_field(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema,
                optional: true,
                secret: false,
            },
        );
        self
    }

    /// Declares a field with a default substituted when the input omits it.
    /// The default is substituted as-is, without binding it.
    pub fn default_field(
        mut self,
        name: impl Into<String>,
        schema: SchemaNode,
        default: Value,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: SchemaNode::Default {
                    inner: Box::new(schema),
                    value: default,
                },
                optional: false,
                secret: false,
            },
        );
        self
    }

    /// Declares a required field that never appears in serialized output.
    pub fn secret_field(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema,
                optional: false,
                secret: true,
            },
        );
        self
    }

    /// Iterates over declarations in order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldDef)> {
        self.fields.iter()
    }

    /// Looks up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finishes the builder into a schema node.
    pub fn into_node(self) -> SchemaNode {
        SchemaNode::Struct(self)
    }
}

impl From<StructSchema> for SchemaNode {
    fn from(schema: StructSchema) -> Self {
        SchemaNode::Struct(schema)
    }
}

// Schemas are built once and shared across binds, possibly across threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaNode>();
    assert_sync::<SchemaNode>();
};
