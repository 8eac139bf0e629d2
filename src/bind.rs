//! The binder: a recursive, type-directed walk of a schema against a parsed
//! JSON value tree.
//!
//! Binding never stops at the first defect. A failed subtree yields no value
//! for that subtree only; sibling subtrees are still visited, so one call
//! surfaces the maximum number of independent defects. All diagnostics land
//! in a single bind-scoped [`ErrorAccumulator`] in discovery order.

use serde_json::{Map, Value};

use crate::error::{ErrorAccumulator, ErrorKind};
use crate::path::FieldPath;
use crate::result::BoundResult;
use crate::schema::{PrimitiveKind, SchemaNode, StructSchema};

/// Binds schema descriptions to value trees.
///
/// A binder is cheap, stateless between calls, and reusable; an optional
/// error cap bounds diagnostic memory on pathological inputs.
///
/// # Example
///
/// ```rust
/// use intake::{Binder, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string())
///     .field("age", Schema::integer())
///     .into_node();
///
/// let result = Binder::new().bind(&schema, &json!({"name": "Alice", "age": 30}));
/// assert!(result.is_valid());
///
/// let result = Binder::new().bind(&schema, &json!({"age": true}));
/// assert_eq!(result.errors().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    max_errors: Option<usize>,
}

impl Binder {
    /// A binder with no cap on recorded diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder recording at most `max_errors` diagnostics per bind;
    /// further defects are found but silently dropped. A cap of zero is
    /// treated as one, so a failed bind always explains itself.
    pub fn with_max_errors(max_errors: usize) -> Self {
        Self {
            max_errors: Some(max_errors),
        }
    }

    /// Binds `value` against `schema`, accumulating every defect.
    ///
    /// The returned result carries a value **iff** no defect was recorded:
    /// a bind that found anything wrong yields diagnostics only.
    pub fn bind(&self, schema: &SchemaNode, value: &Value) -> BoundResult {
        let mut errors = match self.max_errors {
            Some(cap) => ErrorAccumulator::with_cap(cap),
            None => ErrorAccumulator::new(),
        };
        let bound = self.bind_node(schema, value, &FieldPath::root(), &mut errors);
        tracing::debug!(errors = errors.count(), "bind complete");

        // Partial subtree successes never escape a failed bind.
        let value = if errors.has_errors() { None } else { bound };
        BoundResult::new(value, errors)
    }

    fn bind_node(
        &self,
        schema: &SchemaNode,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) -> Option<Value> {
        match schema {
            SchemaNode::Primitive(kind) => self.bind_primitive(*kind, value, path, errors),
            SchemaNode::Optional(inner) => {
                if value.is_null() {
                    Some(Value::Null)
                } else {
                    self.bind_node(inner, value, path, errors)
                }
            }
            SchemaNode::Sequence(inner) => self
                .bind_elements(inner, value, path, errors)
                .map(Value::Array),
            SchemaNode::ValidatedScalar(contract) => {
                let raw = self.bind_primitive(contract.carrier, value, path, errors)?;
                match contract.construct(&raw) {
                    Ok(v) => Some(v),
                    Err(kind) => {
                        let message = contract
                            .bounds
                            .as_ref()
                            .and_then(|b| b.message_for(kind))
                            .unwrap_or_else(|| kind.generic_message().to_string());
                        errors.add(path.clone(), kind, message, Some(render_raw(value)));
                        None
                    }
                }
            }
            SchemaNode::ValidatedCollection { element, contract } => {
                let elements = self.bind_elements(element, value, path, errors)?;
                match contract.construct(elements) {
                    Ok(v) => Some(v),
                    Err(kind) => {
                        let message = contract
                            .bounds
                            .as_ref()
                            .and_then(|b| b.message_for(kind))
                            .unwrap_or_else(|| kind.generic_message().to_string());
                        errors.add(path.clone(), kind, message, Some(render_raw(value)));
                        None
                    }
                }
            }
            SchemaNode::Default { inner, .. } => {
                // Absence is resolved by the enclosing struct; reaching this
                // arm means the field is present and binds normally.
                if matches!(**inner, SchemaNode::Default { .. }) {
                    errors.add(
                        path.clone(),
                        ErrorKind::InvalidSchema,
                        "nested default wrappers are not supported",
                        None,
                    );
                    return None;
                }
                self.bind_node(inner, value, path, errors)
            }
            SchemaNode::Predicate { inner, check } => {
                let bound = self.bind_node(inner, value, path, errors)?;
                if check(&bound) {
                    Some(bound)
                } else {
                    errors.add(
                        path.clone(),
                        ErrorKind::CustomValidationFailed,
                        ErrorKind::CustomValidationFailed.generic_message(),
                        Some(render_raw(value)),
                    );
                    None
                }
            }
            SchemaNode::Struct(spec) => self.bind_struct(spec, value, path, errors),
        }
    }

    fn bind_primitive(
        &self,
        kind: PrimitiveKind,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) -> Option<Value> {
        match kind {
            PrimitiveKind::Bool => match value.as_bool() {
                Some(b) => Some(Value::Bool(b)),
                None => {
                    self.mismatch(kind, value, path, errors);
                    None
                }
            },
            PrimitiveKind::Integer => {
                if let Some(n) = value.as_i64() {
                    Some(Value::from(n))
                } else if value.as_u64().is_some() {
                    errors.add(
                        path.clone(),
                        ErrorKind::TooLarge,
                        "integer overflows the supported range",
                        Some(render_raw(value)),
                    );
                    None
                } else {
                    self.mismatch(kind, value, path, errors);
                    None
                }
            }
            PrimitiveKind::Float => {
                if value.as_f64().is_some() {
                    Some(value.clone())
                } else {
                    self.mismatch(kind, value, path, errors);
                    None
                }
            }
            PrimitiveKind::String => match value.as_str() {
                Some(s) => Some(Value::from(s)),
                None => {
                    self.mismatch(kind, value, path, errors);
                    None
                }
            },
        }
    }

    fn mismatch(
        &self,
        expected: PrimitiveKind,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) {
        errors.add(
            path.clone(),
            ErrorKind::TypeMismatch,
            format!(
                "expected {}, found {}",
                expected.name(),
                value_type_name(value)
            ),
            Some(render_raw(value)),
        );
    }

    /// Binds every element of an array at `path[i]`, visiting all elements
    /// regardless of earlier failures. Returns `None` when the value is not
    /// an array or any element failed.
    fn bind_elements(
        &self,
        element: &SchemaNode,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) -> Option<Vec<Value>> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                errors.add(
                    path.clone(),
                    ErrorKind::TypeMismatch,
                    format!("expected array, found {}", value_type_name(value)),
                    Some(render_raw(value)),
                );
                return None;
            }
        };

        let mut bound = Vec::with_capacity(arr.len());
        let mut failed = false;
        for (index, item) in arr.iter().enumerate() {
            match self.bind_node(element, item, &path.push_index(index), errors) {
                Some(v) => bound.push(v),
                None => failed = true,
            }
        }
        if failed {
            None
        } else {
            Some(bound)
        }
    }

    fn bind_struct(
        &self,
        spec: &StructSchema,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorAccumulator,
    ) -> Option<Value> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                errors.add(
                    path.clone(),
                    ErrorKind::InvalidObject,
                    format!("expected object, found {}", value_type_name(value)),
                    Some(render_raw(value)),
                );
                return None;
            }
        };

        let mut bound = Map::new();
        let mut failed = false;

        // Every declared field is visited in declaration order; a failure
        // never aborts the remaining fields.
        for (name, def) in spec.fields() {
            let field_path = path.push_field(name);
            match obj.get(name.as_str()) {
                Some(field_value) => {
                    match self.bind_node(&def.schema, field_value, &field_path, errors) {
                        Some(v) => {
                            bound.insert(name.clone(), v);
                        }
                        None => failed = true,
                    }
                }
                None => {
                    if let Some(default) = def.schema.declared_default() {
                        // Declared defaults substitute verbatim, unparsed.
                        bound.insert(name.clone(), default.clone());
                    } else if def.optional {
                        // Omitted from the bound value, no error.
                    } else {
                        errors.add(
                            field_path,
                            ErrorKind::MissingField,
                            format!("required field '{}' is missing", name),
                            None,
                        );
                        failed = true;
                    }
                }
            }
        }

        if failed {
            None
        } else {
            Some(Value::Object(bound))
        }
    }
}

/// Renders a raw value for diagnostic context: strings bare, everything
/// else in compact JSON form.
fn render_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON type name for mismatch diagnostics.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
