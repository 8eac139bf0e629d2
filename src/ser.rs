//! The serializer: mirrors the schema description to emit JSON text from a
//! bound value.
//!
//! Struct fields are written in declaration order, validated wrappers are
//! invisible in output, and fields declared secret are omitted entirely.
//! Compact mode emits no extraneous whitespace; pretty mode uses newlines
//! and 2-space indents for objects and comma-space separation inside arrays.

use std::fmt::Write as _;

use serde_json::Value;

use crate::schema::{PrimitiveKind, SchemaNode};

/// Serializes a bound value compactly.
///
/// # Example
///
/// ```rust
/// use intake::{ser, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string())
///     .field("age", Schema::integer())
///     .into_node();
///
/// let text = ser::to_string(&schema, &json!({"name": "Alice", "age": 25}));
/// assert_eq!(text, r#"{"name":"Alice","age":25}"#);
/// ```
pub fn to_string(schema: &SchemaNode, value: &Value) -> String {
    let mut out = String::new();
    write(schema, value, &mut out, 0, false);
    out
}

/// Serializes a bound value with newlines and 2-space indentation.
pub fn to_string_pretty(schema: &SchemaNode, value: &Value) -> String {
    let mut out = String::new();
    write(schema, value, &mut out, 0, true);
    out
}

/// Writes `value` as JSON text guided by `schema` into `buffer`. `depth` is
/// the current object nesting level, used only for pretty indentation.
pub fn write(schema: &SchemaNode, value: &Value, buffer: &mut String, depth: usize, pretty: bool) {
    match schema {
        SchemaNode::Optional(inner) => {
            if value.is_null() {
                buffer.push_str("null");
            } else {
                write(inner, value, buffer, depth, pretty);
            }
        }
        SchemaNode::Primitive(kind) => write_primitive(*kind, value, buffer),
        SchemaNode::ValidatedScalar(contract) => write_primitive(contract.carrier, value, buffer),
        SchemaNode::Sequence(element)
        | SchemaNode::ValidatedCollection { element, .. } => {
            write_elements(element, value, buffer, depth, pretty)
        }
        SchemaNode::Default { inner, .. } | SchemaNode::Predicate { inner, .. } => {
            write(inner, value, buffer, depth, pretty)
        }
        SchemaNode::Struct(spec) => {
            let obj = match value.as_object() {
                Some(o) => o,
                None => {
                    buffer.push_str("null");
                    return;
                }
            };

            // Declared, non-secret fields actually present in the bound map.
            let present: Vec<_> = spec
                .fields()
                .filter(|(_, def)| !def.secret)
                .filter_map(|(name, def)| obj.get(name.as_str()).map(|v| (name, def, v)))
                .collect();

            if present.is_empty() {
                buffer.push_str("{}");
                return;
            }

            buffer.push('{');
            for (i, (name, def, field_value)) in present.into_iter().enumerate() {
                if i > 0 {
                    buffer.push(',');
                }
                if pretty {
                    buffer.push('\n');
                    push_indent(buffer, depth + 1);
                }
                buffer.push('"');
                escape_json_into(name, buffer);
                buffer.push('"');
                buffer.push(':');
                if pretty {
                    buffer.push(' ');
                }
                write(&def.schema, field_value, buffer, depth + 1, pretty);
            }
            if pretty {
                buffer.push('\n');
                push_indent(buffer, depth);
            }
            buffer.push('}');
        }
    }
}

fn write_elements(
    element: &SchemaNode,
    value: &Value,
    buffer: &mut String,
    depth: usize,
    pretty: bool,
) {
    let arr = match value.as_array() {
        Some(a) => a,
        None => {
            buffer.push_str("null");
            return;
        }
    };
    buffer.push('[');
    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            buffer.push(',');
            if pretty {
                buffer.push(' ');
            }
        }
        write(element, item, buffer, depth, pretty);
    }
    buffer.push(']');
}

fn write_primitive(kind: PrimitiveKind, value: &Value, buffer: &mut String) {
    match kind {
        PrimitiveKind::Bool => match value.as_bool() {
            Some(true) => buffer.push_str("true"),
            Some(false) => buffer.push_str("false"),
            None => buffer.push_str("null"),
        },
        PrimitiveKind::Integer => {
            if let Some(n) = value.as_i64() {
                let _ = write!(buffer, "{}", n);
            } else {
                buffer.push_str("null");
            }
        }
        PrimitiveKind::Float => match value {
            // Number's own rendering keeps float-ness: 2.0 stays "2.0",
            // so the text re-binds as a float rather than an integer.
            Value::Number(n) => {
                let _ = write!(buffer, "{}", n);
            }
            _ => buffer.push_str("null"),
        },
        PrimitiveKind::String => match value.as_str() {
            Some(s) => {
                buffer.push('"');
                escape_json_into(s, buffer);
                buffer.push('"');
            }
            None => buffer.push_str("null"),
        },
    }
}

fn push_indent(buffer: &mut String, depth: usize) {
    for _ in 0..depth {
        buffer.push_str("  ");
    }
}

/// Escapes `s` for embedding inside a JSON string literal: quote, backslash,
/// newline, carriage return and tab get short escapes, remaining control
/// bytes become `\u00XX`.
pub(crate) fn escape_json_into(s: &str, buffer: &mut String) {
    for c in s.chars() {
        match c {
            '"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str("\\\\"),
            '\n' => buffer.push_str("\\n"),
            '\r' => buffer.push_str("\\r"),
            '\t' => buffer.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(buffer, "\\u{:04x}", c as u32);
            }
            c => buffer.push(c),
        }
    }
}
