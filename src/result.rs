//! The lifecycle container pairing a bound value with its diagnostics.

use serde_json::Value;

use crate::error::{BindError, ErrorAccumulator};

/// The outcome of one bind: an optional bound value plus the accumulator
/// that collected every defect found along the way.
///
/// Invariant: the value is present **iff** the accumulator is empty. A bind
/// that recorded anything yields diagnostics only, never a partial value.
///
/// The result owns both halves. Diagnostic strings and the bound value share
/// one ownership scope and are freed together by [`release`](Self::release)
/// (or plain drop); the accumulator is frozen here — only shared references
/// escape.
///
/// # Example
///
/// ```rust
/// use intake::{Binder, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object().field("name", Schema::string()).into_node();
/// let result = Binder::new().bind(&schema, &json!({"name": "Alice"}));
///
/// assert!(result.is_valid());
/// let value = result.into_value().unwrap();
/// assert_eq!(value, json!({"name": "Alice"}));
/// ```
#[derive(Debug)]
pub struct BoundResult {
    value: Option<Value>,
    errors: ErrorAccumulator,
}

impl BoundResult {
    pub(crate) fn new(value: Option<Value>, errors: ErrorAccumulator) -> Self {
        Self { value, errors }
    }

    /// True when the bind produced a value and recorded no defects.
    /// Stable across repeated calls.
    pub fn is_valid(&self) -> bool {
        self.value.is_some() && !self.errors.has_errors()
    }

    /// The bound value, when the bind succeeded.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The frozen diagnostics of this bind, in discovery order.
    pub fn errors(&self) -> &ErrorAccumulator {
        &self.errors
    }

    /// Consumes the result, returning the bound value or a
    /// validation-failed error carrying the diagnostic count.
    pub fn into_value(self) -> Result<Value, BindError> {
        match self.value {
            Some(v) => Ok(v),
            None => Err(BindError::ValidationFailed {
                count: self.errors.count(),
            }),
        }
    }

    /// Splits the result into its value and accumulator.
    pub fn into_parts(self) -> (Option<Value>, ErrorAccumulator) {
        (self.value, self.errors)
    }

    /// Releases the bound value and every diagnostic string in one bulk
    /// operation. Consuming `self` makes a second release unrepresentable.
    pub fn release(self) {
        drop(self);
    }
}
