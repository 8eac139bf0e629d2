//! The validated-type contract.
//!
//! A validated type pairs a raw carrier value with proof it satisfies a
//! declared constraint. The crate does not ship the full catalog of such
//! types; it specifies the contract they plug in through ([`ScalarContract`],
//! [`CollectionContract`]) plus a few reference contracts used throughout
//! the tests.

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::ErrorKind;

use super::node::PrimitiveKind;

/// Fallible constructor from a raw carrier value to the wrapped value.
pub type ScalarCtor = Arc<dyn Fn(&Value) -> Result<Value, ErrorKind> + Send + Sync>;

/// Fallible constructor over an already-bound element sequence.
pub type CollectionCtor = Arc<dyn Fn(Vec<Value>) -> Result<Value, ErrorKind> + Send + Sync>;

/// Declared bounds metadata, used only to synthesize human-readable
/// messages when a constructor rejects a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Inclusive numeric minimum.
    pub min_value: Option<i64>,
    /// Inclusive numeric maximum.
    pub max_value: Option<i64>,
    /// Minimum length in `length_unit`s.
    pub min_length: Option<usize>,
    /// Maximum length in `length_unit`s.
    pub max_length: Option<usize>,
    length_unit: &'static str,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            length_unit: "characters",
        }
    }
}

impl Bounds {
    /// Bounds on a numeric value.
    pub fn value(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min_value: min,
            max_value: max,
            ..Self::default()
        }
    }

    /// Bounds on a string length, counted in characters.
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_length: min,
            max_length: max,
            ..Self::default()
        }
    }

    /// Bounds on a collection length, counted in items.
    pub fn items(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_length: min,
            max_length: max,
            length_unit: "items",
            ..Self::default()
        }
    }

    /// Synthesizes a message for `kind` from the declared bounds, or `None`
    /// when the relevant bound is not declared.
    pub fn message_for(&self, kind: ErrorKind) -> Option<String> {
        match kind {
            ErrorKind::TooSmall => self.min_value.map(|n| format!("must be at least {}", n)),
            ErrorKind::TooLarge => self.max_value.map(|n| format!("must be at most {}", n)),
            ErrorKind::TooShort => self
                .min_length
                .map(|n| format!("must be at least {} {}", n, self.length_unit)),
            ErrorKind::TooLong => self
                .max_length
                .map(|n| format!("must be at most {} {}", n, self.length_unit)),
            _ => None,
        }
    }
}

/// Contract for a validated scalar type.
///
/// The binder first binds the raw carrier (per the declared
/// [`PrimitiveKind`]), then hands the raw value to `construct`. A rejected
/// value is reported with a message synthesized from `bounds` when the
/// relevant bound is declared.
#[derive(Clone)]
pub struct ScalarContract {
    /// The JSON-compatible carrier the constructor expects.
    pub carrier: PrimitiveKind,
    ctor: ScalarCtor,
    /// Declared bounds, used only for message generation.
    pub bounds: Option<Bounds>,
}

impl ScalarContract {
    pub fn new<F>(carrier: PrimitiveKind, ctor: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ErrorKind> + Send + Sync + 'static,
    {
        Self {
            carrier,
            ctor: Arc::new(ctor),
            bounds: None,
        }
    }

    /// Declares bounds metadata for message synthesis.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Runs the fallible constructor over a bound carrier value.
    pub fn construct(&self, raw: &Value) -> Result<Value, ErrorKind> {
        (self.ctor)(raw)
    }
}

/// Contract for a validated collection type.
///
/// The element schema is bound first; the constructor only ever sees a
/// fully validated element sequence.
#[derive(Clone)]
pub struct CollectionContract {
    ctor: CollectionCtor,
    /// Declared bounds, used only for message generation.
    pub bounds: Option<Bounds>,
}

impl CollectionContract {
    pub fn new<F>(ctor: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, ErrorKind> + Send + Sync + 'static,
    {
        Self {
            ctor: Arc::new(ctor),
            bounds: None,
        }
    }

    /// Declares bounds metadata for message synthesis.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Runs the fallible constructor over bound elements.
    pub fn construct(&self, elements: Vec<Value>) -> Result<Value, ErrorKind> {
        (self.ctor)(elements)
    }
}

/// A string whose character count must fall within `min..=max`.
pub fn bounded_string(min: usize, max: usize) -> ScalarContract {
    ScalarContract::new(PrimitiveKind::String, move |raw| {
        let s = raw.as_str().ok_or(ErrorKind::TypeMismatch)?;
        let len = s.chars().count();
        if len < min {
            Err(ErrorKind::TooShort)
        } else if len > max {
            Err(ErrorKind::TooLong)
        } else {
            Ok(raw.clone())
        }
    })
    .with_bounds(Bounds::length(Some(min), Some(max)))
}

/// An integer that must fall within `min..=max`.
pub fn ranged_integer(min: i64, max: i64) -> ScalarContract {
    ScalarContract::new(PrimitiveKind::Integer, move |raw| {
        let n = raw.as_i64().ok_or(ErrorKind::TypeMismatch)?;
        if n < min {
            Err(ErrorKind::TooSmall)
        } else if n > max {
            Err(ErrorKind::TooLarge)
        } else {
            Ok(raw.clone())
        }
    })
    .with_bounds(Bounds::value(Some(min), Some(max)))
}

/// A string that must match `pattern`. Fails at schema-build time when the
/// pattern itself does not compile.
pub fn pattern_string(pattern: &str) -> Result<ScalarContract, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(ScalarContract::new(PrimitiveKind::String, move |raw| {
        let s = raw.as_str().ok_or(ErrorKind::TypeMismatch)?;
        if regex.is_match(s) {
            Ok(raw.clone())
        } else {
            Err(ErrorKind::InvalidFormat)
        }
    }))
}

/// A collection that must contain at least one element.
pub fn non_empty_list() -> CollectionContract {
    CollectionContract::new(|elements| {
        if elements.is_empty() {
            Err(ErrorKind::TooShort)
        } else {
            Ok(Value::Array(elements))
        }
    })
    .with_bounds(Bounds::items(Some(1), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bounded_string_accepts_in_range() {
        let contract = bounded_string(3, 5);
        assert_eq!(contract.construct(&json!("abcd")).unwrap(), json!("abcd"));
    }

    #[test]
    fn test_bounded_string_rejects_short_and_long() {
        let contract = bounded_string(3, 5);
        assert_eq!(contract.construct(&json!("ab")), Err(ErrorKind::TooShort));
        assert_eq!(
            contract.construct(&json!("abcdef")),
            Err(ErrorKind::TooLong)
        );
    }

    #[test]
    fn test_bounded_string_counts_characters_not_bytes() {
        let contract = bounded_string(3, 3);
        assert!(contract.construct(&json!("日本語")).is_ok());
    }

    #[test]
    fn test_ranged_integer() {
        let contract = ranged_integer(18, 120);
        assert!(contract.construct(&json!(30)).is_ok());
        assert_eq!(contract.construct(&json!(15)), Err(ErrorKind::TooSmall));
        assert_eq!(contract.construct(&json!(200)), Err(ErrorKind::TooLarge));
    }

    #[test]
    fn test_pattern_string() {
        let contract = pattern_string(r"^\d{5}$").unwrap();
        assert!(contract.construct(&json!("12345")).is_ok());
        assert_eq!(
            contract.construct(&json!("1234")),
            Err(ErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn test_pattern_string_rejects_bad_regex() {
        assert!(pattern_string(r"[unclosed").is_err());
    }

    #[test]
    fn test_non_empty_list() {
        let contract = non_empty_list();
        assert_eq!(
            contract.construct(vec![json!(1)]).unwrap(),
            json!([1])
        );
        assert_eq!(contract.construct(vec![]), Err(ErrorKind::TooShort));
    }

    #[test]
    fn test_bounds_message_synthesis() {
        let bounds = Bounds::length(Some(3), Some(50));
        assert_eq!(
            bounds.message_for(ErrorKind::TooShort).unwrap(),
            "must be at least 3 characters"
        );
        assert_eq!(
            bounds.message_for(ErrorKind::TooLong).unwrap(),
            "must be at most 50 characters"
        );

        let bounds = Bounds::value(Some(18), Some(120));
        assert_eq!(
            bounds.message_for(ErrorKind::TooSmall).unwrap(),
            "must be at least 18"
        );
        assert_eq!(
            bounds.message_for(ErrorKind::TooLarge).unwrap(),
            "must be at most 120"
        );

        let bounds = Bounds::items(Some(1), None);
        assert_eq!(
            bounds.message_for(ErrorKind::TooShort).unwrap(),
            "must be at least 1 items"
        );
        // No max declared, so no message for the opposite direction.
        assert_eq!(bounds.message_for(ErrorKind::TooLong), None);
    }

    #[test]
    fn test_bounds_no_message_for_unrelated_kind() {
        let bounds = Bounds::length(Some(3), None);
        assert_eq!(bounds.message_for(ErrorKind::TypeMismatch), None);
    }
}
