//! Single-diagnostic types: [`ErrorKind`], [`ErrorEntry`] and the hard
//! failure enum [`BindError`].

use std::fmt::{self, Display};

use thiserror::Error;

use crate::path::FieldPath;

/// Classification of a binding defect.
///
/// Structural kinds (`TypeMismatch`, `InvalidObject`, `MissingField`,
/// `InvalidSchema`) describe shape problems that abort only the affected
/// subtree. The remaining kinds describe correctly shaped values that fail
/// a declared constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value node has the wrong JSON type for the schema.
    TypeMismatch,
    /// An object was required but something else was found.
    InvalidObject,
    /// A required field is absent from its enclosing object.
    MissingField,
    /// Numeric value below the declared minimum.
    TooSmall,
    /// Numeric value above the declared maximum, or integer overflow.
    TooLarge,
    /// String or collection shorter than the declared minimum length.
    TooShort,
    /// String or collection longer than the declared maximum length.
    TooLong,
    /// Value is well-typed but malformed for its format (email, UUID, ...).
    InvalidFormat,
    /// A custom predicate returned false.
    CustomValidationFailed,
    /// The schema itself is malformed; an authoring defect, not a data defect.
    InvalidSchema,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::InvalidObject => "invalid_object",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::TooSmall => "too_small",
            ErrorKind::TooLarge => "too_large",
            ErrorKind::TooShort => "too_short",
            ErrorKind::TooLong => "too_long",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::CustomValidationFailed => "custom_validation_failed",
            ErrorKind::InvalidSchema => "invalid_schema",
        }
    }

    /// Fallback message used when no bounds metadata is available.
    pub fn generic_message(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "value has the wrong type",
            ErrorKind::InvalidObject => "expected an object",
            ErrorKind::MissingField => "required field is missing",
            ErrorKind::TooSmall => "value is too small",
            ErrorKind::TooLarge => "value is too large",
            ErrorKind::TooShort => "value is too short",
            ErrorKind::TooLong => "value is too long",
            ErrorKind::InvalidFormat => "value has an invalid format",
            ErrorKind::CustomValidationFailed => "value failed custom validation",
            ErrorKind::InvalidSchema => "schema is malformed",
        }
    }

    /// True for kinds describing malformed shape rather than a failed
    /// constraint on a well-shaped value.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ErrorKind::TypeMismatch
                | ErrorKind::InvalidObject
                | ErrorKind::MissingField
                | ErrorKind::InvalidSchema
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One recorded defect: where it happened, what went wrong, and the raw
/// value that caused it.
///
/// Entries are immutable once added to an accumulator. The `code` overrides
/// the kind's stable code when a contract supplies a more specific one.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEntry {
    /// Location of the offending value.
    pub path: FieldPath,
    /// Classification of the defect.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Optional override of the kind's machine code.
    pub code: Option<String>,
    /// The raw offending value, rendered as text.
    pub raw_value: Option<String>,
}

impl ErrorEntry {
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            code: None,
            raw_value: None,
        }
    }

    /// Sets a specific machine code, overriding the kind's default.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches the raw offending value as diagnostic context.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw_value = Some(raw.into());
        self
    }

    /// The effective machine code: the override if set, else the kind's.
    pub fn effective_code(&self) -> &str {
        self.code.as_deref().unwrap_or_else(|| self.kind.code())
    }
}

impl Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        write!(f, "{}: {}", path, self.message)?;
        if let Some(ref raw) = self.raw_value {
            write!(f, " (got: {})", raw)?;
        }
        Ok(())
    }
}

/// Hard failures that escape the binder as `Err`.
///
/// User-input defects never take this form; they are always recorded as
/// [`ErrorEntry`] values. `BindError` covers only the cases where no
/// per-field diagnostic is meaningful.
#[derive(Debug, Error)]
pub enum BindError {
    /// `unwrap` was called on a result that carries no value.
    #[error("validation failed with {count} error(s)")]
    ValidationFailed {
        /// Number of diagnostics recorded by the failed bind.
        count: usize,
    },
}

// ErrorEntry travels across threads inside BoundResult; keep it that way.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorEntry>();
    assert_sync::<ErrorEntry>();
};
