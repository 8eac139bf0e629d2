//! Ordered, optionally capped collection of binding diagnostics.

use crate::error::{ErrorEntry, ErrorKind};
use crate::path::FieldPath;
use crate::ser::escape_json_into;

/// Accumulates every defect found during one bind, in discovery order.
///
/// An accumulator is created empty at the start of a bind, appended to while
/// the bind runs, and frozen afterwards (the owning [`BoundResult`] hands out
/// only shared references). An optional cap bounds memory on pathological
/// inputs: once the cap is reached further entries are silently dropped.
///
/// [`BoundResult`]: crate::BoundResult
///
/// # Example
///
/// ```rust
/// use intake::{ErrorAccumulator, ErrorKind, FieldPath};
///
/// let mut errors = ErrorAccumulator::new();
/// errors.add(
///     FieldPath::from_field("age"),
///     ErrorKind::TooSmall,
///     "must be at least 18",
///     Some("15".to_string()),
/// );
///
/// assert!(errors.has_errors());
/// assert_eq!(errors.format_all(), "age: must be at least 18 (got: 15)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator {
    entries: Vec<ErrorEntry>,
    max_entries: Option<usize>,
}

impl ErrorAccumulator {
    /// Creates an empty, uncapped accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty accumulator that records at most `max_entries`
    /// diagnostics; entries beyond the cap are silently dropped. A cap of
    /// zero is treated as one: the first defect must always record, or a
    /// failed bind would carry no explanation at all.
    pub fn with_cap(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: Some(max_entries.max(1)),
        }
    }

    /// Records a prebuilt entry, subject to the cap.
    pub fn add_entry(&mut self, entry: ErrorEntry) {
        if let Some(cap) = self.max_entries {
            if self.entries.len() >= cap {
                return;
            }
        }
        self.entries.push(entry);
    }

    /// Records a defect at `path`.
    pub fn add(
        &mut self,
        path: FieldPath,
        kind: ErrorKind,
        message: impl Into<String>,
        raw_value: Option<String>,
    ) {
        let mut entry = ErrorEntry::new(path, kind, message);
        entry.raw_value = raw_value;
        self.add_entry(entry);
    }

    /// Records a defect with an explicit machine code overriding the kind's.
    pub fn add_with_code(
        &mut self,
        path: FieldPath,
        kind: ErrorKind,
        message: impl Into<String>,
        raw_value: Option<String>,
        code: impl Into<String>,
    ) {
        let mut entry = ErrorEntry::new(path, kind, message).with_code(code);
        entry.raw_value = raw_value;
        self.add_entry(entry);
    }

    /// Records a defect at `parent.field` (bare `field` when the parent is
    /// the root).
    pub fn add_nested(
        &mut self,
        parent: &FieldPath,
        field: &str,
        kind: ErrorKind,
        message: impl Into<String>,
        raw_value: Option<String>,
    ) {
        self.add(parent.push_field(field), kind, message, raw_value);
    }

    /// Records a defect at `field[index]`.
    pub fn add_indexed(
        &mut self,
        field: &str,
        index: usize,
        kind: ErrorKind,
        message: impl Into<String>,
        raw_value: Option<String>,
    ) {
        self.add(
            FieldPath::from_field(field).push_index(index),
            kind,
            message,
            raw_value,
        );
    }

    /// Re-adds every entry of `other`, subject to this accumulator's own cap.
    pub fn merge(&mut self, other: &ErrorAccumulator) {
        for entry in &other.entries {
            self.add_entry(entry.clone());
        }
    }

    /// Removes all recorded entries. The cap is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True when at least one defect has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of recorded entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// The earliest recorded entry, if any.
    pub fn first(&self) -> Option<&ErrorEntry> {
        self.entries.first()
    }

    /// The latest recorded entry, if any.
    pub fn last(&self) -> Option<&ErrorEntry> {
        self.entries.last()
    }

    /// True when some entry's path renders to `path`.
    pub fn contains_field(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path.to_string() == path)
    }

    /// True when some entry has the given kind.
    pub fn contains_kind(&self, kind: ErrorKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Iterates over the recorded entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    /// One line per entry: `path: message (got: raw)`, the got-segment
    /// omitted when no raw value was attached.
    pub fn format_all(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&entry.to_string());
        }
        out
    }

    /// Renders the entries as a JSON array of field-error objects:
    /// `{"field":...,"message":...,"code"?:...,"value"?:...}`. Keys for
    /// absent code/value are omitted; insertion order is preserved and there
    /// is no trailing comma.
    pub fn to_json_array(&self) -> String {
        let mut out = String::from("[");
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str("{\"field\":\"");
            escape_json_into(&entry.path.to_string(), &mut out);
            out.push_str("\",\"message\":\"");
            escape_json_into(&entry.message, &mut out);
            out.push('"');
            if let Some(ref code) = entry.code {
                out.push_str(",\"code\":\"");
                escape_json_into(code, &mut out);
                out.push('"');
            }
            if let Some(ref raw) = entry.raw_value {
                out.push_str(",\"value\":\"");
                escape_json_into(raw, &mut out);
                out.push('"');
            }
            out.push('}');
        }
        out.push(']');
        out
    }
}

impl<'a> IntoIterator for &'a ErrorAccumulator {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(field: &str, kind: ErrorKind) -> ErrorEntry {
        ErrorEntry::new(FieldPath::from_field(field), kind, "bad")
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = ErrorAccumulator::new();
        assert!(!acc.has_errors());
        assert_eq!(acc.count(), 0);
        assert!(acc.first().is_none());
        assert!(acc.last().is_none());
        assert_eq!(acc.format_all(), "");
        assert_eq!(acc.to_json_array(), "[]");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut acc = ErrorAccumulator::new();
        acc.add_entry(sample("z", ErrorKind::TooShort));
        acc.add_entry(sample("a", ErrorKind::TooSmall));
        acc.add_entry(sample("m", ErrorKind::TooLarge));

        let paths: Vec<_> = acc.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["z", "a", "m"]);
        assert_eq!(acc.first().unwrap().path.to_string(), "z");
        assert_eq!(acc.last().unwrap().path.to_string(), "m");
    }

    #[test]
    fn test_cap_drops_excess_silently() {
        let mut acc = ErrorAccumulator::with_cap(2);
        acc.add_entry(sample("a", ErrorKind::TooShort));
        acc.add_entry(sample("b", ErrorKind::TooShort));
        acc.add_entry(sample("c", ErrorKind::TooShort));

        assert_eq!(acc.count(), 2);
        assert!(acc.contains_field("a"));
        assert!(acc.contains_field("b"));
        assert!(!acc.contains_field("c"));
    }

    #[test]
    fn test_zero_cap_clamps_to_one() {
        let mut acc = ErrorAccumulator::with_cap(0);
        acc.add_entry(sample("a", ErrorKind::TooShort));
        acc.add_entry(sample("b", ErrorKind::TooShort));

        assert!(acc.has_errors());
        assert_eq!(acc.count(), 1);
        assert!(acc.contains_field("a"));
    }

    #[test]
    fn test_merge_respects_receiver_cap() {
        let mut donor = ErrorAccumulator::new();
        donor.add_entry(sample("x", ErrorKind::TooShort));
        donor.add_entry(sample("y", ErrorKind::TooShort));
        donor.add_entry(sample("z", ErrorKind::TooShort));

        let mut acc = ErrorAccumulator::with_cap(2);
        acc.merge(&donor);
        assert_eq!(acc.count(), 2);
        assert!(acc.contains_field("x"));
        assert!(!acc.contains_field("z"));
    }

    #[test]
    fn test_add_nested_joins_with_dot() {
        let mut acc = ErrorAccumulator::new();
        let parent = FieldPath::from_field("address");
        acc.add_nested(&parent, "zip", ErrorKind::TooShort, "too short", None);
        assert!(acc.contains_field("address.zip"));

        acc.add_nested(&FieldPath::root(), "name", ErrorKind::TooShort, "too short", None);
        assert!(acc.contains_field("name"));
    }

    #[test]
    fn test_add_indexed_formats_brackets() {
        let mut acc = ErrorAccumulator::new();
        acc.add_indexed("tags", 3, ErrorKind::TypeMismatch, "expected string", None);
        assert!(acc.contains_field("tags[3]"));
    }

    #[test]
    fn test_contains_kind() {
        let mut acc = ErrorAccumulator::new();
        acc.add_entry(sample("a", ErrorKind::TooShort));
        assert!(acc.contains_kind(ErrorKind::TooShort));
        assert!(!acc.contains_kind(ErrorKind::MissingField));
    }

    #[test]
    fn test_clear() {
        let mut acc = ErrorAccumulator::with_cap(5);
        acc.add_entry(sample("a", ErrorKind::TooShort));
        acc.clear();
        assert!(!acc.has_errors());
        // Cap survives a clear.
        for f in ["a", "b", "c", "d", "e", "f"] {
            acc.add_entry(sample(f, ErrorKind::TooShort));
        }
        assert_eq!(acc.count(), 5);
    }

    #[test]
    fn test_format_all_lines() {
        let mut acc = ErrorAccumulator::new();
        acc.add(
            FieldPath::from_field("name"),
            ErrorKind::TooShort,
            "must be at least 3 characters",
            Some("Jo".to_string()),
        );
        acc.add(
            FieldPath::from_field("age"),
            ErrorKind::TooSmall,
            "must be at least 18",
            None,
        );

        let formatted = acc.format_all();
        let lines: Vec<_> = formatted.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "name: must be at least 3 characters (got: Jo)");
        assert_eq!(lines[1], "age: must be at least 18");
    }

    #[test]
    fn test_to_json_array_shape() {
        let mut acc = ErrorAccumulator::new();
        acc.add_with_code(
            FieldPath::from_field("email"),
            ErrorKind::InvalidFormat,
            "bad email",
            Some("nope".to_string()),
            "invalid_email",
        );
        acc.add(FieldPath::from_field("age"), ErrorKind::TooSmall, "too small", None);

        assert_eq!(
            acc.to_json_array(),
            "[{\"field\":\"email\",\"message\":\"bad email\",\"code\":\"invalid_email\",\"value\":\"nope\"},{\"field\":\"age\",\"message\":\"too small\"}]"
        );
    }

    #[test]
    fn test_to_json_array_escapes() {
        let mut acc = ErrorAccumulator::new();
        acc.add(
            FieldPath::from_field("note"),
            ErrorKind::InvalidFormat,
            "contains \"quotes\"\nand newline",
            None,
        );
        assert_eq!(
            acc.to_json_array(),
            "[{\"field\":\"note\",\"message\":\"contains \\\"quotes\\\"\\nand newline\"}]"
        );
    }
}
