//! Field paths for error attribution.
//!
//! A [`FieldPath`] names the location of a value inside a nested document,
//! rendered in the dotted/bracketed form users expect in diagnostics
//! (e.g. `address.zip`, `users[0].email`).

use std::fmt::{self, Display};

/// One step of a field path: either an object member or an array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member access by name.
    Field(String),
    /// Array element access by index.
    Index(usize),
}

/// A path to a value in a nested document.
///
/// Paths are built incrementally during binding; every `push_*` call returns
/// a new path and leaves the original untouched, so sibling subtrees can
/// extend the same parent independently.
///
/// # Example
///
/// ```rust
/// use intake::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path identifying the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path consisting of a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True for the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
