//! # Intake
//!
//! Binds an already-parsed JSON value tree into a strongly validated, typed
//! value, collecting **every** constraint violation instead of failing on
//! the first one, and serializes bound values back to JSON text.
//!
//! ## Overview
//!
//! Application code that wants "parse and validate in one step" gets
//! field-path-addressed, human-readable diagnostics: one bind surfaces the
//! maximum number of independent defects, because a failed field never
//! aborts validation of its siblings.
//!
//! ## Core Types
//!
//! - [`Schema`]: builder API producing an explicit [`SchemaNode`] description
//! - [`Binder`]: the recursive type-directed traversal
//! - [`ErrorAccumulator`]: ordered, path-addressed, optionally capped diagnostics
//! - [`BoundResult`]: pairs the optional bound value with its frozen diagnostics
//! - [`ser`]: the mirrored serialization traversal (compact and pretty)
//!
//! ## Example
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
//! let result = Binder::new().bind(&schema, &json!({"name": "Jo", "age": 15}));
//! assert!(!result.is_valid());
//! assert_eq!(result.errors().count(), 2);
//! assert_eq!(
//!     result.errors().format_all(),
//!     "name: must be at least 3 characters (got: Jo)\n\
//!      age: must be at least 18 (got: 15)"
//! );
//! ```

pub mod bind;
pub mod error;
pub mod path;
pub mod result;
pub mod schema;
pub mod ser;
pub mod updater;

pub use bind::Binder;
pub use error::{BindError, ErrorAccumulator, ErrorEntry, ErrorKind};
pub use path::{FieldPath, PathSegment};
pub use result::BoundResult;
pub use schema::contract;
pub use schema::{
    Bounds, CollectionContract, FieldDef, PrimitiveKind, ScalarContract, Schema, SchemaNode,
    StructSchema,
};
pub use updater::UpdateNotifier;
