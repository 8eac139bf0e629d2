//! Diagnostic types for binding failures.
//!
//! Every user-input defect found during a bind becomes an [`ErrorEntry`]
//! inside an [`ErrorAccumulator`]; nothing short-circuits. The only hard
//! failure surface is [`BindError`].

mod accumulator;
mod entry;

pub use accumulator::ErrorAccumulator;
pub use entry::{BindError, ErrorEntry, ErrorKind};
