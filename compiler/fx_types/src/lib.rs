//! Structural types for formula values.
//!
//! Formula values are scalars (Boolean, Number, Text) or aggregates: a
//! record is an ordered set of named, typed fields and a table is a
//! sequence of records sharing one field set. Aggregates are compared
//! structurally, never by name.
//!
//! The algebra here is the subset the function library needs:
//! - building aggregates field by field (`add`, `drop`)
//! - supertype checks (`accepts`) and scalar coercion (`coerces_to`)
//! - merging branch types (`union`)

mod dtype;
mod error;

pub use dtype::{DKind, DType, Field};
pub use error::TypeError;
