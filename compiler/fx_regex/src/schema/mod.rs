//! Result schema synthesis.
//!
//! Turns the captures of a valid pattern into the static type of a match
//! result. Captures come first, in pattern order, followed by the reserved
//! fields every match carries. A capture whose name collides with a
//! reserved field keeps its place and hides the reserved field; the
//! collision is reported as a suggestion.

use fx_types::{DType, Field, TypeError};

use crate::tracker::Captures;
use crate::ResultShape;

/// The whole matched text.
pub const FULL_MATCH: &str = "FullMatch";
/// One-based offset of the match in the input.
pub const START_MATCH: &str = "StartMatch";
/// Positional captures, as a single-column table.
pub const SUB_MATCHES: &str = "SubMatches";
/// Column name of the [`SUB_MATCHES`] table.
pub const SUB_MATCH_VALUE: &str = "Value";

/// A synthesized result type.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Schema {
    pub ty: DType,
    /// Reserved field names hidden by a capture of the same name.
    pub hidden: Vec<String>,
}

pub(crate) fn synthesize(shape: ResultShape, captures: &Captures) -> Schema {
    if shape == ResultShape::Boolean {
        return Schema {
            ty: DType::Boolean,
            hidden: Vec::new(),
        };
    }

    let mut ty = match shape {
        ResultShape::Table => DType::empty_table(),
        _ => DType::empty_record(),
    };
    let named: &[String] = if captures.numbered { &[] } else { &captures.names };

    let mut reserved = vec![(FULL_MATCH, DType::Text)];
    if captures.numbered {
        let rows = DType::Table(vec![Field::new(SUB_MATCH_VALUE, DType::Text)]);
        reserved.push((SUB_MATCHES, rows));
    }
    reserved.push((START_MATCH, DType::Number));

    // Capture names are unique, so only a reserved field can collide.
    let mut hidden = Vec::new();
    let fields = named.iter().map(|name| (name.as_str(), DType::Text));
    for (name, field_ty) in fields.chain(reserved) {
        if let Err(TypeError::DuplicateField(name)) = ty.add(name, field_ty) {
            hidden.push(name);
        }
    }

    tracing::trace!(%ty, hidden = hidden.len(), "schema synthesized");
    Schema { ty, hidden }
}
