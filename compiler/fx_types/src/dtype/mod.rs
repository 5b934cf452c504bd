//! The structural type representation.

use std::fmt;

use crate::TypeError;

/// Coarse classification of a [`DType`], for fast dispatch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DKind {
    Error,
    Unknown,
    Boolean,
    Number,
    Text,
    Record,
    Table,
}

/// A named field of a record or table type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub ty: DType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: DType) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A structural type.
///
/// Aggregates keep their fields in insertion order. Field names are unique
/// within one aggregate; `add` enforces this.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DType {
    /// Result of a failed check; accepted everywhere to avoid cascades.
    Error,
    /// Not yet known (e.g. an argument whose binding failed).
    Unknown,
    Boolean,
    Number,
    Text,
    Record(Vec<Field>),
    Table(Vec<Field>),
}

impl DType {
    /// A record with no fields.
    pub const fn empty_record() -> Self {
        DType::Record(Vec::new())
    }

    /// A table whose rows have no fields.
    pub const fn empty_table() -> Self {
        DType::Table(Vec::new())
    }

    pub fn kind(&self) -> DKind {
        match self {
            DType::Error => DKind::Error,
            DType::Unknown => DKind::Unknown,
            DType::Boolean => DKind::Boolean,
            DType::Number => DKind::Number,
            DType::Text => DKind::Text,
            DType::Record(_) => DKind::Record,
            DType::Table(_) => DKind::Table,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DType::Error)
    }

    /// Fields of an aggregate, in order. Scalars have none.
    pub fn fields(&self) -> &[Field] {
        match self {
            DType::Record(fields) | DType::Table(fields) => fields,
            _ => &[],
        }
    }

    /// Look up a field type by name.
    pub fn field(&self, name: &str) -> Option<&DType> {
        self.fields().iter().find(|f| f.name == name).map(|f| &f.ty)
    }

    fn fields_mut(&mut self) -> Result<&mut Vec<Field>, TypeError> {
        match self {
            DType::Record(fields) | DType::Table(fields) => Ok(fields),
            other => Err(TypeError::NotAggregate(other.to_string())),
        }
    }

    /// Append a field to this aggregate.
    ///
    /// On failure the type is left unchanged. Returns `self` so additions
    /// can be chained.
    pub fn add(&mut self, name: impl Into<String>, ty: DType) -> Result<&mut DType, TypeError> {
        let name = name.into();
        let fields = self.fields_mut()?;
        if fields.iter().any(|f| f.name == name) {
            return Err(TypeError::DuplicateField(name));
        }
        fields.push(Field { name, ty });
        Ok(self)
    }

    /// Remove the named field from this aggregate, returning it.
    pub fn drop(&mut self, name: &str) -> Result<Field, TypeError> {
        let fields = self.fields_mut()?;
        let Some(index) = fields.iter().position(|f| f.name == name) else {
            return Err(TypeError::FieldNotFound(name.to_string()));
        };
        Ok(fields.remove(index))
    }

    /// Supertype check: can a value of type `other` be used where `self`
    /// is expected, without conversion?
    ///
    /// An aggregate accepts another aggregate of the same kind that has at
    /// least its fields, each accepted field-wise. `Error` and `Unknown`
    /// are accepted by and accept everything.
    pub fn accepts(&self, other: &DType) -> bool {
        match (self, other) {
            (DType::Error | DType::Unknown, _) | (_, DType::Error | DType::Unknown) => true,
            (DType::Record(want), DType::Record(have)) | (DType::Table(want), DType::Table(have)) => {
                want.iter().all(|w| {
                    have.iter()
                        .find(|h| h.name == w.name)
                        .is_some_and(|h| w.ty.accepts(&h.ty))
                })
            }
            _ => self.kind() == other.kind(),
        }
    }

    /// Can `self` be converted to `target` implicitly?
    ///
    /// Numbers and Booleans coerce to Text; everything else must be
    /// accepted as-is.
    pub fn coerces_to(&self, target: &DType) -> bool {
        if target.accepts(self) {
            return true;
        }
        matches!(
            (self, target),
            (DType::Number | DType::Boolean, DType::Text)
        )
    }

    /// Least common supertype of two branch types.
    ///
    /// Aggregates of the same kind merge their field sets; a field present
    /// in both gets the union of its types. Mismatched kinds yield `Error`.
    #[must_use]
    pub fn union(&self, other: &DType) -> DType {
        match (self, other) {
            (DType::Error, _) | (_, DType::Error) => DType::Error,
            (DType::Unknown, t) | (t, DType::Unknown) => t.clone(),
            (DType::Record(a), DType::Record(b)) => DType::Record(union_fields(a, b)),
            (DType::Table(a), DType::Table(b)) => DType::Table(union_fields(a, b)),
            (a, b) if a.kind() == b.kind() => a.clone(),
            _ => DType::Error,
        }
    }
}

fn union_fields(a: &[Field], b: &[Field]) -> Vec<Field> {
    let mut merged: Vec<Field> = a
        .iter()
        .map(|f| match b.iter().find(|g| g.name == f.name) {
            Some(g) => Field {
                name: f.name.clone(),
                ty: f.ty.union(&g.ty),
            },
            None => f.clone(),
        })
        .collect();
    merged.extend(
        b.iter()
            .filter(|g| !a.iter().any(|f| f.name == g.name))
            .cloned(),
    );
    merged
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    write!(f, "[")?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}:{}", field.name, field.ty)?;
    }
    write!(f, "]")
}

/// Compact notation: `b`, `n`, `s`, `![Name:s]` for records, `*[Name:s]`
/// for tables, `e` for error and `?` for unknown.
impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Error => write!(f, "e"),
            DType::Unknown => write!(f, "?"),
            DType::Boolean => write!(f, "b"),
            DType::Number => write!(f, "n"),
            DType::Text => write!(f, "s"),
            DType::Record(fields) => {
                write!(f, "!")?;
                write_fields(f, fields)
            }
            DType::Table(fields) => {
                write!(f, "*")?;
                write_fields(f, fields)
            }
        }
    }
}

#[cfg(test)]
mod tests;
