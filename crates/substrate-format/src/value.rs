//! Decoded value tree.
//!
//! Every record in a save file decodes into a [`Record`]: an ordered list of
//! [`Field`]s whose values are scalars, flags, unlabelled lists, or nested
//! records. Display metadata travels with each field so presentation code
//! never has to know the schema.

use serde::Serialize;

use crate::error::{DecodeError, Result};

/// A fixed-width numeric value as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Short(i16),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl Scalar {
    /// Integer view, `None` for floating-point values.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Short(v) => Some(i64::from(v)),
            Self::Int(v) => Some(i64::from(v)),
            Self::Float(_) | Self::Double(_) => None,
        }
    }

    /// Widened floating-point view of any scalar.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Short(v) => f64::from(v),
            Self::Int(v) => f64::from(v),
            Self::Float(v) => f64::from(v),
            Self::Double(v) => v,
        }
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Short(_) | Self::Int(_))
    }
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Flag(bool),
    /// Unlabelled repetition.
    List(Vec<Value>),
    /// Labelled children.
    Record(Record),
}

impl Value {
    #[must_use]
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Whether a field's meaning is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    #[default]
    Named,
    /// Bytes whose meaning is unknown; the name is synthetic but stable.
    Reserved,
}

/// Resolved display scale and unit for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayHint {
    pub scale: f64,
    pub unit: &'static str,
}

impl DisplayHint {
    /// Value multiplied by the display scale.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub role: FieldRole,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayHint>,
}

impl Field {
    /// Named field without display metadata.
    pub fn named(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            role: FieldRole::Named,
            value,
            display: None,
        }
    }

    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.role == FieldRole::Reserved
    }
}

/// Ordered mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// First field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|f| &f.value)
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<Scalar> {
        self.get(name).and_then(Value::as_scalar)
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_flag)
    }

    /// Read an already-decoded integer field as a repetition count.
    pub fn count(&self, name: &str) -> Result<usize> {
        let value = self
            .scalar(name)
            .and_then(Scalar::as_i64)
            .ok_or_else(|| DecodeError::UnknownCountField {
                field: name.to_string(),
            })?;
        usize::try_from(value).map_err(|_| DecodeError::negative_count(name, value))
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
