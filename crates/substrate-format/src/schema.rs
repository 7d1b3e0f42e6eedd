//! Declarative field schemas.
//!
//! A schema is an ordered slice of [`FieldSpec`]s. Decoding walks the slice
//! once, reading each field from the cursor in order, so a repetition count
//! taken from another field always refers to a field earlier in the record.

use tracing::trace;

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::value::{DisplayHint, Field, FieldRole, Record, Scalar, Value};

/// Fixed-width big-endian primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    I16,
    I32,
    F32,
    F64,
}

impl Primitive {
    /// Encoded width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Read one value of this primitive.
    pub fn read(self, cursor: &mut ByteCursor<'_>) -> Result<Value> {
        Ok(match self {
            Self::Bool => Value::Flag(cursor.read_bool()?),
            Self::I16 => Value::Scalar(Scalar::Short(cursor.read_i16()?)),
            Self::I32 => Value::Scalar(Scalar::Int(cursor.read_i32()?)),
            Self::F32 => Value::Scalar(Scalar::Float(cursor.read_f32()?)),
            Self::F64 => Value::Scalar(Scalar::Double(cursor.read_f64()?)),
        })
    }
}

/// Shape of one element of a field.
#[derive(Debug, Clone, Copy)]
pub enum Layout {
    Primitive(Primitive),
    /// Nested fixed sub-record.
    Group(&'static [FieldSpec]),
}

impl Layout {
    /// Width of one element, `None` when it depends on decoded data.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        match self {
            Self::Primitive(p) => Some(p.width()),
            Self::Group(schema) => schema_width(schema),
        }
    }
}

/// How many elements a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// A single value, decoded as the bare element.
    Once,
    /// A fixed number of elements.
    Fixed(usize),
    /// The value of an earlier integer field plus `extra`.
    CountOf { field: &'static str, extra: usize },
}

/// How a numeric field is scaled for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Factor(f64),
    /// Factor divided by the substrate diameter.
    PerDiameter(f64),
}

/// Display metadata attached to a field spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    pub scale: Scale,
    pub unit: &'static str,
}

/// One entry of a schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub role: FieldRole,
    pub layout: Layout,
    pub repeat: Repeat,
    /// Names for the elements of a repeated field; unlabelled elements
    /// beyond the table are named by index.
    pub labels: Option<&'static [&'static str]>,
    pub display: Option<Display>,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, layout: Layout) -> Self {
        Self {
            name,
            role: FieldRole::Named,
            layout,
            repeat: Repeat::Once,
            labels: None,
            display: None,
        }
    }

    #[must_use]
    pub const fn flag(name: &'static str) -> Self {
        Self::new(name, Layout::Primitive(Primitive::Bool))
    }

    #[must_use]
    pub const fn short(name: &'static str) -> Self {
        Self::new(name, Layout::Primitive(Primitive::I16))
    }

    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, Layout::Primitive(Primitive::I32))
    }

    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, Layout::Primitive(Primitive::F32))
    }

    #[must_use]
    pub const fn double(name: &'static str) -> Self {
        Self::new(name, Layout::Primitive(Primitive::F64))
    }

    #[must_use]
    pub const fn group(name: &'static str, schema: &'static [FieldSpec]) -> Self {
        Self::new(name, Layout::Group(schema))
    }

    /// Mark the field as reserved (meaning unknown).
    #[must_use]
    pub const fn reserved(mut self) -> Self {
        self.role = FieldRole::Reserved;
        self
    }

    #[must_use]
    pub const fn times(mut self, count: usize) -> Self {
        self.repeat = Repeat::Fixed(count);
        self
    }

    #[must_use]
    pub const fn count_of(mut self, field: &'static str, extra: usize) -> Self {
        self.repeat = Repeat::CountOf { field, extra };
        self
    }

    #[must_use]
    pub const fn labeled(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = Some(labels);
        self
    }

    #[must_use]
    pub const fn unit(self, unit: &'static str) -> Self {
        self.scaled(1.0, unit)
    }

    #[must_use]
    pub const fn scaled(mut self, factor: f64, unit: &'static str) -> Self {
        self.display = Some(Display {
            scale: Scale::Factor(factor),
            unit,
        });
        self
    }

    #[must_use]
    pub const fn per_diameter(mut self, factor: f64, unit: &'static str) -> Self {
        self.display = Some(Display {
            scale: Scale::PerDiameter(factor),
            unit,
        });
        self
    }

    /// Encoded width, `None` when the repetition depends on decoded data.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        let element = self.layout.width()?;
        match self.repeat {
            Repeat::Once => Some(element),
            Repeat::Fixed(count) => element.checked_mul(count),
            Repeat::CountOf { .. } => None,
        }
    }
}

/// Total encoded width of a schema, `None` if any field is variable.
#[must_use]
pub fn schema_width(schema: &[FieldSpec]) -> Option<usize> {
    schema
        .iter()
        .try_fold(0usize, |total, spec| total.checked_add(spec.width()?))
}

/// Values needed to resolve display scales at decode time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    pub diameter: f64,
}

impl Default for ScaleContext {
    fn default() -> Self {
        Self { diameter: 1.0 }
    }
}

impl ScaleContext {
    /// Context for a substrate of the given diameter. Non-positive or
    /// non-finite diameters fall back to `1.0`.
    #[must_use]
    pub fn with_diameter(diameter: f64) -> Self {
        if diameter.is_finite() && diameter > 0.0 {
            Self { diameter }
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn resolve(&self, display: Display) -> DisplayHint {
        let scale = match display.scale {
            Scale::Factor(f) => f,
            Scale::PerDiameter(f) => f / self.diameter,
        };
        DisplayHint {
            scale,
            unit: display.unit,
        }
    }
}

/// Decode a schema into a fresh record.
pub fn decode_record(
    cursor: &mut ByteCursor<'_>,
    schema: &[FieldSpec],
    ctx: &ScaleContext,
) -> Result<Record> {
    let mut record = Record::new();
    decode_into(cursor, schema, ctx, &mut record)?;
    Ok(record)
}

/// Decode a schema, appending to `record`.
///
/// Count references resolve against everything already in `record`, so a
/// record decoded in several segments can refer back to earlier segments.
pub fn decode_into(
    cursor: &mut ByteCursor<'_>,
    schema: &[FieldSpec],
    ctx: &ScaleContext,
    record: &mut Record,
) -> Result<()> {
    for spec in schema {
        let start = cursor.position();
        let value = match spec.repeat {
            Repeat::Once => decode_element(cursor, &spec.layout, ctx)?,
            Repeat::Fixed(count) => decode_repeated(cursor, spec, count, ctx)?,
            Repeat::CountOf { field, extra } => {
                let count = record.count(field)?.saturating_add(extra);
                decode_repeated(cursor, spec, count, ctx)?
            }
        };
        trace!(field = spec.name, offset = start, "decoded field");
        record.push(Field {
            name: spec.name.to_string(),
            role: spec.role,
            value,
            display: spec.display.map(|d| ctx.resolve(d)),
        });
    }
    Ok(())
}

fn decode_element(
    cursor: &mut ByteCursor<'_>,
    layout: &Layout,
    ctx: &ScaleContext,
) -> Result<Value> {
    match layout {
        Layout::Primitive(p) => p.read(cursor),
        Layout::Group(schema) => decode_record(cursor, schema, ctx).map(Value::Record),
    }
}

fn decode_repeated(
    cursor: &mut ByteCursor<'_>,
    spec: &FieldSpec,
    count: usize,
    ctx: &ScaleContext,
) -> Result<Value> {
    let items = cursor.read_many(count, |c| decode_element(c, &spec.layout, ctx))?;
    let Some(labels) = spec.labels else {
        return Ok(Value::List(items));
    };
    let children = items
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let (name, role) = match labels.get(index) {
                Some(label) => ((*label).to_string(), spec.role),
                None => (format!("{}_{index}", spec.name), FieldRole::Reserved),
            };
            Field {
                name,
                role,
                value,
                display: spec.display.map(|d| ctx.resolve(d)),
            }
        })
        .collect();
    Ok(Value::Record(children))
}
