//! Leaf record decoders used by the genome stream.
//!
//! Links, genes and food particles have fixed layouts; only genes carry a
//! version of their own.

pub mod food;
pub mod gene;
pub mod link;

pub use food::{FOOD_SCHEMA, decode_food};
pub use gene::{
    CYTOSKELETON_ENTRIES, CYTOSKELETON_ENTRY_SCHEMA, GENE_SCHEMA, GENE_SETTINGS,
    GENE_TRAILER_SCHEMA, MAX_CONNECTIONS_INDEX, decode_gene,
};
pub use link::{LINK_SCHEMA, decode_link};

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, RecordKind, Result};
use crate::value::{Field, Scalar, Value};

/// Read a leading version integer and reject anything but the supported one.
pub(crate) fn read_version(
    cursor: &mut ByteCursor<'_>,
    record: RecordKind,
    name: &str,
) -> Result<Field> {
    let version = cursor.read_i32()?;
    if version != crate::SUPPORTED_VERSION {
        return Err(DecodeError::unsupported_version(record, version));
    }
    Ok(Field::named(name, Value::Scalar(Scalar::Int(version))))
}
