//! Gene (genome mode) record.
//!
//! # Layout (315 bytes)
//!
//! | Part          | Fields                                        |
//! |---------------|-----------------------------------------------|
//! | version       | i32, must be 95                               |
//! | scalars       | 9 f32, 2 i32, 3 bool, 2 i32, 4 bool, 1 f32    |
//! | cytoskeleton  | 12 × (2 i16 + 3 f32)                          |
//! | settings      | 12 i32; entry 5 is the connection limit       |
//! | trailer       | 2 f32                                         |
//!
//! Both arrays always hold twelve entries.

use crate::cursor::ByteCursor;
use crate::error::{RecordKind, Result};
use crate::schema::{FieldSpec, ScaleContext, decode_into};
use crate::value::{Field, Record, Value};

use super::read_version;

pub const CYTOSKELETON_ENTRIES: usize = 12;
pub const GENE_SETTINGS: usize = 12;

/// Position of the connection limit inside the settings array.
pub const MAX_CONNECTIONS_INDEX: usize = 5;

pub const CYTOSKELETON_ENTRY_SCHEMA: &[FieldSpec] = &[
    FieldSpec::short("anchor_a"),
    FieldSpec::short("anchor_b"),
    FieldSpec::float("strength"),
    FieldSpec::float("length").scaled(100.0, ""),
    FieldSpec::float("cytoskeleton_reserved").reserved(),
];

/// Everything between the version and the promoted connection limit.
pub const GENE_SCHEMA: &[FieldSpec] = &[
    FieldSpec::float("color_red"),
    FieldSpec::float("color_green"),
    FieldSpec::float("color_blue"),
    FieldSpec::float("split_mass"),
    FieldSpec::float("split_ratio"),
    FieldSpec::float("split_angle").unit("rad"),
    FieldSpec::float("child1_angle").unit("rad"),
    FieldSpec::float("child2_angle").unit("rad"),
    FieldSpec::float("nutrient_priority"),
    FieldSpec::int("child1_mode"),
    FieldSpec::int("child2_mode"),
    FieldSpec::flag("make_adhesin"),
    FieldSpec::flag("child1_keep_adhesin"),
    FieldSpec::flag("child2_keep_adhesin"),
    FieldSpec::int("cell_type"),
    FieldSpec::int("split_limit"),
    FieldSpec::flag("child1_mirror"),
    FieldSpec::flag("child2_mirror"),
    FieldSpec::flag("prioritize"),
    FieldSpec::flag("gene_flag_reserved").reserved(),
    FieldSpec::float("adhesin_stiffness"),
    FieldSpec::group("cytoskeleton", CYTOSKELETON_ENTRY_SCHEMA).times(CYTOSKELETON_ENTRIES),
    FieldSpec::int("settings").times(GENE_SETTINGS),
];

pub const GENE_TRAILER_SCHEMA: &[FieldSpec] = &[
    FieldSpec::float("adhesin_length").scaled(100.0, ""),
    FieldSpec::float("gene_reserved").reserved(),
];

pub fn decode_gene(cursor: &mut ByteCursor<'_>, ctx: &ScaleContext) -> Result<Record> {
    let mut record = Record::new();
    record.push(read_version(cursor, RecordKind::Gene, "version")?);
    decode_into(cursor, GENE_SCHEMA, ctx, &mut record)?;

    let max_connections = record
        .get("settings")
        .and_then(Value::as_list)
        .and_then(|settings| settings.get(MAX_CONNECTIONS_INDEX))
        .cloned();
    if let Some(value) = max_connections {
        record.push(Field::named("max_connections", value));
    }

    decode_into(cursor, GENE_TRAILER_SCHEMA, ctx, &mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_width;

    #[test]
    fn test_gene_width() {
        let body = schema_width(GENE_SCHEMA).unwrap();
        let trailer = schema_width(GENE_TRAILER_SCHEMA).unwrap();
        assert_eq!(4 + body + trailer, 315);
        assert_eq!(schema_width(CYTOSKELETON_ENTRY_SCHEMA), Some(16));
    }

    #[test]
    fn test_scalar_field_count() {
        let scalars = GENE_SCHEMA
            .iter()
            .filter(|spec| spec.name != "cytoskeleton" && spec.name != "settings")
            .count();
        assert_eq!(scalars, 21);
    }
}
