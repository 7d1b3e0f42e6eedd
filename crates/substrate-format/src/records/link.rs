//! Link record: an adhesion between two cells.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::schema::{FieldSpec, ScaleContext, decode_record};
use crate::value::Record;

/// Link layout, 45 bytes.
pub const LINK_SCHEMA: &[FieldSpec] = &[
    FieldSpec::int("target_cell"),
    FieldSpec::double("angle_a").unit("rad"),
    FieldSpec::double("angle_b").unit("rad"),
    FieldSpec::flag("from_division"),
    FieldSpec::double("link_reserved_0").reserved(),
    FieldSpec::double("link_reserved_1").reserved(),
    FieldSpec::float("stiffness"),
    FieldSpec::float("length").scaled(100.0, ""),
];

pub fn decode_link(cursor: &mut ByteCursor<'_>, ctx: &ScaleContext) -> Result<Record> {
    decode_record(cursor, LINK_SCHEMA, ctx)
}
