//! Food particle record.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::schema::{FieldSpec, ScaleContext, decode_record};
use crate::value::Record;

/// Food layout, 24 bytes.
pub const FOOD_SCHEMA: &[FieldSpec] = &[
    FieldSpec::float("position_x"),
    FieldSpec::float("position_y"),
    FieldSpec::float("size"),
    FieldSpec::float("velocity_x").per_diameter(100.0, "%/s"),
    FieldSpec::float("velocity_y").per_diameter(100.0, "%/s"),
    FieldSpec::float("coating").scaled(100.0, "%"),
];

pub fn decode_food(cursor: &mut ByteCursor<'_>, ctx: &ScaleContext) -> Result<Record> {
    decode_record(cursor, FOOD_SCHEMA, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_width;

    #[test]
    fn test_food_width() {
        assert_eq!(schema_width(FOOD_SCHEMA), Some(24));
    }

    #[test]
    fn test_velocity_scales_with_diameter() {
        let data = [0u8; 24];
        let ctx = ScaleContext::with_diameter(400.0);
        let food = decode_food(&mut ByteCursor::new(&data), &ctx).unwrap();
        let velocity = food.field("velocity_x").unwrap().display.unwrap();
        assert_eq!(velocity.scale, 0.25);
        assert_eq!(food.field("coating").unwrap().display.unwrap().unit, "%");
    }
}
