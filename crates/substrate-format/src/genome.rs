//! Genome stream: light angle, cells and food.
//!
//! # Cell layout
//!
//! | Part     | Fields                                           |
//! |----------|--------------------------------------------------|
//! | version  | i32, must be 95                                  |
//! | prefix   | 11 f64, `link_count` i32                         |
//! | links    | `link_count` link records                        |
//! | middle   | i32, bool, 3 f32, `gene_count` i32               |
//! | genes    | `gene_count` gene records                        |
//! | trailer  | 3 i32, 4 f64, bool, 14 f32, 2 i32, f64           |
//!
//! A cell without links or genes is 234 bytes.

use serde::Serialize;
use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, RecordKind, Result};
use crate::records::{decode_food, decode_gene, decode_link, read_version};
use crate::schema::{FieldSpec, ScaleContext, decode_into};
use crate::value::{Field, Record, Value};

pub const CELL_PREFIX_SCHEMA: &[FieldSpec] = &[
    FieldSpec::double("position_x"),
    FieldSpec::double("position_y"),
    FieldSpec::double("velocity_x").per_diameter(100.0, "%/s"),
    FieldSpec::double("velocity_y").per_diameter(100.0, "%/s"),
    FieldSpec::double("angle").unit("rad"),
    FieldSpec::double("angular_velocity").unit("rad/s"),
    FieldSpec::double("mass"),
    FieldSpec::double("nutrients"),
    FieldSpec::double("age"),
    FieldSpec::double("cell_reserved_d0").reserved(),
    FieldSpec::double("cell_reserved_d1").reserved(),
    FieldSpec::int("link_count"),
];

pub const CELL_MIDDLE_SCHEMA: &[FieldSpec] = &[
    FieldSpec::int("mode"),
    FieldSpec::flag("dividing"),
    FieldSpec::float("color_red"),
    FieldSpec::float("color_green"),
    FieldSpec::float("color_blue"),
    FieldSpec::int("gene_count"),
];

pub const CELL_TRAILER_SCHEMA: &[FieldSpec] = &[
    FieldSpec::int("cell_id"),
    FieldSpec::int("parent_id"),
    FieldSpec::int("cell_reserved_i0").reserved(),
    FieldSpec::double("cell_reserved_d2").reserved().times(4),
    FieldSpec::flag("cell_reserved_b0").reserved(),
    FieldSpec::float("cell_reserved_f0").reserved().times(14),
    FieldSpec::int("cell_reserved_i1").reserved().times(2),
    FieldSpec::double("cell_reserved_d3").reserved(),
];

/// A decoded cell with its nested links and genes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRecord {
    /// Scalar fields of the cell in stream order.
    pub fields: Record,
    /// Links keyed `link 1`, `link 2`, ...
    pub links: Record,
    /// Genes keyed `m1`, `m2`, ...
    pub genes: Record,
}

impl CellRecord {
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// Link by zero-based position.
    #[must_use]
    pub fn link(&self, index: usize) -> Option<&Record> {
        self.links.iter().nth(index).and_then(|f| f.value.as_record())
    }

    /// Gene by zero-based position.
    #[must_use]
    pub fn gene(&self, index: usize) -> Option<&Record> {
        self.genes.iter().nth(index).and_then(|f| f.value.as_record())
    }
}

/// Decoded genome stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenomeStream {
    pub light_angle: f64,
    pub cells: Vec<CellRecord>,
    pub food: Vec<Record>,
}

impl GenomeStream {
    #[must_use]
    pub fn total_links(&self) -> usize {
        self.cells.iter().map(CellRecord::link_count).sum()
    }

    #[must_use]
    pub fn total_genes(&self) -> usize {
        self.cells.iter().map(CellRecord::gene_count).sum()
    }
}

/// Decode the reassembled secondary buffer.
///
/// `cell_count` and `substrate_diameter` come from the substrate record; the
/// diameter only affects display scales of velocity fields.
pub fn decode_genome(
    data: &[u8],
    cell_count: usize,
    substrate_diameter: f64,
) -> Result<GenomeStream> {
    let mut cursor = ByteCursor::new(data);
    let ctx = ScaleContext::with_diameter(substrate_diameter);

    let light_angle = cursor.read_f64()?;
    let cells = cursor.read_many(cell_count, |c| decode_cell(c, &ctx))?;

    let food_count = cursor.read_i32()?;
    let food_count = usize::try_from(food_count)
        .map_err(|_| DecodeError::negative_count("food_count", food_count.into()))?;
    let food = cursor.read_many(food_count, |c| decode_food(c, &ctx))?;

    debug!(
        cells = cells.len(),
        food = food.len(),
        consumed = cursor.position(),
        trailing = cursor.remaining(),
        "decoded genome stream"
    );
    Ok(GenomeStream {
        light_angle,
        cells,
        food,
    })
}

/// Decode one cell record at the cursor.
pub fn decode_cell(cursor: &mut ByteCursor<'_>, ctx: &ScaleContext) -> Result<CellRecord> {
    let start = cursor.position();
    let mut fields = Record::new();
    fields.push(read_version(cursor, RecordKind::Cell, "version")?);

    decode_into(cursor, CELL_PREFIX_SCHEMA, ctx, &mut fields)?;
    let link_count = fields.count("link_count")?;
    let links = cursor
        .read_many(link_count, |c| decode_link(c, ctx))?
        .into_iter()
        .enumerate()
        .map(|(i, link)| Field::named(format!("link {}", i + 1), Value::Record(link)))
        .collect();

    decode_into(cursor, CELL_MIDDLE_SCHEMA, ctx, &mut fields)?;
    let gene_count = fields.count("gene_count")?;
    let genes = cursor
        .read_many(gene_count, |c| decode_gene(c, ctx))?
        .into_iter()
        .enumerate()
        .map(|(i, gene)| Field::named(format!("m{}", i + 1), Value::Record(gene)))
        .collect();

    decode_into(cursor, CELL_TRAILER_SCHEMA, ctx, &mut fields)?;
    trace!(
        offset = start,
        len = cursor.position() - start,
        link_count,
        gene_count,
        "decoded cell"
    );
    Ok(CellRecord {
        fields,
        links,
        genes,
    })
}
