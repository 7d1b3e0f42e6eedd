//! Substrate (environment) record.
//!
//! The first block run of a save file holds this record: global simulation
//! parameters, one spawn toggle per cell type and the physical constants.
//! The toggle array holds `cell_type_count + 1` entries and is decoded after
//! `cell_type_count`.

use serde::Serialize;
use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::{RecordKind, Result};
use crate::records::read_version;
use crate::schema::{FieldSpec, ScaleContext, decode_into};
use crate::value::{Record, Scalar, Value};

/// Cell type names in save-file order, used for spawn toggles and gene
/// `cell_type` values.
pub const CELL_TYPE_NAMES: [&str; 18] = [
    "Phagocyte",
    "Flagellocyte",
    "Photocyte",
    "Devorocyte",
    "Lipocyte",
    "Keratinocyte",
    "Buoyocyte",
    "Glueocyte",
    "Virocyte",
    "Nitrocyte",
    "Stereocyte",
    "Senseocyte",
    "Myocyte",
    "Neurocyte",
    "Secrocyte",
    "Stemocyte",
    "Gamete",
    "Ciliocyte",
];

/// Labels of the toggle array in stream order. Files written with the
/// common cell-type count fill every label; the last toggle is the
/// random-contamination switch.
pub const SPAWN_TOGGLE_LABELS: &[&str] = &[
    "spawn_phagocytes",
    "spawn_flagellocytes",
    "spawn_photocytes",
    "spawn_devorocytes",
    "spawn_lipocytes",
    "spawn_keratinocytes",
    "spawn_buoyocytes",
    "spawn_glueocytes",
    "spawn_virocytes",
    "spawn_nitrocytes",
    "spawn_stereocytes",
    "spawn_senseocytes",
    "spawn_myocytes",
    "spawn_neurocytes",
    "spawn_secrocytes",
    "spawn_stemocytes",
    "spawn_gametes",
    "spawn_ciliocytes",
    "contaminate_with_random_cells",
];

/// Fields after the version up to and including `cell_type_count`.
pub const SUBSTRATE_PREFIX_SCHEMA: &[FieldSpec] = &[
    FieldSpec::double("substrate_age"),
    FieldSpec::int("cell_count"),
    FieldSpec::int("environment_version"),
    FieldSpec::double("nutrient_rate"),
    FieldSpec::double("nutrient_chunk_size"),
    FieldSpec::double("radiation_level").scaled(100.0, "%"),
    FieldSpec::double("light_amount"),
    FieldSpec::double("light_direction_change"),
    FieldSpec::double("light_range"),
    FieldSpec::double("substrate_reserved_0").reserved(),
    FieldSpec::int("cell_type_count"),
];

pub const SUBSTRATE_TOGGLE_SCHEMA: &[FieldSpec] = &[FieldSpec::flag("spawn_toggles")
    .count_of("cell_type_count", 1)
    .labeled(SPAWN_TOGGLE_LABELS)];

pub const SUBSTRATE_SUFFIX_SCHEMA: &[FieldSpec] = &[
    FieldSpec::double("gravity"),
    FieldSpec::double("density"),
    FieldSpec::double("density_gradient"),
    FieldSpec::flag("kill_cells_at_edge"),
    FieldSpec::double("nitrates"),
    FieldSpec::int("max_cell_count"),
    FieldSpec::int("max_food_count"),
    FieldSpec::double("substrate_diameter"),
    FieldSpec::double("dynamic_friction"),
    FieldSpec::double("static_friction"),
    FieldSpec::flag("only_point_mutations"),
    FieldSpec::float("salinity").scaled(100.0, "%"),
    FieldSpec::flag("cell_aging"),
    FieldSpec::double("nutrient_lumpiness"),
    FieldSpec::double("nutrient_lump_size"),
    FieldSpec::flag("mobile_food"),
    FieldSpec::float("nutrient_coating").scaled(100.0, "%"),
];

/// Decoded substrate record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubstrateSnapshot {
    fields: Record,
}

impl SubstrateSnapshot {
    /// All fields in stream order.
    #[must_use]
    pub fn fields(&self) -> &Record {
        &self.fields
    }

    #[must_use]
    pub fn version(&self) -> i32 {
        self.int("substrate_version")
    }

    /// Number of cell records in the genome stream.
    pub fn cell_count(&self) -> Result<usize> {
        self.fields.count("cell_count")
    }

    pub fn cell_type_count(&self) -> Result<usize> {
        self.fields.count("cell_type_count")
    }

    #[must_use]
    pub fn substrate_age(&self) -> f64 {
        self.double("substrate_age")
    }

    #[must_use]
    pub fn substrate_diameter(&self) -> f64 {
        self.double("substrate_diameter")
    }

    /// Spawn toggles in stream order, `cell_type_count + 1` entries.
    #[must_use]
    pub fn spawn_toggles(&self) -> Vec<(&str, bool)> {
        self.fields
            .get("spawn_toggles")
            .and_then(Value::as_record)
            .map(|toggles| {
                toggles
                    .iter()
                    .filter_map(|f| f.value.as_flag().map(|b| (f.name.as_str(), b)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn int(&self, name: &str) -> i32 {
        match self.fields.scalar(name) {
            Some(Scalar::Int(v)) => v,
            _ => 0,
        }
    }

    fn double(&self, name: &str) -> f64 {
        self.fields.scalar(name).map_or(0.0, Scalar::as_f64)
    }
}

/// Decode the substrate record from the reassembled primary buffer.
pub fn decode_substrate(data: &[u8]) -> Result<SubstrateSnapshot> {
    let mut cursor = ByteCursor::new(data);
    let ctx = ScaleContext::default();
    let mut fields = Record::new();
    fields.push(read_version(
        &mut cursor,
        RecordKind::Substrate,
        "substrate_version",
    )?);
    decode_into(&mut cursor, SUBSTRATE_PREFIX_SCHEMA, &ctx, &mut fields)?;
    decode_into(&mut cursor, SUBSTRATE_TOGGLE_SCHEMA, &ctx, &mut fields)?;
    decode_into(&mut cursor, SUBSTRATE_SUFFIX_SCHEMA, &ctx, &mut fields)?;
    debug!(
        consumed = cursor.position(),
        trailing = cursor.remaining(),
        "decoded substrate record"
    );
    Ok(SubstrateSnapshot { fields })
}
