//! Genome stream decoding.

mod common;

use substrate_format::records::{CYTOSKELETON_ENTRIES, GENE_SETTINGS};
use substrate_format::schema::ScaleContext;
use substrate_format::{
    ByteCursor, DecodeError, RecordKind, Scalar, Value, decode_cell, decode_genome,
};

use common::{Bytes, cell, food, gene, genome, link};

#[test]
fn cell_without_links_or_genes_consumes_fixed_width() {
    let mut data = cell(95, &[], &[]);
    data.extend_from_slice(&[0xEE; 3]);
    let mut cursor = ByteCursor::new(&data);
    let decoded = decode_cell(&mut cursor, &ScaleContext::default()).unwrap();

    assert!(decoded.links.is_empty());
    assert!(decoded.genes.is_empty());
    assert_eq!(cursor.position(), 234);
    assert_eq!(cursor.remaining(), 3);
    assert_eq!(decoded.fields.scalar("cell_id"), Some(Scalar::Int(42)));
}

#[test]
fn two_cells_with_links_genes_and_food() {
    let cells = [
        cell(95, &[link(1)], &[gene(95, 2, 20)]),
        cell(95, &[link(0)], &[gene(95, 0, 7)]),
    ];
    let data = genome(1.25, &cells, 1, &[food(3.0)]);
    let stream = decode_genome(&data, 2, 400.0).unwrap();

    assert_eq!(stream.light_angle, 1.25);
    assert_eq!(stream.cells.len(), 2);
    assert_eq!(stream.food.len(), 1);
    assert_eq!(stream.total_links(), 2);
    assert_eq!(stream.total_genes(), 2);

    let first = &stream.cells[0];
    let link_keys: Vec<_> = first.links.iter().map(|f| f.name.as_str()).collect();
    let gene_keys: Vec<_> = first.genes.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(link_keys, ["link 1"]);
    assert_eq!(gene_keys, ["m1"]);
    assert_eq!(
        first.link(0).unwrap().scalar("target_cell"),
        Some(Scalar::Int(1))
    );
    assert_eq!(
        stream.cells[1].gene(0).unwrap().scalar("max_connections"),
        Some(Scalar::Int(7))
    );
    assert_eq!(stream.food[0].scalar("position_x"), Some(Scalar::Float(3.0)));
}

#[test]
fn velocity_display_scale_follows_diameter() {
    let data = genome(0.0, &[cell(95, &[], &[])], 0, &[]);
    let stream = decode_genome(&data, 1, 400.0).unwrap();
    let velocity = stream.cells[0].fields.field("velocity_x").unwrap();
    let hint = velocity.display.unwrap();
    assert_eq!(hint.scale, 0.25);
    assert_eq!(hint.apply(4.0), 1.0);
}

#[test]
fn multiple_genes_are_keyed_in_order() {
    let genes = [gene(95, 0, 1), gene(95, 1, 2), gene(95, 2, 3)];
    let data = genome(0.0, &[cell(95, &[], &genes)], 0, &[]);
    let stream = decode_genome(&data, 1, 1.0).unwrap();
    let keys: Vec<_> = stream.cells[0].genes.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(keys, ["m1", "m2", "m3"]);
}

#[test]
fn gene_arrays_always_hold_twelve_entries() {
    let data = genome(0.0, &[cell(95, &[], &[gene(95, 4, 0)])], 0, &[]);
    let stream = decode_genome(&data, 1, 1.0).unwrap();
    let gene = stream.cells[0].gene(0).unwrap();

    let cytoskeleton = gene.get("cytoskeleton").and_then(Value::as_list).unwrap();
    assert_eq!(cytoskeleton.len(), CYTOSKELETON_ENTRIES);
    let last = cytoskeleton[11].as_record().unwrap();
    assert_eq!(last.scalar("anchor_a"), Some(Scalar::Short(11)));
    assert_eq!(last.scalar("anchor_b"), Some(Scalar::Short(12)));

    let settings = gene.get("settings").and_then(Value::as_list).unwrap();
    assert_eq!(settings.len(), GENE_SETTINGS);
    assert_eq!(gene.scalar("max_connections"), Some(Scalar::Int(0)));
    assert_eq!(gene.scalar("cell_type"), Some(Scalar::Int(4)));
}

#[test]
fn corrupt_gene_version_fails_before_arrays() {
    // Only the version and nothing else: the check must fire before any
    // array read would run out of data.
    let truncated_gene = Bytes::new().int(94).build();
    let data = genome(0.0, &[cell(95, &[], &[truncated_gene])], 0, &[]);
    let err = decode_genome(&data, 1, 1.0).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnsupportedVersion {
            record: RecordKind::Gene,
            found: 94,
            ..
        }
    ));

    let data = genome(0.0, &[cell(95, &[], &[gene(94, 0, 0)])], 0, &[]);
    assert!(matches!(
        decode_genome(&data, 1, 1.0),
        Err(DecodeError::UnsupportedVersion {
            record: RecordKind::Gene,
            ..
        })
    ));
}

#[test]
fn cell_version_mismatch_fails() {
    let data = genome(0.0, &[cell(95, &[], &[]), cell(80, &[], &[])], 0, &[]);
    assert!(matches!(
        decode_genome(&data, 2, 1.0),
        Err(DecodeError::UnsupportedVersion {
            record: RecordKind::Cell,
            found: 80,
            ..
        })
    ));
}

#[test]
fn declared_food_beyond_data_fails() {
    let cells = [
        cell(95, &[link(1)], &[gene(95, 2, 20)]),
        cell(95, &[link(0)], &[gene(95, 0, 7)]),
    ];
    let data = genome(1.25, &cells, 2, &[food(3.0)]);
    assert!(matches!(
        decode_genome(&data, 2, 400.0),
        Err(DecodeError::UnexpectedEndOfData { .. })
    ));
}

#[test]
fn fewer_cells_than_declared_fails() {
    let data = genome(0.0, &[cell(95, &[], &[])], 0, &[]);
    assert!(decode_genome(&data, 2, 1.0).is_err());
}
