use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use substrate_format::SaveFile;

use crate::render::format_number;

/// Label/value rows shown by `summary`.
#[must_use]
pub fn summary_rows(save: &SaveFile) -> Vec<(&'static str, String)> {
    let substrate = &save.substrate;
    let genome = &save.genome;
    let count = |result: substrate_format::Result<usize>| {
        result.map_or_else(|_| "-".to_string(), |n| n.to_string())
    };
    vec![
        ("Version", substrate.version().to_string()),
        ("Substrate age", format_number(substrate.substrate_age())),
        ("Diameter", format_number(substrate.substrate_diameter())),
        ("Cell types", count(substrate.cell_type_count())),
        ("Cells", genome.cells.len().to_string()),
        ("Links", genome.total_links().to_string()),
        ("Genes", genome.total_genes().to_string()),
        ("Food", genome.food.len().to_string()),
        ("Light angle", format_number(genome.light_angle)),
        ("Primary bytes", save.primary_len.to_string()),
        (
            "Payload bytes",
            save.payload
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.len().to_string()),
        ),
    ]
}

pub fn build_summary_table(save: &SaveFile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in summary_rows(save) {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn print_summary(save: &SaveFile) {
    println!("{}", build_summary_table(save));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
