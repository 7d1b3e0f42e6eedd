//! Text rendering of decoded save files.
//!
//! Each record prints as `name: value[ unit]` lines, indented two spaces per
//! nesting level. Numeric values are multiplied by their display scale,
//! flags print as `yes`/`no`, and gene `cell_type` values print by name.

use substrate_format::{
    CELL_TYPE_NAMES, CellRecord, Field, Record, SaveFile, Scalar, SubstrateSnapshot, Value,
};

const INDENT: &str = "  ";

/// Field whose integer value indexes [`CELL_TYPE_NAMES`].
const CELL_TYPE_FIELD: &str = "cell_type";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print reserved fields too.
    pub include_reserved: bool,
}

impl RenderOptions {
    #[must_use]
    pub fn with_reserved(include_reserved: bool) -> Self {
        Self { include_reserved }
    }
}

/// Render a whole save file.
#[must_use]
pub fn render_save(save: &SaveFile, options: RenderOptions) -> String {
    let mut sections = vec![
        render_substrate(&save.substrate, options),
        render_light_angle(save.genome.light_angle),
    ];
    sections.extend(
        save.genome
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| render_cell(index, cell, options)),
    );
    sections.extend(
        save.genome
            .food
            .iter()
            .enumerate()
            .map(|(index, food)| render_food(index, food, options)),
    );
    sections.join("\n")
}

#[must_use]
pub fn render_substrate(substrate: &SubstrateSnapshot, options: RenderOptions) -> String {
    let mut lines = vec!["substrate:".to_string()];
    render_record(substrate.fields(), 1, options, &mut lines);
    lines.join("\n")
}

#[must_use]
pub fn render_light_angle(light_angle: f64) -> String {
    format!("light_angle: {}", format_number(light_angle))
}

/// Render one cell; `index` is zero-based and printed one-based.
#[must_use]
pub fn render_cell(index: usize, cell: &CellRecord, options: RenderOptions) -> String {
    let mut lines = vec![format!("cell {}:", index + 1)];
    render_record(&cell.fields, 1, options, &mut lines);
    if !cell.links.is_empty() {
        lines.push(format!("{INDENT}links:"));
        render_record(&cell.links, 2, options, &mut lines);
    }
    if !cell.genes.is_empty() {
        lines.push(format!("{INDENT}genes:"));
        render_record(&cell.genes, 2, options, &mut lines);
    }
    lines.join("\n")
}

#[must_use]
pub fn render_food(index: usize, food: &Record, options: RenderOptions) -> String {
    let mut lines = vec![format!("food {}:", index + 1)];
    render_record(food, 1, options, &mut lines);
    lines.join("\n")
}

/// Append the lines of `record` at the given nesting depth.
pub fn render_record(record: &Record, depth: usize, options: RenderOptions, out: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for field in record {
        if field.is_reserved() && !options.include_reserved {
            continue;
        }
        match &field.value {
            Value::Scalar(scalar) => {
                out.push(format!("{indent}{}: {}", field.name, format_scalar(field, *scalar)));
            }
            Value::Flag(flag) => out.push(format!("{indent}{}: {}", field.name, yes_no(*flag))),
            Value::List(items) => render_list(field, items, depth, options, out),
            Value::Record(child) => {
                out.push(format!("{indent}{}:", field.name));
                render_record(child, depth + 1, options, out);
            }
        }
    }
}

/// Scalar and flag lists print inline; lists of records print one entry per
/// block, numbered from 1.
fn render_list(
    field: &Field,
    items: &[Value],
    depth: usize,
    options: RenderOptions,
    out: &mut Vec<String>,
) {
    let indent = INDENT.repeat(depth);
    let inline: Option<Vec<String>> = items
        .iter()
        .map(|item| match item {
            Value::Scalar(scalar) => Some(format_scalar(field, *scalar)),
            Value::Flag(flag) => Some(yes_no(*flag).to_string()),
            Value::List(_) | Value::Record(_) => None,
        })
        .collect();
    if let Some(values) = inline {
        out.push(format!("{indent}{}: {}", field.name, values.join(", ")));
        return;
    }

    out.push(format!("{indent}{}:", field.name));
    let child_indent = INDENT.repeat(depth + 1);
    for (index, item) in items.iter().enumerate() {
        out.push(format!("{child_indent}[{}]:", index + 1));
        match item {
            Value::Record(child) => render_record(child, depth + 2, options, out),
            other => {
                let wrapped = Field {
                    value: other.clone(),
                    ..field.clone()
                };
                let single: Record = std::iter::once(wrapped).collect();
                render_record(&single, depth + 2, options, out);
            }
        }
    }
}

fn format_scalar(field: &Field, scalar: Scalar) -> String {
    if field.name == CELL_TYPE_FIELD
        && let Some(index) = scalar.as_i64()
    {
        return cell_type_name(index);
    }

    let text = match field.display {
        Some(hint) if hint.scale != 1.0 => format_number(hint.apply(scalar.as_f64())),
        _ => match scalar.as_i64() {
            Some(value) => value.to_string(),
            None => format_number(scalar.as_f64()),
        },
    };
    match field.display {
        Some(hint) if !hint.unit.is_empty() => format!("{text} {}", hint.unit),
        _ => text,
    }
}

fn cell_type_name(index: i64) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| CELL_TYPE_NAMES.get(i))
        .map_or_else(|| format!("{index} (unknown)"), |name| (*name).to_string())
}

/// Up to six decimals with trailing zeros removed.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
