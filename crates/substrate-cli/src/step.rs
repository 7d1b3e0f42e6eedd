//! Interactive step-through of decoded cells.

use std::io::{self, BufRead, Write};

use substrate_format::SaveFile;

use crate::render::{RenderOptions, render_cell, render_food, render_light_angle, render_substrate};

const PROMPT: &str = "-- Enter for the next cell, q to quit --";

/// Whether the reader asked to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Finished,
    Quit,
}

/// Print the file one cell at a time, waiting on `input` after each cell.
///
/// End of input behaves like Enter.
pub fn step_through<R, W>(
    save: &SaveFile,
    options: RenderOptions,
    input: &mut R,
    output: &mut W,
) -> io::Result<StepOutcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", render_substrate(&save.substrate, options))?;
    writeln!(output, "{}", render_light_angle(save.genome.light_angle))?;

    let mut answer = String::new();
    for (index, cell) in save.genome.cells.iter().enumerate() {
        writeln!(output, "{}", render_cell(index, cell, options))?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        answer.clear();
        input.read_line(&mut answer)?;
        writeln!(output)?;
        if answer.trim().eq_ignore_ascii_case("q") {
            return Ok(StepOutcome::Quit);
        }
    }

    for (index, food) in save.genome.food.iter().enumerate() {
        writeln!(output, "{}", render_food(index, food, options))?;
    }
    Ok(StepOutcome::Finished)
}
