use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use substrate_cli::paths::{default_payload_path, resolve_save_path};
use substrate_cli::render::{RenderOptions, render_save};
use substrate_cli::step::{StepOutcome, step_through};
use substrate_cli::summary::print_summary;
use substrate_format::{ReaderOptions, SaveFile, read_save_with_options};

use crate::cli::{DumpPayloadArgs, FileArgs, ShowArgs, ShowFormatArg};

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let path = resolve_save_path(&args.file);
    let save = load(&path, args.dump_payload.is_some())?;
    if let Some(target) = &args.dump_payload {
        write_payload(&save, target)?;
    }

    let options = RenderOptions::with_reserved(args.debug);
    match args.format {
        ShowFormatArg::Json => {
            let json = serde_json::to_string_pretty(&save).context("serialize save file")?;
            println!("{json}");
        }
        ShowFormatArg::Text if args.step => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let outcome = step_through(&save, options, &mut stdin.lock(), &mut stdout.lock())
                .context("step through cells")?;
            if outcome == StepOutcome::Quit {
                debug!("step-through stopped early");
            }
        }
        ShowFormatArg::Text => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", render_save(&save, options)).context("write output")?;
        }
    }
    Ok(())
}

pub fn run_summary(args: &FileArgs) -> Result<()> {
    let path = resolve_save_path(&args.file);
    let save = load(&path, true)?;
    println!("File: {}", path.display());
    print_summary(&save);
    Ok(())
}

pub fn run_dump_payload(args: &DumpPayloadArgs) -> Result<PathBuf> {
    let path = resolve_save_path(&args.file);
    let save = load(&path, true)?;
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| default_payload_path(&path));
    write_payload(&save, &target)?;
    Ok(target)
}

fn load(path: &Path, keep_payload: bool) -> Result<SaveFile> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    let options = if keep_payload {
        ReaderOptions::new()
    } else {
        ReaderOptions::new().discard_payload()
    };
    let save = read_save_with_options(path, options)
        .with_context(|| format!("decode {}", path.display()))?;
    info!(
        cells = save.genome.cells.len(),
        food = save.genome.food.len(),
        "save file decoded"
    );
    Ok(save)
}

fn write_payload(save: &SaveFile, target: &Path) -> Result<()> {
    let payload = save
        .payload
        .as_deref()
        .context("payload was not retained")?;
    fs::write(target, payload).with_context(|| format!("write {}", target.display()))?;
    info!(path = %target.display(), bytes = payload.len(), "payload written");
    Ok(())
}
