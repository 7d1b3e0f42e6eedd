//! Save-file reader.
//!
//! Provides functionality to read a whole save file: the substrate record
//! from the primary block run and the genome stream from the compressed
//! payload behind it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::block::{TagPolicy, reassemble};
use crate::error::{DecodeError, Result};
use crate::genome::{GenomeStream, decode_genome};
use crate::options::ReaderOptions;
use crate::payload::extract_payload;
use crate::substrate::{SubstrateSnapshot, decode_substrate};

/// A fully decoded save file.
#[derive(Debug, Clone, Serialize)]
pub struct SaveFile {
    pub substrate: SubstrateSnapshot,
    pub genome: GenomeStream,
    /// Bytes consumed by the primary block run, magic included.
    pub primary_len: usize,
    /// Inflated secondary payload, still framed, as stored in the file.
    #[serde(skip)]
    pub payload: Option<Vec<u8>>,
}

/// Save-file reader.
pub struct SaveReader<R: Read> {
    reader: BufReader<R>,
    options: ReaderOptions,
}

impl<R: Read> SaveReader<R> {
    /// Create a new reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Create a new reader with options.
    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the entire file into memory and decode it.
    pub fn read_save(mut self) -> Result<SaveFile> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        decode_save(&data, &self.options)
    }
}

impl SaveReader<File> {
    /// Open a save file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Open a save file with options.
    pub fn open_with_options(path: &Path, options: ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DecodeError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DecodeError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read a save file from a path.
pub fn read_save(path: &Path) -> Result<SaveFile> {
    SaveReader::open(path)?.read_save()
}

/// Read a save file with options.
pub fn read_save_with_options(path: &Path, options: ReaderOptions) -> Result<SaveFile> {
    SaveReader::open_with_options(path, options)?.read_save()
}

/// Decode an in-memory save file.
pub fn decode_save(data: &[u8], options: &ReaderOptions) -> Result<SaveFile> {
    let span = info_span!("decode_save", len = data.len());
    let _guard = span.enter();

    let primary = reassemble(data, TagPolicy::Tolerant)?;
    let substrate = decode_substrate(&primary.payload)?;
    let cell_count = substrate.cell_count()?;
    debug!(
        version = substrate.version(),
        cell_count,
        primary_len = primary.consumed,
        "substrate decoded"
    );

    let payload = extract_payload(data, primary.consumed)?;
    let secondary = reassemble(&payload, TagPolicy::Strict)?;
    let genome = decode_genome(
        &secondary.payload,
        cell_count,
        substrate.substrate_diameter(),
    )?;

    Ok(SaveFile {
        substrate,
        genome,
        primary_len: primary.consumed,
        payload: options.keep_payload.then_some(payload),
    })
}
