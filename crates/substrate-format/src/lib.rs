//! Substrate save-file decoder.
//!
//! This crate decodes the binary save files of a cell-simulation program
//! into an ordered value tree that presentation code can walk without
//! knowing the file layout.
//!
//! # Layout
//!
//! - An object-stream magic followed by block-data chunks holding the
//!   substrate (environment) record.
//! - A deflate-compressed payload, itself magic + blocks, holding the genome
//!   stream: light angle, cells with nested links and genes, food particles.
//!
//! All numbers are big-endian. Substrate, cell and gene records start with
//! a version that must equal [`SUPPORTED_VERSION`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use substrate_format::read_save;
//!
//! let save = read_save(Path::new("world.substrate")).unwrap();
//! println!(
//!     "{} cells, {} food",
//!     save.genome.cells.len(),
//!     save.genome.food.len()
//! );
//! ```

pub mod block;
pub mod cursor;
mod error;
pub mod genome;
mod options;
pub mod payload;
mod reader;
pub mod records;
pub mod schema;
pub mod substrate;
pub mod value;

// Re-export error types
pub use error::{DecodeError, RecordKind, Result};

// Re-export core types
pub use block::{Reassembled, TagPolicy, reassemble};
pub use cursor::ByteCursor;
pub use genome::{CellRecord, GenomeStream, decode_cell, decode_genome};
pub use options::ReaderOptions;
pub use payload::{extract_payload, inflate};
pub use substrate::{CELL_TYPE_NAMES, SubstrateSnapshot, decode_substrate};
pub use value::{DisplayHint, Field, FieldRole, Record, Scalar, Value};

// Re-export reader functionality
pub use reader::{SaveFile, SaveReader, decode_save, read_save, read_save_with_options};

/// The only record version this crate understands.
pub const SUPPORTED_VERSION: i32 = 95;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
