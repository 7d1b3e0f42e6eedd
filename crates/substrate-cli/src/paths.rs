//! Save-file path conventions.

use std::path::{Path, PathBuf};

/// Extension save files carry on disk.
pub const SAVE_EXTENSION: &str = "substrate";

/// Extension of the side file holding the inflated genome payload.
pub const PAYLOAD_EXTENSION: &str = "genome.bin";

/// Append `.substrate` to a path that has no extension.
#[must_use]
pub fn resolve_save_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(SAVE_EXTENSION)
    }
}

/// Default side-file path for an input save file: `world.substrate` becomes
/// `world.genome.bin`.
#[must_use]
pub fn default_payload_path(save_path: &Path) -> PathBuf {
    save_path.with_extension(PAYLOAD_EXTENSION)
}
