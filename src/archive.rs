// src/archive.rs
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CleanError, Result};

/// Suffix of a compressed delimited-text table.
pub const ARCHIVE_SUFFIX: &str = ".csv.zip";

/// List the `*.csv.zip` files directly under `input_dir`, sorted by name.
/// Anything else in the folder is skipped; an empty result is not an error.
pub fn discover_archives(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CleanError::MissingInputDirectory {
            path: input_dir.to_path_buf(),
        });
    }

    let pattern = format!(
        "{}/*{}",
        Pattern::escape(&input_dir.to_string_lossy()),
        ARCHIVE_SUFFIX
    );
    let mut archives = glob(&pattern)?.collect::<std::result::Result<Vec<PathBuf>, _>>()?;
    archives.retain(|p| p.is_file());
    archives.sort();

    for a in &archives {
        debug!(archive = %a.display(), "found archive");
    }
    info!(dir = %input_dir.display(), count = archives.len(), "discovered archives");
    Ok(archives)
}
