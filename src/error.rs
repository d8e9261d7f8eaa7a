// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("input directory does not exist: {}", path.display())]
    MissingInputDirectory { path: PathBuf },

    #[error("malformed table {entry} in {archive}: {reason}")]
    MalformedTable {
        archive: String,
        entry: String,
        reason: String,
    },

    #[error("schema mismatch in {table}: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        table: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("ZIP error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("listing input failed: {0}")]
    Glob(#[from] glob::GlobError),
}

pub type Result<T> = std::result::Result<T, CleanError>;
