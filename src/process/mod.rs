// src/process/mod.rs
pub mod clean;
pub mod date_parser;
pub mod raw_table;
pub mod records;

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::error::{CleanError, Result};
use raw_table::RawTable;

/// Columns every inner table has to carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "client_id",
    "age",
    "job",
    "marital",
    "education",
    "credit_default",
    "mortgage",
    "number_contacts",
    "contact_duration",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "day",
    "month",
    "cons_price_idx",
    "euribor_three_months",
];

/// One parsed inner entry of an archive.
#[derive(Debug)]
pub struct EntryTable {
    pub name: String,
    pub table: RawTable,
}

/// Open `zip_path` and parse every file entry, in archive order, straight
/// from the decompressing reader.
///
/// The archive handle is dropped before returning, on success and on error.
#[tracing::instrument(level = "info", skip(zip_path), fields(path = %zip_path.as_ref().display()))]
pub fn load_campaign_zip<P: AsRef<Path>>(zip_path: P) -> Result<Vec<EntryTable>> {
    let zip_path = zip_path.as_ref();
    let archive_name = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| zip_path.display().to_string());

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut tables = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let table = read_table(entry, &archive_name, &name)?;
        debug!(entry = %name, rows = table.len(), "parsed entry");
        tables.push(EntryTable { name, table });
    }

    info!(
        entries = tables.len(),
        rows = tables.iter().map(|t| t.table.len()).sum::<usize>(),
        "archive read"
    );
    Ok(tables)
}

/// Parse one header-led CSV stream and check it carries [`REQUIRED_COLUMNS`].
pub fn read_table<R: Read>(reader: R, archive: &str, entry: &str) -> Result<RawTable> {
    let malformed = |reason: String| CleanError::MalformedTable {
        archive: archive.to_string(),
        entry: entry.to_string(),
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(malformed("missing header".into()));
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == c))
        .collect();
    if !missing.is_empty() {
        return Err(malformed(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut fields = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| malformed(format!("CSV parse error at record {}: {}", idx, e)))?;
        fields.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable::from_fields(headers, fields))
}
