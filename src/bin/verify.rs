// src/bin/verify.rs
//
// Checks that every input row made it into each of the three output tables.

use anyhow::{Context, Result};
use campaign_cleaner::{archive::discover_archives, PipelineConfig};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Data rows across every file entry of one archive.
fn count_archive_rows(zip_path: &Path) -> Result<usize> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open ZIP '{}'", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read ZIP '{}'", zip_path.display()))?;

    let mut rows = 0;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).with_context(|| {
            format!("Failed to access entry {} in '{}'", i, zip_path.display())
        })?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(entry);
        for record in rdr.records() {
            record.with_context(|| format!("Bad record in {}", name))?;
            rows += 1;
        }
    }
    Ok(rows)
}

fn count_output_rows(path: &Path) -> Result<usize> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    let mut rows = 0;
    for record in rdr.records() {
        record.with_context(|| format!("Bad record in {}", path.display()))?;
        rows += 1;
    }
    Ok(rows)
}

fn main() -> Result<()> {
    let config = PipelineConfig::default();

    let archives = discover_archives(&config.input_dir)?;
    let mut input_rows = 0;
    for zip_path in &archives {
        let n = count_archive_rows(zip_path)?;
        println!("{:<40} {:>8} rows", zip_path.display(), n);
        input_rows += n;
    }
    println!("input total: {} rows in {} archives\n", input_rows, archives.len());

    let mut ok = true;
    for path in [
        config.client_path(),
        config.campaign_path(),
        config.economics_path(),
    ] {
        let n = count_output_rows(&path)?;
        let status = if n == input_rows { "ok" } else { "MISMATCH" };
        println!("{:<40} {:>8} rows  {}", path.display(), n, status);
        ok &= n == input_rows;
    }

    if !ok {
        anyhow::bail!("output row counts do not match {} input rows", input_rows);
    }
    Ok(())
}
