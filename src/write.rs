// src/write.rs
use csv::WriterBuilder;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::merge::{Merged, Table};
use crate::process::records::Record;

/// Paths of the three tables written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub client: PathBuf,
    pub campaign: PathBuf,
    pub economics: PathBuf,
}

impl OutputPaths {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.client, &self.campaign, &self.economics]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Header line in `R::COLUMNS` order, then one line per row. No index column;
/// missing values are empty fields.
pub fn write_table<R: Record, W: Write>(out: W, table: &Table<R>) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(R::COLUMNS)?;
    for row in table.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn stage<R: Record>(dir: &Path, table: &Table<R>) -> Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    write_table(tmp.as_file_mut(), table)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Write all three tables into temporaries inside the output folder, then
/// move them onto their final names. If any table fails to write, existing
/// outputs are left as they were and the temporaries are removed on drop.
pub fn write_outputs(merged: &Merged, config: &PipelineConfig) -> Result<OutputPaths> {
    fs::create_dir_all(&config.output_dir)?;

    let client = stage(&config.output_dir, &merged.client)?;
    let campaign = stage(&config.output_dir, &merged.campaign)?;
    let economics = stage(&config.output_dir, &merged.economics)?;

    let paths = OutputPaths {
        client: config.client_path(),
        campaign: config.campaign_path(),
        economics: config.economics_path(),
    };
    for (tmp, dest, rows) in [
        (client, &paths.client, merged.client.len()),
        (campaign, &paths.campaign, merged.campaign.len()),
        (economics, &paths.economics, merged.economics.len()),
    ] {
        tmp.persist(dest).map_err(|e| e.error)?;
        info!(path = %dest.display(), rows, "wrote table");
    }
    Ok(paths)
}
