// Shared fixtures for unit tests.
use std::{fs::File, io::Write, path::Path};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zip::write::FileOptions;
use zip::CompressionMethod;

pub const CSV_HEADER: &str = "client_id,age,job,marital,education,credit_default,mortgage,number_contacts,contact_duration,previous_campaign_contacts,previous_outcome,campaign_outcome,day,month,cons_price_idx,euribor_three_months";

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,campaign_cleaner=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// A valid data line for `client_id`.
pub fn row(client_id: u32) -> String {
    format!(
        "{},40,technician,married,professional.course,no,yes,2,180,0,nonexistent,no,{},may,93.994,4.857",
        client_id,
        client_id % 28 + 1
    )
}

/// Write a deflated archive at `path` holding `entries` as `(name, contents)`.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) -> anyhow::Result<()> {
    let mut zip = zip::ZipWriter::new(File::create(path)?);
    for (name, contents) in entries {
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}
