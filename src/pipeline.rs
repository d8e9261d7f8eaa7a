// src/pipeline.rs
use std::time::Instant;
use tracing::info;

use crate::archive::discover_archives;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::merge::Merged;
use crate::process::load_campaign_zip;
use crate::write::{write_outputs, OutputPaths};

/// What a finished run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub archives: usize,
    pub entries: usize,
    pub rows: usize,
    pub outputs: OutputPaths,
}

/// Discover, read, clean and merge every archive, then write the three tables.
///
/// Nothing is written until every archive has been read and merged, so a
/// failing run leaves the output folder as it found it.
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input_dir.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    let start = Instant::now();
    let archives = discover_archives(&config.input_dir)?;

    let mut merged = Merged::default();
    let mut entries = 0;
    for path in &archives {
        for entry in load_campaign_zip(path)? {
            merged = merged.absorb(&entry.table)?;
            entries += 1;
        }
    }
    info!(
        client = merged.client.len(),
        campaign = merged.campaign.len(),
        economics = merged.economics.len(),
        "merged"
    );

    let outputs = write_outputs(&merged, config)?;
    let report = RunReport {
        archives: archives.len(),
        entries,
        rows: merged.client.len(),
        outputs,
    };
    info!(
        archives = report.archives,
        entries = report.entries,
        rows = report.rows,
        elapsed = ?start.elapsed(),
        "run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::testutil::{init_test_logging, row, write_zip, CSV_HEADER};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn table(ids: &[u32]) -> String {
        let mut s = format!("{}\n", CSV_HEADER);
        for id in ids {
            s.push_str(&row(*id));
            s.push('\n');
        }
        s
    }

    fn setup(dir: &Path) -> anyhow::Result<PipelineConfig> {
        let config = PipelineConfig::new(dir.join("input"), dir.join("output"));
        fs::create_dir_all(&config.input_dir)?;
        Ok(config)
    }

    fn ids(path: &Path) -> anyhow::Result<Vec<String>> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut out = Vec::new();
        for rec in rdr.records() {
            out.push(rec?[0].to_string());
        }
        Ok(out)
    }

    #[test]
    fn merges_archives_in_discovery_then_row_order() -> anyhow::Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        write_zip(&config.input_dir.join("b.csv.zip"), &[("b.csv", table(&[30, 10, 20]).as_str())])?;
        write_zip(&config.input_dir.join("a.csv.zip"), &[("a.csv", table(&[2, 1]).as_str())])?;
        fs::write(config.input_dir.join("readme.txt"), "skip me")?;

        let report = run(&config)?;
        assert_eq!(report.archives, 2);
        assert_eq!(report.entries, 2);
        assert_eq!(report.rows, 5);

        let client = fs::read_to_string(&report.outputs.client)?;
        assert!(client.starts_with("client_id,age,job,marital,education,credit_default,mortgage\n"));
        for path in report.outputs.iter() {
            assert_eq!(ids(path)?, vec!["2", "1", "30", "10", "20"]);
        }
        Ok(())
    }

    #[test]
    fn cleaned_values_reach_every_table() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        let body = format!(
            "{}\n5,33,blue-collar,married,university.degree,yes,unknown,2,120,1,success,yes,19,jul,93.994,4.857\n6,45,admin.,single,unknown,no,yes,1,80,0,failure,no,31,feb,94.465,1.25\n",
            CSV_HEADER
        );
        write_zip(&config.input_dir.join("bank.csv.zip"), &[("bank.csv", body.as_str())])?;

        let report = run(&config)?;
        assert_eq!(
            fs::read_to_string(&report.outputs.client)?,
            "client_id,age,job,marital,education,credit_default,mortgage\n\
             5,33,blue_collar,married,university_degree,1,0\n\
             6,45,admin,single,,0,1\n"
        );
        assert_eq!(
            fs::read_to_string(&report.outputs.campaign)?,
            "client_id,number_contacts,contact_duration,previous_campaign_contacts,previous_outcome,campaign_outcome,last_contact_date\n\
             5,2,120,1,1,1,2022-07-19\n\
             6,1,80,0,0,0,\n"
        );
        assert_eq!(
            fs::read_to_string(&report.outputs.economics)?,
            "client_id,cons_price_idx,euribor_three_months\n\
             5,93.994,4.857\n\
             6,94.465,1.25\n"
        );
        Ok(())
    }

    #[test]
    fn whole_number_decimals_merge_as_decimals() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        let whole = format!(
            "{}\n1,30,admin.,single,basic.4y,no,no,1,60,0,nonexistent,no,2,jun,94,4\n",
            CSV_HEADER
        );
        let fractional = format!(
            "{}\n2,,admin.,single,basic.4y,no,no,1,60,0,nonexistent,no,2,jun,93.5,4.25\n",
            CSV_HEADER
        );
        write_zip(&config.input_dir.join("a.csv.zip"), &[("a.csv", whole.as_str())])?;
        write_zip(&config.input_dir.join("b.csv.zip"), &[("b.csv", fractional.as_str())])?;

        let report = run(&config)?;
        assert_eq!(
            fs::read_to_string(&report.outputs.economics)?,
            "client_id,cons_price_idx,euribor_three_months\n\
             1,94.0,4.0\n\
             2,93.5,4.25\n"
        );
        let client = fs::read_to_string(&report.outputs.client)?;
        assert_eq!(client.lines().nth(2), Some("2,,admin,single,basic_4y,0,0"));
        Ok(())
    }

    #[test]
    fn repeated_runs_are_byte_identical() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        write_zip(
            &config.input_dir.join("x.csv.zip"),
            &[("one.csv", table(&[1, 2]).as_str()), ("two.csv", table(&[3]).as_str())],
        )?;

        let first = run(&config)?;
        let before: Vec<Vec<u8>> = first.outputs.iter().map(fs::read).collect::<std::io::Result<_>>()?;
        let second = run(&config)?;
        let after: Vec<Vec<u8>> = second.outputs.iter().map(fs::read).collect::<std::io::Result<_>>()?;
        assert_eq!(before, after);
        assert_eq!(second.entries, 2);
        Ok(())
    }

    #[test]
    fn no_archives_gives_header_only_tables() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        let report = run(&config)?;
        assert_eq!(report.rows, 0);
        for path in report.outputs.iter() {
            let text = fs::read_to_string(path)?;
            assert_eq!(text.lines().count(), 1);
        }
        Ok(())
    }

    #[test]
    fn missing_input_folder_writes_nothing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = PipelineConfig::new(dir.path().join("absent"), dir.path().join("output"));
        let err = run(&config).unwrap_err();
        assert!(matches!(err, CleanError::MissingInputDirectory { .. }));
        assert!(!config.output_dir.exists());
        Ok(())
    }

    #[test]
    fn malformed_entry_aborts_without_partial_output() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = setup(dir.path())?;
        write_zip(&config.input_dir.join("a.csv.zip"), &[("a.csv", table(&[1]).as_str())])?;
        write_zip(
            &config.input_dir.join("b.csv.zip"),
            &[("b.csv", "client_id,age\n1,2\n")],
        )?;

        let err = run(&config).unwrap_err();
        assert!(matches!(err, CleanError::MalformedTable { .. }));
        assert!(!config.client_path().exists());
        assert!(!config.campaign_path().exists());
        assert!(!config.economics_path().exists());
        Ok(())
    }
}
