// src/merge.rs
use tracing::debug;

use crate::error::{CleanError, Result};
use crate::process::raw_table::RawTable;
use crate::process::records::{
    transform, Batch, CampaignRecord, ClientRecord, EconomicsRecord, Record,
};

/// All rows of one output table, in the order their batches arrived.
#[derive(Debug)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> Table<R> {
    /// Append a batch after checking it carries exactly `R::COLUMNS`.
    pub fn append(&mut self, batch: Batch<R>) -> Result<()> {
        if batch.columns.iter().map(String::as_str).ne(R::COLUMNS.iter().copied()) {
            return Err(CleanError::SchemaMismatch {
                table: R::TABLE,
                expected: R::COLUMNS.iter().map(|s| s.to_string()).collect(),
                found: batch.columns,
            });
        }
        debug!(table = R::TABLE, rows = batch.rows.len(), "appending batch");
        self.rows.extend(batch.rows);
        Ok(())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three accumulators of one run.
#[derive(Debug, Default)]
pub struct Merged {
    pub client: Table<ClientRecord>,
    pub campaign: Table<CampaignRecord>,
    pub economics: Table<EconomicsRecord>,
}

impl Merged {
    /// Fan one raw batch out to the three pipelines and append the results.
    /// Nothing is appended unless all three transforms succeed.
    pub fn absorb(mut self, table: &RawTable) -> Result<Self> {
        let client = transform::<ClientRecord>(table)?;
        let campaign = transform::<CampaignRecord>(table)?;
        let economics = transform::<EconomicsRecord>(table)?;
        self.client.append(client)?;
        self.campaign.append(campaign)?;
        self.economics.append(economics)?;
        Ok(self)
    }
}
