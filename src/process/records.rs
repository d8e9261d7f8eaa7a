// src/process/records.rs
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{CleanError, Result};
use crate::process::clean;
use crate::process::date_parser;
use crate::process::raw_table::{serialize_decimal, RawTable, Value};

/// A typed output row. `COLUMNS` is the header order, and must match the
/// serde field order of the struct.
pub trait Record: Serialize + Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Input columns the row is derived from, in the order `from_row` receives them.
    const SOURCE: &'static [&'static str];

    fn from_row(cells: &[&Value]) -> Self;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub client_id: Value,
    pub age: Option<i64>,
    pub job: Option<String>,
    pub marital: Value,
    pub education: Option<String>,
    pub credit_default: u8,
    pub mortgage: u8,
}

impl Record for ClientRecord {
    const TABLE: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortgage",
    ];
    const SOURCE: &'static [&'static str] = Self::COLUMNS;

    fn from_row(c: &[&Value]) -> Self {
        Self {
            client_id: c[0].clone(),
            age: c[1].as_int(),
            job: clean::job(c[2]),
            marital: c[3].clone(),
            education: clean::education(c[4]),
            credit_default: clean::yes_flag(c[5]),
            mortgage: clean::yes_flag(c[6]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    pub client_id: Value,
    pub number_contacts: Option<i64>,
    /// Seconds.
    pub contact_duration: Option<i64>,
    pub previous_campaign_contacts: Option<i64>,
    pub previous_outcome: u8,
    pub campaign_outcome: u8,
    pub last_contact_date: Option<NaiveDate>,
}

impl Record for CampaignRecord {
    const TABLE: &'static str = "campaign";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaign_contacts",
        "previous_outcome",
        "campaign_outcome",
        "last_contact_date",
    ];
    const SOURCE: &'static [&'static str] = &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaign_contacts",
        "previous_outcome",
        "campaign_outcome",
        "day",
        "month",
    ];

    fn from_row(c: &[&Value]) -> Self {
        let last_contact_date = date_parser::last_contact_date(c[6], c[7]);
        if last_contact_date.is_none() {
            debug!(client_id = ?c[0], day = ?c[6], month = ?c[7], "no valid contact date");
        }
        Self {
            client_id: c[0].clone(),
            number_contacts: c[1].as_int(),
            contact_duration: c[2].as_int(),
            previous_campaign_contacts: c[3].as_int(),
            previous_outcome: clean::success_flag(c[4]),
            campaign_outcome: clean::yes_flag(c[5]),
            last_contact_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsRecord {
    pub client_id: Value,
    #[serde(serialize_with = "serialize_decimal")]
    pub cons_price_idx: Option<f64>,
    #[serde(serialize_with = "serialize_decimal")]
    pub euribor_three_months: Option<f64>,
}

impl Record for EconomicsRecord {
    const TABLE: &'static str = "economics";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "cons_price_idx", "euribor_three_months"];
    const SOURCE: &'static [&'static str] = Self::COLUMNS;

    fn from_row(c: &[&Value]) -> Self {
        Self {
            client_id: c[0].clone(),
            cons_price_idx: c[1].as_decimal(),
            euribor_three_months: c[2].as_decimal(),
        }
    }
}

/// Transformed rows of one inner entry, tagged with the columns they carry.
#[derive(Debug)]
pub struct Batch<R> {
    pub columns: Vec<String>,
    pub rows: Vec<R>,
}

/// Project `R::SOURCE` out of `table` and apply the row transform to every row.
pub fn transform<R: Record>(table: &RawTable) -> Result<Batch<R>> {
    let mut idx = Vec::with_capacity(R::SOURCE.len());
    for name in R::SOURCE {
        match table.column_index(name) {
            Some(i) => idx.push(i),
            None => {
                return Err(CleanError::SchemaMismatch {
                    table: R::TABLE,
                    expected: R::SOURCE.iter().map(|s| s.to_string()).collect(),
                    found: table.headers.clone(),
                })
            }
        }
    }

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<&Value> = idx.iter().map(|&i| &row[i]).collect();
            R::from_row(&cells)
        })
        .collect();

    Ok(Batch {
        columns: R::COLUMNS.iter().map(|s| s.to_string()).collect(),
        rows,
    })
}
