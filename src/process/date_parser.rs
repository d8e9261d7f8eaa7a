use chrono::NaiveDate;

use crate::process::raw_table::Value;

/// Every contact in the dataset happened in this year.
pub const CONTACT_YEAR: i32 = 2022;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// `"jul"` / `"JUL"` → 7. Only the three-letter English abbreviations match.
pub fn month_number(abbrev: &str) -> Option<u32> {
    let abbrev = abbrev.trim().to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

fn day_number(day: &Value) -> Option<u32> {
    match day {
        Value::Int(d) => u32::try_from(*d).ok(),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Float(_) | Value::Missing => None,
    }
}

/// Combine `day` and `month` with [`CONTACT_YEAR`]. `None` when the cells do
/// not form a real calendar date (`31-feb`, unknown month, missing day).
pub fn last_contact_date(day: &Value, month: &Value) -> Option<NaiveDate> {
    let d = day_number(day)?;
    let m = month.as_text().and_then(|s| month_number(&s))?;
    NaiveDate::from_ymd_opt(CONTACT_YEAR, m, d)
}
