use crate::process::raw_table::Value;

/// Drop every `.`, then turn every `-` into `_`.
pub fn normalize_job(raw: &str) -> String {
    raw.replace('.', "").replace('-', "_")
}

/// Turn every `.` into `_`; `unknown` becomes no value.
pub fn normalize_education(raw: &str) -> Option<String> {
    let s = raw.replace('.', "_");
    if s == "unknown" {
        None
    } else {
        Some(s)
    }
}

/// 1 when the cell is exactly `truthy`, 0 for anything else including a missing cell.
pub fn binary_flag(value: &Value, truthy: &str) -> u8 {
    match value {
        Value::Text(s) if s == truthy => 1,
        _ => 0,
    }
}

pub fn yes_flag(value: &Value) -> u8 {
    binary_flag(value, "yes")
}

pub fn success_flag(value: &Value) -> u8 {
    binary_flag(value, "success")
}

pub fn job(value: &Value) -> Option<String> {
    value.as_text().map(|s| normalize_job(&s))
}

pub fn education(value: &Value) -> Option<String> {
    value.as_text().and_then(|s| normalize_education(&s))
}
