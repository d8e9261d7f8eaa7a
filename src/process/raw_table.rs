use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Field values that read as "no value". Matched exactly, untrimmed.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One typed cell. The variant is fixed when the batch is parsed, never
/// re-inferred at a transform site.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Integer view: integers, whole decimals and integer text. Anything
    /// else has no integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Float(_) | Value::Missing => None,
        }
    }

    /// Decimal view: any number, or text that parses as one.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Missing => None,
        }
    }

    /// Text view of the cell; numbers are rendered the way they are written out.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Int(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) => Some(Cow::Owned(format_float(*f))),
            Value::Missing => None,
        }
    }
}

/// Shortest round-trip form, but integral values keep one fractional digit.
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// `serialize_with` for decimal columns, so `94` is written `94.0`.
pub fn serialize_decimal<S: Serializer>(
    v: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match v {
        Some(f) => serializer.serialize_str(&format_float(*f)),
        None => serializer.serialize_none(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_str(&format_float(*f)),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

/// All rows of one inner CSV entry, with cells typed per column.
#[derive(Debug)]
pub struct RawTable {
    /// Column names, from the header line of the entry.
    pub headers: Vec<String>,
    /// One `Vec<Value>` per data line, always `headers.len()` long.
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Types every column from its raw fields: integer if every present
    /// field is an integer, decimal if every present field is a number,
    /// otherwise text.
    pub fn from_fields(headers: Vec<String>, fields: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let kinds: Vec<ColumnKind> = (0..width)
            .map(|col| column_kind(fields.iter().filter_map(|r| r.get(col))))
            .collect();

        let rows = fields
            .into_iter()
            .map(|mut raw| {
                raw.resize(width, String::new());
                raw.into_iter()
                    .zip(&kinds)
                    .map(|(field, kind)| typed_value(field, *kind))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_na(field: &str) -> bool {
    NA_TOKENS.contains(&field)
}

fn column_kind<'a>(fields: impl Iterator<Item = &'a String>) -> ColumnKind {
    let mut kind = ColumnKind::Int;
    for f in fields.filter(|f| !is_na(f)) {
        let t = f.trim();
        if kind == ColumnKind::Int && t.parse::<i64>().is_ok() {
            continue;
        }
        if t.parse::<f64>().is_ok() {
            kind = ColumnKind::Float;
        } else {
            return ColumnKind::Text;
        }
    }
    kind
}

fn typed_value(field: String, kind: ColumnKind) -> Value {
    if is_na(&field) {
        return Value::Missing;
    }
    match kind {
        ColumnKind::Int => field
            .trim()
            .parse()
            .map(Value::Int)
            .unwrap_or(Value::Text(field)),
        ColumnKind::Float => field
            .trim()
            .parse()
            .map(Value::Float)
            .unwrap_or(Value::Text(field)),
        ColumnKind::Text => Value::Text(field),
    }
}
