//! Tolerant field decoders for spreadsheet-backed payloads.
//!
//! Apps Script serializes cell values as whatever type the sheet holds, so
//! a count can arrive as `7`, `7.0`, `"7"` or `null`, and an employee code
//! typed into a numeric column arrives as a number.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Non-negative count. Unparsable or missing values decode to 0.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_count(deserializer)?.unwrap_or(0))
}

/// Like [`count`] but `None` when the cell holds no number at all.
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<Cell>::deserialize(deserializer)?;
    Ok(match cell {
        Some(Cell::Int(n)) => Some(n.max(0) as u64),
        Some(Cell::Float(f)) => Some(float_count(f)),
        Some(Cell::Text(s)) => s.trim().parse::<f64>().ok().map(float_count),
        Some(Cell::Bool(_)) | None => None,
    })
}

/// Cell rendered as text. `null` decodes to an empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<Cell>::deserialize(deserializer)?;
    Ok(match cell {
        Some(Cell::Text(s)) => s,
        Some(Cell::Int(n)) => n.to_string(),
        Some(Cell::Float(f)) => f.to_string(),
        Some(Cell::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

/// Like [`text`] but keeps absence distinct from an empty cell.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = text(deserializer)?;
    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}

fn float_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.round() as u64
    } else {
        0
    }
}
