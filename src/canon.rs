//! Column canonicalization for the two record kinds.
//!
//! Raw tables arrive as string-keyed rows with whatever headers the source
//! used. Canonicalization runs fixed stages in order: explicit renames,
//! header lowercasing/trimming, built-in synonym fallbacks, type coercion,
//! and projection onto the canonical columns. Row order is preserved and
//! the input is never mutated.

use std::collections::HashMap;

use crate::error::{QaError, QaResult};
use crate::types::{CropRecord, RainfallRecord, RawRow};
use crate::util::{parse_f64_safe, parse_i32_safe};

/// Canonical crop columns, in schema order.
pub const CROP_COLUMNS: [&str; 5] = ["state", "district", "crop", "year", "production_tonnes"];

/// Canonical rainfall columns, in schema order.
pub const RAINFALL_COLUMNS: [&str; 6] = [
    "state",
    "year",
    "month",
    "rainfall_mm",
    "latitude",
    "longitude",
];

// Fallback header synonyms, applied only when the canonical name is absent.
const CROP_SYNONYMS: [(&str, &str); 1] = [("production", "production_tonnes")];
const RAINFALL_SYNONYMS: [(&str, &str); 2] = [("rain", "rainfall_mm"), ("rain_mm", "rainfall_mm")];

/// Rename, lowercase and apply synonym fallbacks to one row's headers.
fn normalize_headers(
    row: &RawRow,
    col_map: Option<&HashMap<String, String>>,
    synonyms: &[(&str, &str)],
) -> RawRow {
    let mut out = RawRow::new();
    for (name, value) in row {
        // Explicit renames run against the as-given header names.
        let renamed = col_map
            .and_then(|m| m.get(name))
            .cloned()
            .unwrap_or_else(|| name.clone());
        out.insert(renamed.to_lowercase().trim().to_string(), value.clone());
    }
    for (alias, canonical) in synonyms {
        if !out.contains_key(*canonical) {
            if let Some(value) = out.remove(*alias) {
                out.insert((*canonical).to_string(), value);
            }
        }
    }
    out
}

fn require<'a>(row: &'a RawRow, column: &str) -> QaResult<&'a str> {
    row.get(column)
        .map(|s| s.as_str())
        .ok_or_else(|| QaError::malformed(column, "<missing>"))
}

/// Coerce a column that must hold an integer. Missing or non-coercible
/// values are hard errors, not skipped rows.
fn require_i32(row: &RawRow, column: &str) -> QaResult<i32> {
    let raw = require(row, column)?;
    parse_i32_safe(Some(raw)).ok_or_else(|| QaError::malformed(column, raw))
}

fn optional_string(row: &RawRow, column: &str) -> Option<String> {
    row.get(column)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Canonicalize arbitrary rows into [`CropRecord`]s.
///
/// `col_map` optionally renames source headers (as given) to canonical names
/// before the built-in lowercasing and synonyms apply. Unparseable
/// production values become `None`; a bad `year` is a hard error.
pub fn canonicalize_crop(
    rows: &[RawRow],
    col_map: Option<&HashMap<String, String>>,
) -> QaResult<Vec<CropRecord>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let row = normalize_headers(row, col_map, &CROP_SYNONYMS);
        out.push(CropRecord {
            state: require(&row, "state")?.to_string(),
            district: optional_string(&row, "district"),
            crop: require(&row, "crop")?.to_string(),
            year: require_i32(&row, "year")?,
            production_tonnes: parse_f64_safe(row.get("production_tonnes").map(String::as_str)),
        });
    }
    Ok(out)
}

/// Canonicalize arbitrary rows into [`RainfallRecord`]s.
///
/// Same staging as [`canonicalize_crop`]; the measure policy differs on
/// purpose: unparseable rainfall coerces to `0.0` where unparseable
/// production becomes `None`.
pub fn canonicalize_rainfall(
    rows: &[RawRow],
    col_map: Option<&HashMap<String, String>>,
) -> QaResult<Vec<RainfallRecord>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let row = normalize_headers(row, col_map, &RAINFALL_SYNONYMS);
        out.push(RainfallRecord {
            state: require(&row, "state")?.to_string(),
            year: require_i32(&row, "year")?,
            month: require_i32(&row, "month")?,
            rainfall_mm: parse_f64_safe(row.get("rainfall_mm").map(String::as_str)).unwrap_or(0.0),
            latitude: parse_f64_safe(row.get("latitude").map(String::as_str)),
            longitude: parse_f64_safe(row.get("longitude").map(String::as_str)),
        });
    }
    Ok(out)
}
