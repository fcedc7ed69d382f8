//! CSV loading into raw string-keyed rows.
//!
//! The loader stays schema-agnostic: it hands every cell through as text,
//! keyed by the header exactly as the file spelled it, and leaves all
//! normalization to the canonicalizer.

use std::path::Path;

use csv::ReaderBuilder;

use crate::canon::{canonicalize_crop, canonicalize_rainfall};
use crate::error::QaResult;
use crate::types::{CropRecord, RainfallRecord, RawRow};

/// Read a CSV file into one `RawRow` per record, preserving row order.
pub fn read_raw_csv(path: &Path) -> QaResult<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded raw CSV");
    Ok(rows)
}

/// Load and canonicalize a crop production CSV.
pub fn load_crop_csv(path: &Path) -> QaResult<Vec<CropRecord>> {
    canonicalize_crop(&read_raw_csv(path)?, None)
}

/// Load and canonicalize a rainfall CSV.
pub fn load_rainfall_csv(path: &Path) -> QaResult<Vec<RainfallRecord>> {
    canonicalize_rainfall(&read_raw_csv(path)?, None)
}
