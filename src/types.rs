use std::collections::BTreeMap;

use serde::Serialize;

/// One row of an un-canonicalized table: CSV cell values keyed by header.
pub type RawRow = std::collections::HashMap<String, String>;

/// Canonical crop production row.
///
/// `production_tonnes` is `None` when the source value could not be parsed;
/// that is data, not an error. Negative values pass through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecord {
    pub state: String,
    pub district: Option<String>,
    pub crop: String,
    pub year: i32,
    pub production_tonnes: Option<f64>,
}

/// Canonical monthly rainfall row. `month` is kept as given (1-12 expected
/// but not validated); an unparseable rainfall value coerces to 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallRecord {
    pub state: String,
    pub year: i32,
    pub month: i32,
    pub rainfall_mm: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Rainfall summed over the months of one (state, year).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRainfall {
    pub state: String,
    pub year: i32,
    pub annual_rainfall_mm: f64,
}

/// Crop production totals left-joined with annual rainfall by (state, year).
/// `annual_rainfall_mm` is `None` where no rainfall was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegratedRecord {
    pub state: String,
    pub year: i32,
    pub production_tonnes: f64,
    pub annual_rainfall_mm: Option<f64>,
}

/// One entry of a ranked crop list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProduction {
    pub crop: String,
    pub production_tonnes: f64,
}

/// Static provenance entry for a dataset family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub name: String,
    pub url: String,
}

/// Per-region slice of a comparison answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub avg_annual_rainfall_mm: Option<f64>,
    pub top_crops: Vec<CropProduction>,
}

/// Successful answer to a supported question.
///
/// Field names and nesting are the stable contract for consumers; `years`
/// is the inclusive (min, max) window the comparison covered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResult {
    pub question: String,
    pub years: (i32, i32),
    pub results: BTreeMap<String, RegionReport>,
    pub citations: Vec<Citation>,
}

/// Degraded result for a question no template matches. Serializes with only
/// `question` and `error` keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedQuestion {
    pub question: String,
    pub error: String,
}

/// Either outcome of dispatch. Untagged so each side keeps its own shape on
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Report(AnswerResult),
    Unsupported(UnsupportedQuestion),
}
