//! Question dispatch and the compare-rainfall-and-top-crops handler.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::aggregate::{aggregate_annual_rainfall, rank_crops};
use crate::error::{QaError, QaResult};
use crate::parse::parse_compare_rainfall_question;
use crate::types::{
    Answer, AnswerResult, Citation, CropRecord, RainfallRecord, RegionReport, UnsupportedQuestion,
};
use crate::util::average;

/// Static dataset provenance, attached to every successful answer. Read-only
/// after first access; describes the dataset families, not per-row lineage.
static PROVENANCE: Lazy<Vec<Citation>> = Lazy::new(|| {
    vec![
        Citation {
            name: "IMD Rainfall (placeholder)".to_string(),
            url: "docs/data_sources.md#rainfall-dataset".to_string(),
        },
        Citation {
            name: "Ministry of Agriculture - Crop Production (placeholder)".to_string(),
            url: "docs/data_sources.md#crop-production-dataset".to_string(),
        },
    ]
});

/// Answer a natural-language question over the canonical tables.
///
/// Dispatch is by keyword presence: a question containing both "compare" and
/// "rainfall" (case-insensitive) routes to the comparison handler; anything
/// else comes back as [`Answer::Unsupported`] rather than an error.
///
/// # Errors
///
/// Propagates [`QaError::Precondition`] when both tables are empty, since a
/// year window cannot be computed from nothing.
pub fn answer(
    question: &str,
    crop_rows: &[CropRecord],
    rainfall_rows: &[RainfallRecord],
) -> QaResult<Answer> {
    let q_lower = question.to_lowercase();
    if q_lower.contains("compare") && q_lower.contains("rainfall") {
        tracing::debug!(question, "dispatching to compare-rainfall handler");
        Ok(Answer::Report(compare_rainfall_and_top_crops(
            question,
            crop_rows,
            rainfall_rows,
        )?))
    } else {
        tracing::debug!(question, "no template matched");
        Ok(Answer::Unsupported(UnsupportedQuestion {
            question: question.to_string(),
            error: "Question type not supported by the simple engine yet.".to_string(),
        }))
    }
}

fn compare_rainfall_and_top_crops(
    question: &str,
    crop_rows: &[CropRecord],
    rainfall_rows: &[RainfallRecord],
) -> QaResult<AnswerResult> {
    let parsed = parse_compare_rainfall_question(question);

    let max_year = crop_rows
        .iter()
        .map(|r| r.year)
        .chain(rainfall_rows.iter().map(|r| r.year))
        .max()
        .ok_or_else(|| {
            QaError::Precondition("cannot determine year bounds from empty tables".to_string())
        })?;
    let min_year = max_year - parsed.lookback_years + 1;
    tracing::debug!(min_year, max_year, regions = ?parsed.regions, "comparison window");

    let window: Vec<RainfallRecord> = rainfall_rows
        .iter()
        .filter(|r| (min_year..=max_year).contains(&r.year))
        .cloned()
        .collect();
    let annual = aggregate_annual_rainfall(&window);

    let mut results = BTreeMap::new();
    for region in &parsed.regions {
        let region_lc = region.to_lowercase();
        // Two independent case-insensitive filters, one per table.
        let rainfall_values: Vec<f64> = annual
            .iter()
            .filter(|a| a.state.to_lowercase() == region_lc)
            .map(|a| a.annual_rainfall_mm)
            .collect();
        let avg_annual_rainfall_mm = if rainfall_values.is_empty() {
            None
        } else {
            Some(average(&rainfall_values))
        };
        let top_crops = rank_crops(
            crop_rows.iter().filter(|r| {
                r.state.to_lowercase() == region_lc && (min_year..=max_year).contains(&r.year)
            }),
            parsed.top_n,
        );
        results.insert(
            region.clone(),
            RegionReport {
                avg_annual_rainfall_mm,
                top_crops,
            },
        );
    }

    Ok(AnswerResult {
        question: question.to_string(),
        years: (min_year, max_year),
        results,
        citations: PROVENANCE.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(state: &str, year: i32, name: &str, production: f64) -> CropRecord {
        CropRecord {
            state: state.to_string(),
            district: None,
            crop: name.to_string(),
            year,
            production_tonnes: Some(production),
        }
    }

    fn rain(state: &str, year: i32, month: i32, mm: f64) -> RainfallRecord {
        RainfallRecord {
            state: state.to_string(),
            year,
            month,
            rainfall_mm: mm,
            latitude: None,
            longitude: None,
        }
    }

    fn sample() -> (Vec<CropRecord>, Vec<RainfallRecord>) {
        let crops = vec![
            crop("Maharashtra", 2020, "Wheat", 100.0),
            crop("Maharashtra", 2021, "Wheat", 150.0),
            crop("Maharashtra", 2021, "Rice", 400.0),
            crop("Karnataka", 2020, "Rice", 200.0),
            crop("Karnataka", 2018, "Ragi", 900.0),
        ];
        let rainfall = vec![
            rain("Maharashtra", 2020, 6, 500.0),
            rain("Maharashtra", 2020, 7, 300.0),
            rain("Maharashtra", 2021, 6, 600.0),
            rain("Karnataka", 2020, 6, 400.0),
        ];
        (crops, rainfall)
    }

    #[test]
    fn unsupported_questions_return_structured_error_value() {
        let (crops, rainfall) = sample();
        let result = answer("What is the capital of France?", &crops, &rainfall).unwrap();
        let Answer::Unsupported(u) = result else {
            panic!("expected unsupported outcome");
        };
        assert_eq!(u.question, "What is the capital of France?");
        assert!(!u.error.is_empty());
        // Contract: the degraded shape has no `results` key.
        let json = serde_json::to_value(Answer::Unsupported(u)).unwrap();
        assert!(json.get("results").is_none());
        assert!(json.get("error").is_some());
    }

    #[test]
    fn compare_answer_windows_and_ranks_per_region() {
        let (crops, rainfall) = sample();
        let result = answer(
            "Compare rainfall in Maharashtra and Karnataka for the last 2 years",
            &crops,
            &rainfall,
        )
        .unwrap();
        let Answer::Report(report) = result else {
            panic!("expected report outcome");
        };
        assert_eq!(report.years, (2020, 2021));

        let mh = &report.results["Maharashtra"];
        // 2020 annual = 800, 2021 annual = 600 -> mean 700.
        assert_eq!(mh.avg_annual_rainfall_mm, Some(700.0));
        // Over 2020-2021: Rice 400, Wheat 250.
        assert_eq!(mh.top_crops[0].crop, "Rice");
        assert_eq!(mh.top_crops[1].crop, "Wheat");
        assert_eq!(mh.top_crops[1].production_tonnes, 250.0);

        let ka = &report.results["Karnataka"];
        assert_eq!(ka.avg_annual_rainfall_mm, Some(400.0));
        // 2018 Ragi falls outside the window.
        assert_eq!(ka.top_crops.len(), 1);
        assert_eq!(ka.top_crops[0].crop, "Rice");

        assert_eq!(report.citations.len(), 2);
        assert_eq!(report.citations[0].name, "IMD Rainfall (placeholder)");
    }

    #[test]
    fn region_without_data_gets_null_average_and_empty_crops() {
        let (crops, rainfall) = sample();
        let result = answer(
            "Compare rainfall in Maharashtra and Atlantis for the last 2 years",
            &crops,
            &rainfall,
        )
        .unwrap();
        let Answer::Report(report) = result else {
            panic!("expected report outcome");
        };
        let lost = &report.results["Atlantis"];
        assert_eq!(lost.avg_annual_rainfall_mm, None);
        assert!(lost.top_crops.is_empty());
    }

    #[test]
    fn region_matching_is_case_insensitive_in_both_filters() {
        let crops = vec![crop("MAHARASHTRA", 2021, "Wheat", 10.0)];
        let rainfall = vec![rain("maharashtra", 2021, 6, 100.0)];
        let result = answer(
            "Compare rainfall in Maharashtra for the last 1 years",
            &crops,
            &rainfall,
        )
        .unwrap();
        let Answer::Report(report) = result else {
            panic!("expected report outcome");
        };
        let mh = &report.results["Maharashtra"];
        assert_eq!(mh.avg_annual_rainfall_mm, Some(100.0));
        assert_eq!(mh.top_crops.len(), 1);
    }

    #[test]
    fn empty_tables_violate_the_precondition() {
        let err = answer("Compare rainfall in Goa for the last 2 years", &[], &[]).unwrap_err();
        assert!(matches!(err, QaError::Precondition(_)));
    }

    #[test]
    fn max_year_considers_both_tables() {
        // Crop data reaches 2023 while rainfall stops at 2021: the window is
        // anchored on the overall maximum.
        let crops = vec![crop("Goa", 2023, "Cashew", 5.0)];
        let rainfall = vec![rain("Goa", 2021, 6, 50.0)];
        let result = answer("Compare rainfall in Goa for the last 2 years", &crops, &rainfall)
            .unwrap();
        let Answer::Report(report) = result else {
            panic!("expected report outcome");
        };
        assert_eq!(report.years, (2022, 2023));
        let goa = &report.results["Goa"];
        assert_eq!(goa.avg_annual_rainfall_mm, None);
        assert_eq!(goa.top_crops.len(), 1);
    }
}
