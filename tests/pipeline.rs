//! End-to-end pipeline tests over the shipped sample datasets.

use std::collections::BTreeSet;
use std::path::PathBuf;

use agri_qa::aggregate::{aggregate_annual_rainfall, integrate_crop_and_rainfall};
use agri_qa::engine::answer;
use agri_qa::loader::{load_crop_csv, load_rainfall_csv};
use agri_qa::types::Answer;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}

#[test]
fn sample_csvs_canonicalize_through_synonym_headers() {
    // The samples use `Production` and `Rain_mm` headers, so loading
    // exercises the fallback synonyms end to end.
    let crops = load_crop_csv(&data_path("sample_crop_production.csv")).unwrap();
    let rainfall = load_rainfall_csv(&data_path("sample_rainfall.csv")).unwrap();
    assert_eq!(crops.len(), 12);
    assert!(crops.iter().all(|c| c.production_tonnes.is_some()));
    assert!(crops.iter().all(|c| c.district.is_some()));
    assert_eq!(rainfall.len(), 11);
    assert!(rainfall.iter().all(|r| r.rainfall_mm > 0.0));
    assert!(rainfall.iter().all(|r| r.latitude.is_some()));
}

#[test]
fn compare_question_end_to_end() {
    let crops = load_crop_csv(&data_path("sample_crop_production.csv")).unwrap();
    let rainfall = load_rainfall_csv(&data_path("sample_rainfall.csv")).unwrap();
    let result = answer(
        "Compare rainfall in Maharashtra and Karnataka for the last 2 years and list top 2 crops",
        &crops,
        &rainfall,
    )
    .unwrap();
    let Answer::Report(report) = result else {
        panic!("expected report outcome");
    };
    assert_eq!(report.years, (2020, 2021));
    for region in ["Maharashtra", "Karnataka"] {
        let summary = &report.results[region];
        assert!(summary.avg_annual_rainfall_mm.is_some());
        assert!(!summary.top_crops.is_empty());
        assert!(summary.top_crops.len() <= 2);
    }
    // Karnataka 2020-2021: Rice 4080 ahead of Maize 1500.
    assert_eq!(report.results["Karnataka"].top_crops[0].crop, "Rice");
    assert_eq!(report.citations.len(), 2);
}

#[test]
fn unsupported_question_keeps_the_degraded_shape() {
    let crops = load_crop_csv(&data_path("sample_crop_production.csv")).unwrap();
    let rainfall = load_rainfall_csv(&data_path("sample_rainfall.csv")).unwrap();
    let result = answer("What is the capital of France?", &crops, &rainfall).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["question"], "What is the capital of France?");
    assert!(json.get("error").is_some());
    assert!(json.get("results").is_none());
}

#[test]
fn integration_covers_every_crop_state_year() {
    let crops = load_crop_csv(&data_path("sample_crop_production.csv")).unwrap();
    let rainfall = load_rainfall_csv(&data_path("sample_rainfall.csv")).unwrap();
    let annual = aggregate_annual_rainfall(&rainfall);
    let merged = integrate_crop_and_rainfall(&crops, &annual);

    let crop_keys: BTreeSet<(String, i32)> =
        crops.iter().map(|c| (c.state.clone(), c.year)).collect();
    assert_eq!(merged.len(), crop_keys.len());
    // Every state in the samples has rainfall rows for both years.
    assert!(merged.iter().all(|m| m.annual_rainfall_mm.is_some()));
}
