//! Temporal and spatial aggregation over the canonical tables.
//!
//! Three pure operations plus the shared ranking helper. Grouping uses
//! `BTreeMap` so group iteration is ascending by key; combined with the
//! stable descending sort in [`rank_crops`], ties rank alphabetically.
//!
//! Case policy is per-operation: the (state, year) group/join keys here are
//! exact-string, while the crop filter in [`top_crops_by_state_year`]
//! matches state case-insensitively.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::types::{AnnualRainfall, CropProduction, CropRecord, IntegratedRecord, RainfallRecord};

/// Sum monthly rainfall into one row per (state, year).
///
/// Output is ordered ascending by (state, year). The total over all output
/// rows equals the total over all input rows.
pub fn aggregate_annual_rainfall(rows: &[RainfallRecord]) -> Vec<AnnualRainfall> {
    let mut totals: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in rows {
        *totals.entry((r.state.clone(), r.year)).or_insert(0.0) += r.rainfall_mm;
    }
    totals
        .into_iter()
        .map(|((state, year), annual_rainfall_mm)| AnnualRainfall {
            state,
            year,
            annual_rainfall_mm,
        })
        .collect()
}

/// Group the given crop rows by crop name, sum production, rank descending
/// and truncate. A `None` production contributes nothing to its crop's sum
/// but still creates the group.
pub fn rank_crops<'a, I>(rows: I, top_n: usize) -> Vec<CropProduction>
where
    I: IntoIterator<Item = &'a CropRecord>,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in rows {
        let entry = totals.entry(r.crop.clone()).or_insert(0.0);
        if let Some(p) = r.production_tonnes {
            *entry += p;
        }
    }
    let mut ranked: Vec<CropProduction> = totals
        .into_iter()
        .map(|(crop, production_tonnes)| CropProduction {
            crop,
            production_tonnes,
        })
        .collect();
    // Stable sort over the alphabetical group order: ties stay alphabetical.
    ranked.sort_by(|a, b| {
        b.production_tonnes
            .partial_cmp(&a.production_tonnes)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

/// Top `top_n` crops by summed production for one state and year.
///
/// The state filter is case-insensitive; the year must match exactly.
pub fn top_crops_by_state_year(
    rows: &[CropRecord],
    state: &str,
    year: i32,
    top_n: usize,
) -> Vec<CropProduction> {
    let state_lc = state.to_lowercase();
    rank_crops(
        rows.iter()
            .filter(|r| r.year == year && r.state.to_lowercase() == state_lc),
        top_n,
    )
}

/// Sum crop production by (state, year) and left-join annual rainfall on the
/// exact-string key. Every (state, year) present in the crop table survives;
/// a missing rainfall match yields `None`, never a dropped row.
pub fn integrate_crop_and_rainfall(
    crop_rows: &[CropRecord],
    annual_rainfall: &[AnnualRainfall],
) -> Vec<IntegratedRecord> {
    let mut produced: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in crop_rows {
        let entry = produced.entry((r.state.clone(), r.year)).or_insert(0.0);
        if let Some(p) = r.production_tonnes {
            *entry += p;
        }
    }
    let rainfall: HashMap<(&str, i32), f64> = annual_rainfall
        .iter()
        .map(|a| ((a.state.as_str(), a.year), a.annual_rainfall_mm))
        .collect();
    produced
        .into_iter()
        .map(|((state, year), production_tonnes)| {
            let annual_rainfall_mm = rainfall.get(&(state.as_str(), year)).copied();
            IntegratedRecord {
                state,
                year,
                production_tonnes,
                annual_rainfall_mm,
            }
        })
        .collect()
}
