//! In-memory aggregation over an already-fetched record list.
//!
//! Grouping uses `BTreeMap` so output is sorted by the grouping key
//! ascending without a separate sort pass. No additional queries happen
//! here.

use std::collections::{BTreeMap, BTreeSet};

use geodash_core::color::color_for_key;
use geodash_core::types::{DimensionRecord, DistrictSummary, ZoneSummary};

use super::{NO_DISTRICT, NO_ZONE};

/// Sample size retained per zone, in insertion order.
const ZONE_SAMPLE_SIZE: usize = 5;

#[derive(Default)]
struct ZoneAccumulator {
    count: u64,
    districts: BTreeSet<String>,
    sample: Vec<DimensionRecord>,
}

/// Groups records by zone (sentinel "no zone" when absent or empty).
///
/// Each summary carries the total count, the number of distinct non-empty
/// districts seen, and the first 5 records encountered.
/// The zone color is keyed by the zone name, independent of the
/// per-record district colors. Output is sorted by zone ascending.
#[must_use]
pub fn summarize_by_zone(records: &[DimensionRecord]) -> Vec<ZoneSummary> {
    let mut grouped: BTreeMap<String, ZoneAccumulator> = BTreeMap::new();

    for record in records {
        let zone = group_key(record.zone.as_deref(), NO_ZONE);
        let entry = grouped.entry(zone).or_default();
        entry.count += 1;
        if let Some(district) = record.district.as_deref() {
            if !district.is_empty() {
                entry.districts.insert(district.to_string());
            }
        }
        if entry.sample.len() < ZONE_SAMPLE_SIZE {
            entry.sample.push(record.clone());
        }
    }

    grouped
        .into_iter()
        .map(|(zone, acc)| ZoneSummary {
            color: color_for_key(&zone).to_string(),
            zone,
            count: acc.count,
            district_count: acc.districts.len() as u64,
            sample: acc.sample,
        })
        .collect()
}

/// Groups records by district (sentinel "no district" when absent or
/// empty) with a total count and a color keyed by the district name.
/// Output is sorted by district ascending.
#[must_use]
pub fn summarize_by_district(records: &[DimensionRecord]) -> Vec<DistrictSummary> {
    let mut grouped: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        let district = group_key(record.district.as_deref(), NO_DISTRICT);
        *grouped.entry(district).or_default() += 1;
    }

    grouped
        .into_iter()
        .map(|(district, count)| DistrictSummary {
            color: color_for_key(&district).to_string(),
            district,
            count,
        })
        .collect()
}

fn group_key(value: Option<&str>, sentinel: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}
