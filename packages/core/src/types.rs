//! Wire types for the reporting endpoints.
//!
//! All of these are request-scoped: built from one fetch, serialized into
//! the response envelope, then discarded. Optional fields mirror columns
//! that may be NULL in the backing table.

use serde::{Deserialize, Serialize};

use crate::geometry::LatLng;

/// One geolocated sensor reading from the primary dimension table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// Reading or device name.
    pub name: Option<String>,
    /// Zone-level geographic grouping.
    pub zone: Option<String>,
    /// District-level geographic grouping.
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Measured value, absent when the source column is NULL.
    pub value: Option<f64>,
    /// Palette color derived from the district key.
    pub color: String,
}

/// Per-zone aggregate over one fetch of dimension records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone: String,
    /// Palette color derived from the zone key.
    pub color: String,
    /// Total records grouped under this zone.
    pub count: u64,
    /// Distinct non-empty districts seen under this zone.
    pub district_count: u64,
    /// First 5 records encountered, in insertion order.
    pub sample: Vec<DimensionRecord>,
}

/// Per-district aggregate over one fetch of dimension records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub district: String,
    pub color: String,
    pub count: u64,
}

/// District boundary: outer rings only, holes discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictPolygon {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    /// Palette color keyed by name, falling back to code, then id.
    pub color: String,
    /// One point list per polygon of the source multi-polygon.
    pub polygons: Vec<Vec<LatLng>>,
}

/// One raw point for client-rendered density visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    /// Always 1: no server-side spatial binning is performed.
    pub count: u32,
    pub device_id: Option<i64>,
}

/// One id/name entry from a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: i64,
    pub name: String,
}

/// Option lists for the six fixed filter categories.
///
/// Every field is always present in the response; a category whose lookup
/// query failed degrades to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionSets {
    pub moments: Vec<FilterOption>,
    pub altitude_levels: Vec<FilterOption>,
    pub signal_levels: Vec<FilterOption>,
    pub speed_levels: Vec<FilterOption>,
    pub operators: Vec<FilterOption>,
    pub networks: Vec<FilterOption>,
}
