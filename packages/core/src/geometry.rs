//! Tolerant multi-polygon boundary parsing.
//!
//! District boundaries are stored as GeoJSON-shaped text:
//! `{"coordinates": [[[ [lng, lat], ... ], ...holes ], ...]}`. Only the
//! outer ring (index 0) of each polygon is kept. Parsing is deliberately
//! lossy rather than strict: a bad coordinate pair is skipped, a polygon
//! with no surviving points is omitted, and unparseable text yields an
//! empty list. One malformed row must never abort a whole fetch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single boundary vertex. Note the source pairs are `[lng, lat]`;
/// output is `{lat, lng}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Extracts the outer ring of every polygon in a multi-polygon text field.
///
/// Returns one point list per polygon that had at least one convertible
/// coordinate pair. Malformed JSON, a missing or non-array `coordinates`
/// key, and unconvertible pairs all degrade to smaller (possibly empty)
/// output, never an error.
#[must_use]
pub fn parse_outer_rings(geojson: &str) -> Vec<Vec<LatLng>> {
    let Ok(data) = serde_json::from_str::<Value>(geojson) else {
        return Vec::new();
    };
    let Some(polygons) = data.get("coordinates").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut parsed = Vec::new();
    for polygon in polygons {
        // Ring 0 is the outer boundary; subsequent rings are holes.
        let Some(outer_ring) = polygon.get(0).and_then(Value::as_array) else {
            continue;
        };
        let mut path = Vec::new();
        for point in outer_ring {
            let (Some(lng), Some(lat)) = (coord(point.get(0)), coord(point.get(1))) else {
                continue;
            };
            path.push(LatLng { lat, lng });
        }
        if !path.is_empty() {
            parsed.push(path);
        }
    }
    parsed
}

/// Converts a coordinate component that may be a JSON number or a numeric
/// string.
fn coord(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_polygon_single_ring() {
        let rings = parse_outer_rings(r#"{"coordinates":[[[[10.0,20.0],[11.0,21.0]]]]}"#);
        assert_eq!(
            rings,
            vec![vec![
                LatLng {
                    lat: 20.0,
                    lng: 10.0
                },
                LatLng {
                    lat: 21.0,
                    lng: 11.0
                },
            ]]
        );
    }

    #[test]
    fn holes_are_discarded() {
        let text = r#"{"coordinates":[[
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            [[0.2, 0.2], [0.8, 0.2], [0.8, 0.8]]
        ]]}"#;
        let rings = parse_outer_rings(text);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn multiple_polygons() {
        let text = r#"{"coordinates":[
            [[[1.0, 2.0]]],
            [[[3.0, 4.0]]]
        ]}"#;
        let rings = parse_outer_rings(text);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][0], LatLng { lat: 4.0, lng: 3.0 });
    }

    #[test]
    fn numeric_strings_convert() {
        let rings = parse_outer_rings(r#"{"coordinates":[[[["10.5","20.5"]]]]}"#);
        assert_eq!(
            rings,
            vec![vec![LatLng {
                lat: 20.5,
                lng: 10.5
            }]]
        );
    }

    #[test]
    fn bad_pair_is_skipped_not_fatal() {
        let text = r#"{"coordinates":[[[[10.0,20.0],["x","y"],[11.0,21.0]]]]}"#;
        let rings = parse_outer_rings(text);
        assert_eq!(rings[0].len(), 2);
    }

    #[test]
    fn polygon_with_no_surviving_points_is_omitted() {
        let text = r#"{"coordinates":[
            [[["x","y"]]],
            [[[1.0, 2.0]]]
        ]}"#;
        let rings = parse_outer_rings(text);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0], LatLng { lat: 2.0, lng: 1.0 });
    }

    #[test]
    fn malformed_json_yields_empty() {
        assert!(parse_outer_rings("not json at all").is_empty());
        assert!(parse_outer_rings("").is_empty());
    }

    #[test]
    fn missing_or_wrong_coordinates_key_yields_empty() {
        assert!(parse_outer_rings("{}").is_empty());
        assert!(parse_outer_rings(r#"{"coordinates": 7}"#).is_empty());
        assert!(parse_outer_rings(r#"{"type":"MultiPolygon"}"#).is_empty());
    }

    #[test]
    fn empty_polygon_entry_is_skipped() {
        assert!(parse_outer_rings(r#"{"coordinates":[[]]}"#).is_empty());
    }
}
