//! `GeoDash` Core — identifier validation, color hashing, geometry parsing, and wire types.

pub mod color;
pub mod geometry;
pub mod ident;
pub mod types;

pub use color::{color_for_key, PALETTE};
pub use geometry::{parse_outer_rings, LatLng};
pub use ident::{safe_identifier, IdentifierError};
pub use types::{
    DimensionRecord, DistrictPolygon, DistrictSummary, FilterOption, FilterOptionSets, HeatPoint,
    ZoneSummary,
};
