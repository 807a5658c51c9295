//! Report services: filter compilation, fetches, and in-memory aggregation.
//!
//! Every function here is request-scoped and stateless: SQL is assembled
//! from validated configuration identifiers plus bound filter values,
//! executed through the [`crate::db::Database`] seam, and decoded into
//! typed records. Color caches and grouping maps live inside one call.

pub mod dimensions;
pub mod error;
pub mod filters;
pub mod heatmap;
pub mod options;
pub mod polygons;
pub mod summary;

pub use dimensions::fetch_dimensions;
pub use error::ReportError;
pub use filters::compile_filters;
pub use heatmap::fetch_heatmap;
pub use options::fetch_filter_options;
pub use polygons::fetch_district_polygons;
pub use summary::{summarize_by_district, summarize_by_zone};

/// Grouping placeholder for records with no zone value.
pub const NO_ZONE: &str = "no zone";

/// Grouping placeholder for records with no district value.
pub const NO_DISTRICT: &str = "no district";
