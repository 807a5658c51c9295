//! `GeoDash` Server — read-only geospatial reporting API over a configurable
//! relational dimension table.

pub mod config;
pub mod db;
pub mod network;
pub mod report;

pub use config::AppConfig;
pub use db::{Database, SqlRow, SqlValue};
pub use report::ReportError;
