//! District boundary fetch with per-row geometry isolation.

use geodash_core::color::color_for_key;
use geodash_core::geometry::parse_outer_rings;
use geodash_core::ident::safe_identifier;
use geodash_core::types::DistrictPolygon;

use crate::config::AppConfig;
use crate::db::{Database, SqlRow, SqlValue};

use super::{ReportError, NO_DISTRICT};

/// Fetches every district row and parses its boundary geometry.
///
/// Geometry problems are isolated per row: malformed text yields an empty
/// polygon list for that district, never a fetch-wide failure. The color
/// is keyed by name, falling back to code, falling back to id.
///
/// # Errors
///
/// [`ReportError::InvalidConfig`] for a bad configured identifier,
/// [`ReportError::QueryFailure`] when the database rejects the query.
pub async fn fetch_district_polygons(
    db: &dyn Database,
    config: &AppConfig,
) -> Result<Vec<DistrictPolygon>, ReportError> {
    let district = &config.district;
    let table = safe_identifier(&district.table)?;

    let aliased: [(&str, &str); 4] = [
        ("id", &district.id_field),
        ("code", &district.code_field),
        ("name", &district.name_field),
        ("geojson", &district.geojson_field),
    ];
    let mut select_parts = Vec::with_capacity(aliased.len());
    for (alias, field) in aliased {
        let column = safe_identifier(field)?;
        select_parts.push(format!("{column} AS {alias}"));
    }

    let mut sql = format!("SELECT {} FROM {table}", select_parts.join(", "));
    if let Some(raw) = &district.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(raw);
    }

    let rows = db.query(&sql, &[]).await?;
    Ok(rows.iter().map(decode_district).collect())
}

fn decode_district(row: &SqlRow) -> DistrictPolygon {
    let cell = |idx: usize| row.get(idx).cloned().unwrap_or(SqlValue::Null);

    let id = cell(0).as_i64();
    let code = cell(1).to_text();
    let name = cell(2).to_text();
    let polygons = cell(3)
        .to_text()
        .map(|text| parse_outer_rings(&text))
        .unwrap_or_default();

    // Color key preference: name, then code, then id. A row with none of
    // the three falls back to the shared district sentinel rather than a
    // default-value artifact.
    let color_key = nonempty(name.as_deref())
        .or_else(|| nonempty(code.as_deref()))
        .map(str::to_string)
        .or_else(|| id.map(|i| i.to_string()))
        .unwrap_or_else(|| NO_DISTRICT.to_string());

    DistrictPolygon {
        id: id.unwrap_or_default(),
        code,
        name,
        color: color_for_key(&color_key).to_string(),
        polygons,
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
