//! Primary dimension fetch: SQL assembly, typed decode, color assignment.

use std::collections::HashMap;

use geodash_core::color::color_for_key;
use geodash_core::ident::safe_identifier;
use geodash_core::types::DimensionRecord;

use crate::config::AppConfig;
use crate::db::{Database, SqlRow, SqlValue};

use super::{compile_filters, ReportError, NO_DISTRICT};

/// Fetches filtered dimension records and assigns per-district colors.
///
/// Every configured identifier is validated before the query is built, so
/// a misconfigured column fails fast with no partial query. Latitude and
/// longitude are required non-NULL at the SQL level; the configured row
/// limit is always applied.
///
/// Colors are keyed by the record's district (sentinel "no district" when
/// absent or empty) and cached per distinct district within this single
/// call only.
///
/// # Errors
///
/// [`ReportError::InvalidConfig`] for a bad configured identifier,
/// [`ReportError::QueryFailure`] when the database rejects the query.
pub async fn fetch_dimensions(
    db: &dyn Database,
    config: &AppConfig,
    filters: &HashMap<String, String>,
) -> Result<Vec<DimensionRecord>, ReportError> {
    let map = &config.map;
    let table = safe_identifier(&map.table)?;

    let aliased: [(&str, &str); 6] = [
        ("name", &map.name_field),
        ("zone", &map.zone_field),
        ("district", &map.district_field),
        ("latitude", &map.lat_field),
        ("longitude", &map.lng_field),
        ("value", &map.value_field),
    ];
    let mut select_parts = Vec::with_capacity(aliased.len());
    for (alias, field) in aliased {
        let column = safe_identifier(field)?;
        select_parts.push(format!("{column} AS {alias}"));
    }
    let lat = safe_identifier(&map.lat_field)?;
    let lng = safe_identifier(&map.lng_field)?;

    let (filter_clauses, values) = compile_filters(filters, &config.filter_fields)?;

    let mut where_clauses = Vec::new();
    if let Some(raw) = &map.where_clause {
        where_clauses.push(raw.clone());
    }
    where_clauses.extend(filter_clauses);
    where_clauses.push(format!("{lat} IS NOT NULL"));
    where_clauses.push(format!("{lng} IS NOT NULL"));

    let sql = format!(
        "SELECT {} FROM {table} WHERE {} LIMIT {}",
        select_parts.join(", "),
        where_clauses.join(" AND "),
        map.limit
    );

    let rows = db.query(&sql, &values).await?;

    let mut colors: HashMap<String, &'static str> = HashMap::new();
    Ok(rows
        .iter()
        .map(|row| decode_record(row, &mut colors))
        .collect())
}

fn decode_record(row: &SqlRow, colors: &mut HashMap<String, &'static str>) -> DimensionRecord {
    let cell = |idx: usize| row.get(idx).cloned().unwrap_or(SqlValue::Null);

    let district = cell(2).to_text();
    let district_key = match district.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => NO_DISTRICT.to_string(),
    };
    let color = *colors
        .entry(district_key)
        .or_insert_with_key(|key| color_for_key(key));

    DimensionRecord {
        name: cell(0).to_text(),
        zone: cell(1).to_text(),
        district,
        latitude: cell(3).as_f64(),
        longitude: cell(4).as_f64(),
        value: cell(5).as_f64(),
        color: color.to_string(),
    }
}
