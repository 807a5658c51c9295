//! Lightweight filtered point fetch for client-rendered heatmaps.
//!
//! Every row becomes one point with `count` fixed at 1; spatial binning
//! is left to the client (the configured clustering delta is carried in
//! [`AppConfig`] but not applied here).

use std::collections::HashMap;

use geodash_core::ident::safe_identifier;
use geodash_core::types::HeatPoint;

use crate::config::AppConfig;
use crate::db::{Database, SqlRow};

use super::{compile_filters, ReportError};

/// Fetches filtered raw points, optionally capped by the environment-wide
/// heat limit (independent of the main dimension limit).
///
/// # Errors
///
/// [`ReportError::InvalidConfig`] for a bad configured identifier,
/// [`ReportError::QueryFailure`] when the database rejects the query.
pub async fn fetch_heatmap(
    db: &dyn Database,
    config: &AppConfig,
    filters: &HashMap<String, String>,
) -> Result<Vec<HeatPoint>, ReportError> {
    let map = &config.map;
    let table = safe_identifier(&map.table)?;
    let lat = safe_identifier(&map.lat_field)?;
    let lng = safe_identifier(&map.lng_field)?;
    let device = safe_identifier(&config.filter_fields.device_id)?;

    let (mut clauses, values) = compile_filters(filters, &config.filter_fields)?;
    clauses.push(format!("{lat} IS NOT NULL"));
    clauses.push(format!("{lng} IS NOT NULL"));

    let mut sql = format!(
        "SELECT {lat} AS lat, {lng} AS lng, {device} AS device_id FROM {table} WHERE {}",
        clauses.join(" AND ")
    );
    if let Some(limit) = config.heat_limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let rows = db.query(&sql, &values).await?;
    Ok(rows.iter().filter_map(decode_point).collect())
}

fn decode_point(row: &SqlRow) -> Option<HeatPoint> {
    Some(HeatPoint {
        lat: row.first()?.as_f64()?,
        lng: row.get(1)?.as_f64()?,
        count: 1,
        device_id: row.get(2).and_then(crate::db::SqlValue::as_i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryDatabase, SqlValue};

    fn point_row(lat: f64, lng: f64, device: i64) -> SqlRow {
        vec![
            SqlValue::Float(lat),
            SqlValue::Float(lng),
            SqlValue::Int(device),
        ]
    }

    #[tokio::test]
    async fn builds_expected_sql_without_limit() {
        let db = MemoryDatabase::new();
        fetch_heatmap(&db, &AppConfig::default(), &HashMap::new())
            .await
            .expect("fetch succeeds");

        let (sql, _) = &db.executed()[0];
        assert_eq!(
            sql,
            "SELECT latitud AS lat, longitud AS lng, dispositivo_id AS device_id \
             FROM dimensiones WHERE latitud IS NOT NULL AND longitud IS NOT NULL"
        );
        assert!(!sql.contains("LIMIT"));
    }

    #[tokio::test]
    async fn applies_configured_heat_limit() {
        let db = MemoryDatabase::new();
        let config = AppConfig {
            heat_limit: Some(2000),
            ..AppConfig::default()
        };
        fetch_heatmap(&db, &config, &HashMap::new())
            .await
            .expect("fetch succeeds");

        let (sql, _) = &db.executed()[0];
        assert!(sql.ends_with(" LIMIT 2000"));
    }

    #[tokio::test]
    async fn filters_bind_positionally() {
        let db = MemoryDatabase::new();
        let filters: HashMap<String, String> = [
            ("device_id".to_string(), "dev-7".to_string()),
            ("operator_id".to_string(), "todos".to_string()),
        ]
        .into();

        fetch_heatmap(&db, &AppConfig::default(), &filters)
            .await
            .expect("fetch succeeds");

        let (sql, params) = &db.executed()[0];
        assert!(sql.contains("dispositivo_id = ?"));
        assert!(!sql.contains("operador_id"));
        assert_eq!(params, &vec![SqlValue::Text("dev-7".to_string())]);
    }

    #[tokio::test]
    async fn each_row_becomes_one_point_with_count_one() {
        let db = MemoryDatabase::new();
        db.on(
            "FROM dimensiones",
            vec![
                point_row(-33.45, -70.66, 1),
                point_row(-33.46, -70.67, 2),
            ],
        );

        let points = fetch_heatmap(&db, &AppConfig::default(), &HashMap::new())
            .await
            .expect("fetch succeeds");

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.count == 1));
        assert_eq!(points[0].device_id, Some(1));
        assert!((points[1].lat - -33.46).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn undecodable_coordinates_drop_the_row() {
        let db = MemoryDatabase::new();
        db.on(
            "FROM dimensiones",
            vec![
                vec![SqlValue::Null, SqlValue::Float(1.0), SqlValue::Int(1)],
                point_row(2.0, 3.0, 4),
            ],
        );

        let points = fetch_heatmap(&db, &AppConfig::default(), &HashMap::new())
            .await
            .expect("fetch succeeds");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].device_id, Some(4));
    }

    #[tokio::test]
    async fn bad_device_column_is_invalid_config() {
        let db = MemoryDatabase::new();
        let config = AppConfig {
            filter_fields: crate::config::FilterFieldMap {
                device_id: "device id".to_string(),
                ..crate::config::FilterFieldMap::default()
            },
            ..AppConfig::default()
        };
        let err = fetch_heatmap(&db, &config, &HashMap::new())
            .await
            .expect_err("invalid column");
        assert!(matches!(err, ReportError::InvalidConfig(_)));
        assert!(db.executed().is_empty());
    }
}
