//! Filter option lists from the fixed lookup tables.
//!
//! Failures are isolated per category: a broken lookup table logs a
//! warning and contributes an empty list, and the remaining categories
//! still load. The overall call never fails.

use geodash_core::ident::safe_identifier;
use geodash_core::types::{FilterOption, FilterOptionSets};
use tracing::warn;

use crate::db::{Database, SqlRow};

use super::ReportError;

/// (category, table, id column, name column) for the six lookup tables.
const LOOKUPS: [(&str, &str, &str, &str); 6] = [
    ("moments", "dim_momento", "momento_id", "momento_dia"),
    (
        "altitude_levels",
        "dim_nivel_altitud",
        "nivel_altitud_id",
        "nivel_altitud",
    ),
    (
        "signal_levels",
        "dim_nivel_senal",
        "nivel_senal_id",
        "nivel_senal",
    ),
    (
        "speed_levels",
        "dim_nivel_velocidad",
        "nivel_velocidad_id",
        "nivel_velocidad",
    ),
    ("operators", "dim_operador", "operador_id", "nombre_operador"),
    ("networks", "dim_red", "red_id", "tipo_red"),
];

/// Loads the option list for every category.
///
/// All six fields of the result are always present; a category whose
/// query or row decode fails is returned as an empty list.
pub async fn fetch_filter_options(db: &dyn Database) -> FilterOptionSets {
    let mut sets = FilterOptionSets::default();
    for (category, table, id_field, name_field) in LOOKUPS {
        let options = match load_category(db, table, id_field, name_field).await {
            Ok(options) => options,
            Err(err) => {
                warn!(category, error = %err, "filter option lookup failed, returning empty list");
                Vec::new()
            }
        };
        *category_slot(&mut sets, category) = options;
    }
    sets
}

fn category_slot<'a>(sets: &'a mut FilterOptionSets, category: &str) -> &'a mut Vec<FilterOption> {
    match category {
        "moments" => &mut sets.moments,
        "altitude_levels" => &mut sets.altitude_levels,
        "signal_levels" => &mut sets.signal_levels,
        "speed_levels" => &mut sets.speed_levels,
        "operators" => &mut sets.operators,
        _ => &mut sets.networks,
    }
}

async fn load_category(
    db: &dyn Database,
    table: &str,
    id_field: &str,
    name_field: &str,
) -> Result<Vec<FilterOption>, ReportError> {
    let table = safe_identifier(table)?;
    let id_field = safe_identifier(id_field)?;
    let name_field = safe_identifier(name_field)?;

    let sql = format!("SELECT {id_field}, {name_field} FROM {table} ORDER BY 1");
    let rows = db.query(&sql, &[]).await?;
    rows.iter().map(decode_option).collect()
}

fn decode_option(row: &SqlRow) -> Result<FilterOption, ReportError> {
    let id = row
        .first()
        .and_then(crate::db::SqlValue::as_i64)
        .ok_or_else(|| ReportError::QueryFailure(anyhow::anyhow!("option id is not an integer")))?;
    let name = row
        .get(1)
        .and_then(crate::db::SqlValue::to_text)
        .ok_or_else(|| ReportError::QueryFailure(anyhow::anyhow!("option name is missing")))?;
    Ok(FilterOption { id, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryDatabase, SqlValue};

    fn option_row(id: i64, name: &str) -> SqlRow {
        vec![SqlValue::Int(id), SqlValue::Text(name.to_string())]
    }

    #[tokio::test]
    async fn loads_all_six_categories() {
        let db = MemoryDatabase::new();
        db.on("FROM dim_momento", vec![option_row(1, "mañana")]);
        db.on("FROM dim_nivel_altitud", vec![option_row(1, "bajo")]);
        db.on("FROM dim_nivel_senal", vec![option_row(1, "fuerte")]);
        db.on("FROM dim_nivel_velocidad", vec![option_row(1, "lento")]);
        db.on("FROM dim_operador", vec![option_row(1, "OpA")]);
        db.on("FROM dim_red", vec![option_row(1, "4G"), option_row(2, "5G")]);

        let sets = fetch_filter_options(&db).await;

        assert_eq!(sets.moments.len(), 1);
        assert_eq!(sets.moments[0].name, "mañana");
        assert_eq!(sets.networks.len(), 2);
        assert_eq!(
            sets.networks[1],
            FilterOption {
                id: 2,
                name: "5G".to_string()
            }
        );
        assert_eq!(db.executed().len(), 6);
    }

    #[tokio::test]
    async fn queries_order_by_first_column() {
        let db = MemoryDatabase::new();
        fetch_filter_options(&db).await;
        for (sql, _) in db.executed() {
            assert!(sql.ends_with("ORDER BY 1"), "unexpected SQL: {sql}");
        }
    }

    #[tokio::test]
    async fn one_failing_category_does_not_affect_the_rest() {
        let db = MemoryDatabase::new();
        db.fail_on("FROM dim_operador", "table is gone");
        db.on("FROM dim_red", vec![option_row(1, "4G")]);
        db.on("FROM dim_momento", vec![option_row(1, "tarde")]);

        let sets = fetch_filter_options(&db).await;

        assert!(sets.operators.is_empty());
        assert_eq!(sets.networks.len(), 1);
        assert_eq!(sets.moments.len(), 1);
        // All six lookups still executed despite the failure.
        assert_eq!(db.executed().len(), 6);
    }

    #[tokio::test]
    async fn undecodable_row_empties_only_that_category() {
        let db = MemoryDatabase::new();
        db.on(
            "FROM dim_red",
            vec![vec![SqlValue::Text("not-an-id".to_string()), SqlValue::Null]],
        );
        db.on("FROM dim_momento", vec![option_row(1, "noche")]);

        let sets = fetch_filter_options(&db).await;

        assert!(sets.networks.is_empty());
        assert_eq!(sets.moments.len(), 1);
    }

    #[tokio::test]
    async fn empty_database_yields_all_empty_lists() {
        let db = MemoryDatabase::new();
        let sets = fetch_filter_options(&db).await;
        assert_eq!(sets, FilterOptionSets::default());
    }
}
