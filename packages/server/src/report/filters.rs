//! Filter compilation: request parameters to WHERE fragments + bind values.
//!
//! Emission order is fixed so the positional value list always aligns with
//! the `?` placeholders: the eight equality keys first (moment, altitude,
//! signal, speed, operator, network, district, device), then the four
//! timestamp range keys (`date_from`, `date_to`, `time_from`, `time_to`).
//! Values are never interpolated into the SQL text. Numeric-looking
//! equality values bind as integers and the range placeholders carry an
//! explicit cast, so prepared statements type-check against the integer
//! id and timestamp columns of the backing table.

use std::collections::HashMap;

use geodash_core::ident::safe_identifier;

use crate::config::FilterFieldMap;
use crate::db::SqlValue;

use super::ReportError;

/// Request values meaning "no filter" for the equality keys.
/// "todos"/"todas" are the wire-level "all" sentinels.
const ALL_SENTINELS: [&str; 2] = ["todos", "todas"];

/// Compiles recognized filter parameters into WHERE fragments and a
/// positionally aligned bind-value list.
///
/// Unknown parameter keys are ignored. Equality keys are skipped when
/// absent, empty, or an "all" sentinel; range keys are skipped when
/// absent or empty.
///
/// # Errors
///
/// Returns [`ReportError::InvalidConfig`] when a configured filter column
/// name fails identifier validation.
pub fn compile_filters(
    params: &HashMap<String, String>,
    fields: &FilterFieldMap,
) -> Result<(Vec<String>, Vec<SqlValue>), ReportError> {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    let equality: [(&str, &str); 8] = [
        ("moment_id", &fields.moment_id),
        ("altitude_level_id", &fields.altitude_level_id),
        ("signal_level_id", &fields.signal_level_id),
        ("speed_level_id", &fields.speed_level_id),
        ("operator_id", &fields.operator_id),
        ("network_id", &fields.network_id),
        ("district_id", &fields.district_id),
        ("device_id", &fields.device_id),
    ];
    for (key, field) in equality {
        let Some(value) = params.get(key) else {
            continue;
        };
        if value.is_empty() || ALL_SENTINELS.contains(&value.as_str()) {
            continue;
        }
        let field = safe_identifier(field)?;
        clauses.push(format!("{field} = ?"));
        values.push(bind_value(value));
    }

    let ts = safe_identifier(&fields.timestamp)?;
    let ranges: [(&str, String); 4] = [
        ("date_from", format!("CAST({ts} AS date) >= CAST(? AS date)")),
        ("date_to", format!("CAST({ts} AS date) <= CAST(? AS date)")),
        ("time_from", format!("CAST({ts} AS time) >= CAST(? AS time)")),
        ("time_to", format!("CAST({ts} AS time) <= CAST(? AS time)")),
    ];
    for (key, clause) in ranges {
        let Some(value) = params.get(key) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        clauses.push(clause);
        values.push(SqlValue::Text(value.clone()));
    }

    Ok((clauses, values))
}

/// Query-string values arrive as text, but the id columns they compare
/// against are integers. A value that parses as an integer binds as one
/// so the prepared statement finds an `integer = bigint` operator; other
/// values (device identifiers may be text) bind as text.
fn bind_value(value: &str) -> SqlValue {
    value
        .parse::<i64>()
        .map_or_else(|_| SqlValue::Text(value.to_string()), SqlValue::Int)
}
