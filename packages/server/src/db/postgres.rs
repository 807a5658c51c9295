//! `PostgreSQL` implementation of the [`Database`] seam via sqlx.
//!
//! Rewrites the layer's `?` placeholders into Postgres `$n` form, binds
//! parameters positionally, and decodes each result cell into a
//! [`SqlValue`] by column type name. JSON/JSONB cells are stringified so
//! the geometry parser can consume them as text; types this layer does
//! not know decode to [`SqlValue::Null`].

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row, TypeInfo};

use super::{Database, SqlRow, SqlValue};

/// Connection-pooled Postgres backend.
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Connects a small pool to the given `postgres://` URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection cannot be established.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool (shared with migrations or tests).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> anyhow::Result<Vec<SqlRow>> {
        let sql = number_placeholders(sql);
        let mut query = sqlx::query(&sql);
        for param in params {
            query = match param {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Text(s) => query.bind(s.clone()),
            };
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(decode_row).collect())
    }
}

/// Rewrites `?` placeholders into `$1..$n`.
///
/// The report layer only ever emits `?` outside of string literals, so a
/// plain character scan is sufficient.
fn number_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut n = 0;
    for ch in sql.chars() {
        if ch == '?' {
            n += 1;
            out.push('$');
            out.push_str(&n.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decodes every cell of a row into [`SqlValue`] by column type name.
fn decode_row(row: &PgRow) -> SqlRow {
    (0..row.columns().len())
        .map(|idx| decode_cell(row, idx))
        .collect()
}

fn decode_cell(row: &PgRow, idx: usize) -> SqlValue {
    let type_name = row.columns()[idx].type_info().name().to_uppercase();
    match type_name.as_str() {
        "INT2" => opt(row.try_get::<Option<i16>, _>(idx).map(|v| v.map(i64::from))),
        "INT4" => opt(row.try_get::<Option<i32>, _>(idx).map(|v| v.map(i64::from))),
        "INT8" => opt(row.try_get::<Option<i64>, _>(idx)),
        "FLOAT4" => opt_float(
            row.try_get::<Option<f32>, _>(idx)
                .map(|v| v.map(f64::from)),
        ),
        "FLOAT8" => opt_float(row.try_get::<Option<f64>, _>(idx)),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => {
            opt_text(row.try_get::<Option<String>, _>(idx))
        }
        "BOOL" => opt(row
            .try_get::<Option<bool>, _>(idx)
            .map(|v| v.map(i64::from))),
        "JSON" | "JSONB" => match row.try_get::<Option<serde_json::Value>, _>(idx) {
            Ok(Some(value)) => SqlValue::Text(value.to_string()),
            _ => SqlValue::Null,
        },
        _ => SqlValue::Null,
    }
}

fn opt(result: Result<Option<i64>, sqlx::Error>) -> SqlValue {
    match result {
        Ok(Some(i)) => SqlValue::Int(i),
        _ => SqlValue::Null,
    }
}

fn opt_float(result: Result<Option<f64>, sqlx::Error>) -> SqlValue {
    match result {
        Ok(Some(f)) => SqlValue::Float(f),
        _ => SqlValue::Null,
    }
}

fn opt_text(result: Result<Option<String>, sqlx::Error>) -> SqlValue {
    match result {
        Ok(Some(s)) => SqlValue::Text(s),
        _ => SqlValue::Null,
    }
}
