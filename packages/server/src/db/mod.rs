//! Database seam for the report layer.
//!
//! Report functions build SQL text (with validated identifiers and `?`
//! placeholders) plus a positional parameter list, and hand both to a
//! [`Database`]. Implementations: `PostgreSQL` (production), memory
//! (tests). Connections are scoped per query by the implementation;
//! timeouts and retries are the connection pool's concern, not this
//! layer's.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

pub use memory::MemoryDatabase;
pub use postgres::PostgresDatabase;

/// A scalar cell value as returned by (or bound into) a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL, or a type this layer does not decode.
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// The cell as a float, converting from integer when needed.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The cell as an integer, parsing text when it looks numeric.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// The cell rendered as an owned string, `None` for NULL.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// One result row, cells in SELECT-list order.
pub type SqlRow = Vec<SqlValue>;

/// Parameterized-query execution seam.
///
/// `sql` uses `?` placeholders; `params` aligns positionally with them.
/// Implementations must bind parameters — never interpolate them.
#[async_trait]
pub trait Database: Send + Sync {
    /// Executes a query and returns all rows.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> anyhow::Result<Vec<SqlRow>>;
}
