//! Gateway talking to the store's Postgres database directly.
//!
//! Rows travel as `jsonb`: inserts populate the supplied columns from the
//! record with `jsonb_populate_record`, and both operations return rows
//! through `to_jsonb`, so the caller sees the same shape the REST gateway
//! produces.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{into_record, Gateway, JsonRow};
use crate::{DbError, DbPool, Table};

/// Gateway backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgGateway {
    pool: DbPool,
}

impl PgGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Record keys are spliced into SQL, so only plain identifiers are allowed.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Build the `INSERT … RETURNING` statement for the given record columns.
fn insert_sql(table: Table, columns: &[&str]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {table} AS t DEFAULT VALUES RETURNING to_jsonb(t)");
    }
    let cols = columns.join(", ");
    format!(
        "INSERT INTO {table} AS t ({cols}) \
         SELECT {cols} FROM jsonb_populate_record(NULL::{table}, $1) \
         RETURNING to_jsonb(t)"
    )
}

fn select_all_sql(table: Table) -> String {
    format!("SELECT to_jsonb(t) FROM {table} AS t ORDER BY t.created_at ASC")
}

#[async_trait]
impl Gateway for PgGateway {
    async fn insert(&self, table: Table, record: JsonRow) -> Result<Vec<JsonRow>, DbError> {
        let columns = record
            .keys()
            .map(|k| {
                if is_identifier(k) {
                    Ok(k.as_str())
                } else {
                    Err(DbError::InvalidColumn(k.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sql = insert_sql(table, &columns);
        debug!(%table, columns = columns.len(), "inserting row");

        let rows: Vec<Value> = sqlx::query_scalar(&sql)
            .bind(Value::Object(record))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_record).collect()
    }

    async fn select_all(&self, table: Table) -> Result<Vec<JsonRow>, DbError> {
        debug!(%table, "selecting all rows");
        let rows: Vec<Value> = sqlx::query_scalar(&select_all_sql(table))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_record).collect()
    }
}
