//! The store gateway: table-level insert and select over JSON rows.
//!
//! One gateway is built at startup and shared by every request. Gateways do
//! not interpret rows; typing happens in [`crate::repository`].

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{DbError, Table};

pub mod postgres;
pub mod rest;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use postgres::PgGateway;
pub use rest::RestGateway;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryGateway;

/// A store row as returned by the gateway.
pub type JsonRow = Map<String, Value>;

/// The two operations the service issues against a table.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Insert one record and return the rows the store reports as written.
    async fn insert(&self, table: Table, record: JsonRow) -> Result<Vec<JsonRow>, DbError>;

    /// Return every row of the table.
    async fn select_all(&self, table: Table) -> Result<Vec<JsonRow>, DbError>;
}

/// Turn an arbitrary JSON value into a record, rejecting non-objects.
pub fn into_record(value: Value) -> Result<JsonRow, DbError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DbError::NotAnObject),
    }
}

/// Split a JSON array of objects into rows.
pub(crate) fn into_rows(value: Value) -> Result<Vec<JsonRow>, DbError> {
    match value {
        Value::Array(items) => items.into_iter().map(into_record).collect(),
        Value::Object(map) => Ok(vec![map]),
        Value::Null => Ok(Vec::new()),
        _ => Err(DbError::NotAnObject),
    }
}
