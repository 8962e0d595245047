//! Typed create/list operations, one pair per [`Entity`].
//!
//! Every function takes a `&dyn Gateway`, hands one operation to the
//! [`executor`](crate::executor) and decodes the rows it gets back. No
//! business logic lives here.

use serde_json::Value;

use crate::{
    executor::{execute, OnEmpty},
    gateway::{into_record, Gateway, JsonRow},
    models::{Entity, Stored},
    DbError, QueryError,
};

/// Insert `new` into its table and return the stored row.
///
/// The store is expected to echo back exactly the inserted row; only the
/// first returned row is decoded.
pub async fn create<E: Entity>(gateway: &dyn Gateway, new: &E) -> Result<Stored<E>, QueryError> {
    let record = serde_json::to_value(new)
        .map_err(DbError::from)
        .and_then(into_record)?;

    let rows = execute(gateway.insert(E::TABLE, record), OnEmpty::NotFound).await?;
    let first = rows.into_iter().next().ok_or(QueryError::NotFound)?;
    decode::<E>(first)
}

/// Return every row of the entity's table, unfiltered.
///
/// An empty table is an empty list, not [`QueryError::NotFound`].
pub async fn list<E: Entity>(gateway: &dyn Gateway) -> Result<Vec<Stored<E>>, QueryError> {
    let rows = execute(gateway.select_all(E::TABLE), OnEmpty::Allow).await?;
    rows.into_iter().map(decode::<E>).collect()
}

fn decode<E: Entity>(row: JsonRow) -> Result<Stored<E>, QueryError> {
    let stored = serde_json::from_value(Value::Object(row)).map_err(DbError::from)?;
    Ok(stored)
}
