//! In-process gateway for tests: assigns ids and timestamps like the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Gateway, JsonRow};
use crate::{DbError, Table};

/// Keeps every table in a `Vec` behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<Table, Vec<JsonRow>>>,
    inserts: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `insert` calls that reached the gateway.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn insert(&self, table: Table, mut record: JsonRow) -> Result<Vec<JsonRow>, DbError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();

        let id = if table.has_uuid_key() {
            Value::from(Uuid::new_v4().to_string())
        } else {
            Value::from(rows.len() as i64 + 1)
        };
        record.insert("id".into(), id);
        record.insert("created_at".into(), Value::from(Utc::now().to_rfc3339()));

        rows.push(record.clone());
        Ok(vec![record])
    }

    async fn select_all(&self, table: Table) -> Result<Vec<JsonRow>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }
}
