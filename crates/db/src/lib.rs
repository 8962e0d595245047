//! `db` crate — the store side of the allotment service.
//!
//! Provides the entity schemas, the [`Gateway`] abstraction over the hosted
//! store (REST or direct Postgres), the query executor that folds store
//! outcomes into [`QueryError`], and typed repository functions on top.

pub mod error;
pub mod executor;
pub mod gateway;
pub mod models;
pub mod pool;
pub mod repository;
pub mod table;

pub use error::{DbError, QueryError};
pub use gateway::{Gateway, PgGateway, RestGateway};
pub use pool::DbPool;
pub use table::Table;
