//! Typed error types for the db crate.

use thiserror::Error;

/// Failures raised by a [`Gateway`](crate::Gateway) while talking to the store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The REST endpoint answered with a non-success status.
    #[error("store responded with {status}: {message}")]
    Rest { status: u16, message: String },

    /// A record or response could not be (de)serialised.
    #[error("malformed row: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured store URL cannot host the REST API.
    #[error("invalid store url: {0}")]
    InvalidUrl(String),

    /// A record key that is not a plain column identifier.
    #[error("invalid column name: '{0}'")]
    InvalidColumn(String),

    /// Records handed to `insert` must be JSON objects.
    #[error("record is not a JSON object")]
    NotAnObject,
}

/// Outcome of a failed [`execute`](crate::executor::execute) call.
///
/// This is the only error the HTTP layer ever sees from the store.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The operation succeeded but returned no rows.
    #[error("row not found")]
    NotFound,

    /// Anything else that went wrong while running the operation.
    #[error("{0}")]
    Store(String),
}

impl From<DbError> for QueryError {
    fn from(err: DbError) -> Self {
        Self::Store(err.to_string())
    }
}
