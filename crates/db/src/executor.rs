//! Runs a single gateway operation and folds its outcome into a
//! [`QueryError`].
//!
//! Every failure is surfaced as-is: nothing is retried and transient and
//! permanent failures are not told apart.

use std::future::Future;

use tracing::{debug, error};

use crate::{gateway::JsonRow, DbError, QueryError};

/// What an empty result set means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnEmpty {
    /// No rows is a [`QueryError::NotFound`].
    NotFound,
    /// No rows is a valid, empty answer.
    Allow,
}

/// Await `op` and translate its outcome.
///
/// - rows → returned unchanged
/// - no rows → [`QueryError::NotFound`] unless `on_empty` is [`OnEmpty::Allow`]
/// - any error → [`QueryError::Store`] with the stringified cause
pub async fn execute<F>(op: F, on_empty: OnEmpty) -> Result<Vec<JsonRow>, QueryError>
where
    F: Future<Output = Result<Vec<JsonRow>, DbError>>,
{
    match op.await {
        Ok(rows) if rows.is_empty() && on_empty == OnEmpty::NotFound => {
            debug!("store returned no rows");
            Err(QueryError::NotFound)
        }
        Ok(rows) => Ok(rows),
        Err(err) => {
            error!(error = %err, "store operation failed");
            Err(err.into())
        }
    }
}
