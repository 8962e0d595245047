//! Route handlers.
//!
//! Each entity gets the same pair of handlers, instantiated per table in
//! [`crate::router`].

use std::sync::Arc;

use db::Gateway;

pub mod entities;
pub mod root;

/// Shared state handed to every handler.
///
/// Holds the one store gateway built at startup; it is read-only after
/// construction, so cloning the state only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: impl Gateway + 'static) -> Self {
        Self { gateway: Arc::new(gateway) }
    }

    pub fn from_arc(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}
