//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /
//!   POST   /profiles/          GET /profiles/
//!   POST   /plots/             GET /plots/
//!   POST   /beds/              GET /beds/
//!   POST   /crops/             GET /crops/
//!   POST   /plantings/         GET /plantings/
//!   POST   /recurring_tasks/   GET /recurring_tasks/
//!   POST   /scheduled_tasks/   GET /scheduled_tasks/

use std::future::Future;

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use db::models::{
    Entity, NewBed, NewCrop, NewPlanting, NewPlot, NewProfile, NewRecurringTask,
    NewScheduledTask,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;
pub use handlers::AppState;

use handlers::{entities, root};

/// Create and list routes for one entity.
fn resource<E: Entity>() -> (String, MethodRouter<AppState>) {
    let path = format!("/{}/", E::TABLE);
    (path, post(entities::create::<E>).get(entities::list::<E>))
}

/// Build the application router around `state`.
pub fn router(state: AppState) -> Router {
    let resources = [
        resource::<NewProfile>(),
        resource::<NewPlot>(),
        resource::<NewBed>(),
        resource::<NewCrop>(),
        resource::<NewPlanting>(),
        resource::<NewRecurringTask>(),
        resource::<NewScheduledTask>(),
    ];

    resources
        .into_iter()
        .fold(Router::new().route("/", get(root::index)), |app, (path, methods)| {
            app.route(&path, methods)
        })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve the API until `shutdown` resolves.
pub async fn serve(
    bind: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
