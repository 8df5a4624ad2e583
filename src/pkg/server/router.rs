use axum::middleware::{from_fn, from_fn_with_state};
use axum::{
    Router,
    routing::{get, patch, post},
};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    // mutations require a logged-in administrator, reads are open
    let admin = Router::new()
        .route("/jobs", post(handlers::jobs::create))
        .route(
            "/jobs/{id}",
            patch(handlers::jobs::update).delete(handlers::jobs::remove),
        )
        .layer(from_fn(authn::require_admin))
        .layer(from_fn_with_state(state.clone(), authn::authenticate));
    let app = Router::new()
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/{id}", get(handlers::jobs::get))
        .merge(admin)
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
