//! Route definitions for the `/clusters` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::clusters;
use crate::state::AppState;

/// Routes mounted at `/clusters`.
///
/// ```text
/// GET    /                  -> list_clusters
/// POST   /{name}/validate   -> validate_cluster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clusters::list_clusters))
        .route("/{name}/validate", post(clusters::validate_cluster))
}
