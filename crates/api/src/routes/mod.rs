pub mod clusters;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clusters                                        list cluster definitions
/// /clusters/{name}/validate                        validate one cluster (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/clusters", clusters::router())
}
