//! Handlers for the `/clusters` resource.
//!
//! Lists the form clusters the engine knows about and validates one
//! cluster's submitted values against its baseline, returning the
//! error-summary / inline-error view model for the form templates.

use axum::extract::{Path, State};
use axum::Json;
use casework_core::validation::cluster::{FieldMap, FieldSpec};
use casework_core::validation::engine::validate_and_render;
use casework_core::validation::render::ErrorViewModel;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of keys accepted in `submitted` or `baseline`.
pub const MAX_FIELDS_PER_MAP: usize = 50;

/// Maximum length of a single submitted or baseline value.
pub const MAX_VALUE_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// One cluster definition as exposed to clients.
#[derive(Debug, Serialize)]
pub struct ClusterSummary {
    pub name: &'static str,
    pub anchor: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// GET /api/v1/clusters
///
/// List every registered cluster with its fields in declaration order.
pub async fn list_clusters(State(state): State<AppState>) -> Json<DataResponse<Vec<ClusterSummary>>> {
    let clusters = state
        .registry
        .iter()
        .map(|spec| ClusterSummary {
            name: spec.name(),
            anchor: spec.anchor(),
            fields: spec.fields().to_vec(),
        })
        .collect();
    Json(DataResponse { data: clusters })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Request body for the validate endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateClusterRequest {
    /// Raw form values for the cluster's fields.
    #[serde(default)]
    #[validate(custom(function = "validate_field_map"))]
    pub submitted: FieldMap,
    /// Previously stored values; empty when the record has none yet.
    #[serde(default)]
    #[validate(custom(function = "validate_field_map"))]
    pub baseline: FieldMap,
}

fn validate_field_map(map: &FieldMap) -> Result<(), ValidationError> {
    if map.len() > MAX_FIELDS_PER_MAP {
        let mut err = ValidationError::new("too_many_fields");
        err.message = Some(format!("at most {MAX_FIELDS_PER_MAP} fields are accepted").into());
        return Err(err);
    }
    if map.values().any(|v| v.chars().count() > MAX_VALUE_LENGTH) {
        let mut err = ValidationError::new("value_too_long");
        err.message = Some(format!("values must be {MAX_VALUE_LENGTH} characters or less").into());
        return Err(err);
    }
    Ok(())
}

/// POST /api/v1/clusters/{name}/validate
///
/// Run the engine for one cluster. Validation failures are a normal 200
/// response with `formIsInvalid: true`; only an unknown cluster or a
/// malformed body is an error.
pub async fn validate_cluster(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<ValidateClusterRequest>,
) -> AppResult<Json<DataResponse<ErrorViewModel>>> {
    body.validate()?;
    let spec = state.registry.require(&name)?;

    let today = chrono::Utc::now().date_naive();
    let view_model = validate_and_render(
        spec,
        &body.submitted,
        &body.baseline,
        today,
        state.messages.as_ref(),
    );

    tracing::debug!(
        cluster = %name,
        invalid = view_model.form_is_invalid,
        highlighted = view_model.input_errors.len(),
        "Validated cluster"
    );

    Ok(Json(DataResponse { data: view_model }))
}
