use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;

use sas_core::{AdCopyUnit, Environment, OptimizationResult};
use sas_optimizer::{batch_optimize, optimize, AdCopyUnitInput, OptimizerError};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct BatchRequest {
    pub units: Vec<AdCopyUnitInput>,
}

fn map_optimizer_error(rid: &str, env: &Environment, error: &OptimizerError) -> ApiError {
    match error {
        OptimizerError::InvalidInput(reason) => {
            ApiError::new(rid, "invalid_input", error.to_string())
                .with_details(env, serde_json::json!({ "reason": reason }))
        }
        OptimizerError::BatchTooLarge { size, max } => {
            ApiError::new(rid, "batch_too_large", error.to_string())
                .with_details(env, serde_json::json!({ "size": size, "max": max }))
        }
    }
}

/// POST /api/v1/copy/optimize: fit one unit of ad copy to its budget.
pub(super) async fn optimize_copy(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AdCopyUnitInput>, JsonRejection>,
) -> Result<Json<ApiResponse<OptimizationResult>>, ApiError> {
    let rid = &req_id.0;
    let env = &state.config.env;
    let unit = AdCopyUnit::try_from(json_body(rid, env, body)?)
        .map_err(|e| map_optimizer_error(rid, env, &e))?;

    Ok(Json(ApiResponse::new(optimize(&unit), rid.clone())))
}

/// POST /api/v1/copy/optimize/batch: optimize up to ten units in order.
pub(super) async fn optimize_copy_batch(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<OptimizationResult>>>, ApiError> {
    let rid = &req_id.0;
    let env = &state.config.env;
    let units = json_body(rid, env, body)?
        .units
        .into_iter()
        .map(AdCopyUnit::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_optimizer_error(rid, env, &e))?;

    let results = batch_optimize(&units).map_err(|e| map_optimizer_error(rid, env, &e))?;
    Ok(Json(ApiResponse::new(results, rid.clone())))
}
