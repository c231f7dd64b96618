use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::mining::{RunRecord, TriggerOutcome, TriggerSource};

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct TriggerQuery {
    pub force: bool,
    pub source: TriggerSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MiningStatus {
    last_run: Option<RunRecord>,
    next_due_at: Option<DateTime<Utc>>,
    interval_hours: i64,
}

/// POST /api/v1/mining/trigger: external cron entry point.
///
/// Responds `202 Accepted` when a run was recorded and `200 OK` when it was
/// skipped because the interval has not elapsed.
pub(super) async fn trigger_mining(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TriggerQuery>,
) -> Result<(StatusCode, Json<ApiResponse<TriggerOutcome>>), ApiError> {
    let outcome = state
        .ledger
        .trigger(query.source, query.force, Utc::now())
        .await
        .map_err(|e| ApiError::internal(req_id.0.clone(), &state.config.env, &e))?;

    let status = match outcome {
        TriggerOutcome::Accepted { .. } => StatusCode::ACCEPTED,
        TriggerOutcome::Skipped { .. } => StatusCode::OK,
    };
    Ok((status, Json(ApiResponse::new(outcome, req_id.0))))
}

/// GET /api/v1/mining/status: last recorded run and when the next is due.
pub(super) async fn mining_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<MiningStatus>>, ApiError> {
    let last_run = state
        .ledger
        .last_run()
        .await
        .map_err(|e| ApiError::internal(req_id.0.clone(), &state.config.env, &e))?;

    let next_due_at = last_run.as_ref().map(|run| state.ledger.next_due_at(run));
    Ok(Json(ApiResponse::new(
        MiningStatus {
            last_run,
            next_due_at,
            interval_hours: state.ledger.interval().num_hours(),
        },
        req_id.0,
    )))
}
