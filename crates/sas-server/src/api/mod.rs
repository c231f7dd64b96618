mod campaigns;
mod copy;
mod mining;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use sas_campaign::CampaignAssembler;
use sas_core::{AppConfig, CountryLocaleRecord, Environment, COUNTRIES, DEFAULT_COUNTRY};

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};
use crate::mining::RunLedger;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assembler: Arc<CampaignAssembler>,
    pub ledger: Arc<RunLedger>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, request_id: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error envelope: `{ success: false, error, code, details?, meta }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub meta: ResponseMeta,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
            details: None,
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// Attach diagnostic details, except in production.
    #[must_use]
    pub fn with_details(mut self, env: &Environment, details: serde_json::Value) -> Self {
        if env.exposes_error_details() {
            self.details = Some(details);
        }
        self
    }

    /// Generic 500 that keeps the underlying error out of the response body.
    pub fn internal(
        request_id: impl Into<String>,
        env: &Environment,
        error: &dyn std::error::Error,
    ) -> Self {
        tracing::error!(error = %error, "request failed");
        Self::new(request_id, "internal_error", "internal server error")
            .with_details(env, serde_json::json!({ "cause": error.to_string() }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "validation_error" | "missing_field" | "invalid_input" | "batch_too_large" => {
                StatusCode::BAD_REQUEST
            }
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "not_found" => StatusCode::NOT_FOUND,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Unwrap a JSON body, turning extractor rejections into `validation_error`.
pub(super) fn json_body<T>(
    rid: &str,
    env: &Environment,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiError::new(rid, "validation_error", "request body is not valid JSON for this endpoint")
            .with_details(env, serde_json::json!({ "reason": rejection.body_text() }))
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/locales", get(list_locales))
        .route("/api/v1/campaigns", post(campaigns::create_campaign))
        .route("/api/v1/campaigns/export", post(campaigns::export_campaign))
        .route("/api/v1/copy/optimize", post(copy::optimize_copy))
        .route("/api/v1/copy/optimize/batch", post(copy::optimize_copy_batch))
        .route("/api/v1/mining/trigger", post(mining::trigger_mining))
        .route("/api/v1/mining/status", get(mining::mining_status))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    environment: String,
    version: &'static str,
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            environment: state.config.env.to_string(),
            version: env!("CARGO_PKG_VERSION"),
        },
        req_id.0,
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalesData {
    default_country: &'static str,
    countries: &'static [CountryLocaleRecord],
}

async fn list_locales(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse::new(
        LocalesData {
            default_country: DEFAULT_COUNTRY,
            countries: COUNTRIES,
        },
        req_id.0,
    ))
}
