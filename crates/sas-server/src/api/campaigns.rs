use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sas_campaign::{
    generate_all_csvs, AssemblyReport, AssemblyRequest, CampaignError, CampaignOverrides,
    CsvBundle, EXPORT_ORDER,
};
use sas_core::{CampaignData, Environment, ProductValidation};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum ExportFormat {
    Csv,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCampaignRequest {
    pub validation: Option<ProductValidation>,
    pub affiliate_url: Option<String>,
    pub presell_url: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub campaign_data: CampaignOverrides,
    pub export_format: Option<ExportFormat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CampaignMetadata {
    generated_at: DateTime<Utc>,
    report: AssemblyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    import_order: Option<Vec<&'static str>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCampaignData {
    campaign: CampaignData,
    #[serde(skip_serializing_if = "Option::is_none")]
    csv_data: Option<CsvBundle>,
    metadata: CampaignMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ExportData {
    files: CsvBundle,
    import_order: Vec<&'static str>,
}

fn map_campaign_error(rid: &str, env: &Environment, error: &CampaignError) -> ApiError {
    tracing::warn!(error = %error, "campaign assembly rejected");
    match error {
        CampaignError::MissingRequiredField(field) => {
            ApiError::new(rid, "missing_field", error.to_string())
                .with_details(env, serde_json::json!({ "field": field }))
        }
        CampaignError::InvalidUrl { field, reason } => {
            ApiError::new(rid, "invalid_input", format!("{field} is not a valid URL"))
                .with_details(env, serde_json::json!({ "field": field, "reason": reason }))
        }
    }
}

/// POST /api/v1/campaigns: assemble a campaign, optionally with its CSV export.
pub(super) async fn create_campaign(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CreateCampaignRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreateCampaignData>>, ApiError> {
    let rid = &req_id.0;
    let env = &state.config.env;
    let body = json_body(rid, env, body)?;

    let product = body.validation.ok_or_else(|| {
        ApiError::new(rid, "missing_field", "missing required field: validation")
            .with_details(env, serde_json::json!({ "field": "validation" }))
    })?;

    let generated_at = Utc::now();
    let request = AssemblyRequest {
        product,
        affiliate_url: body.affiliate_url,
        presell_url: body.presell_url,
        country: body.country,
        created_on: generated_at.date_naive(),
        overrides: body.campaign_data,
    };
    let assembled = state
        .assembler
        .assemble(&request)
        .map_err(|e| map_campaign_error(rid, env, &e))?;

    let csv_data = body
        .export_format
        .map(|ExportFormat::Csv| generate_all_csvs(&assembled.campaign));
    let import_order = csv_data.as_ref().map(|_| EXPORT_ORDER.to_vec());

    Ok(Json(ApiResponse::new(
        CreateCampaignData {
            campaign: assembled.campaign,
            csv_data,
            metadata: CampaignMetadata {
                generated_at,
                report: assembled.report,
                import_order,
            },
        },
        req_id.0.clone(),
    )))
}

/// POST /api/v1/campaigns/export: render an already assembled campaign.
pub(super) async fn export_campaign(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CampaignData>, JsonRejection>,
) -> Result<Json<ApiResponse<ExportData>>, ApiError> {
    let campaign = json_body(&req_id.0, &state.config.env, body)?;
    Ok(Json(ApiResponse::new(
        ExportData {
            files: generate_all_csvs(&campaign),
            import_order: EXPORT_ORDER.to_vec(),
        },
        req_id.0,
    )))
}
