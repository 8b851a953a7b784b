use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::db::entity::analysis_request;
use crate::error::{AppError, FieldError, Result};
use crate::schema::AnalysisRequestPayload;

use super::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub request_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequestResponse {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub investment_goals: String,
    pub risk_appetite: String,
    pub timeframe: String,
    pub holdings: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub created_at: String,
}

impl From<analysis_request::Model> for AnalysisRequestResponse {
    fn from(model: analysis_request::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            investment_goals: model.investment_goals,
            risk_appetite: model.risk_appetite,
            timeframe: model.timeframe,
            holdings: model.holdings,
            tx_hash: model.tx_hash,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

pub async fn create_analysis_request(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let payload = decode_payload(body)?;

    let row = state
        .analysis_request_service
        .submit(payload)
        .await
        .map_err(|e| e.or_internal("Failed to create analysis request"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Analysis request created successfully".to_string(),
            request_id: row.id,
        }),
    ))
}

/// Decodes the accepted JSON body, reporting type mismatches in the
/// same rejection shape as schema validation failures.
fn decode_payload(body: serde_json::Value) -> Result<AnalysisRequestPayload> {
    serde_json::from_value(body).map_err(|e| {
        AppError::Validation(vec![FieldError::new("body", "invalid_type", e.to_string())])
    })
}

pub async fn list_analysis_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisRequestResponse>>> {
    let rows = state
        .analysis_request_service
        .list()
        .await
        .map_err(|e| e.or_internal("Failed to fetch analysis requests"))?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_analysis_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisRequestResponse>> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid request ID".to_string()))?;

    let row = state
        .analysis_request_service
        .get(id)
        .await
        .map_err(|e| e.or_internal("Failed to fetch analysis request"))?;

    Ok(Json(row.into()))
}
