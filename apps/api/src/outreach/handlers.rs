//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::outreach::OutreachRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OutreachResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct OutreachRefineRequest {
    #[serde(flatten)]
    pub request: OutreachRequest,
    pub previous_message: String,
    pub feedback: String,
}

/// POST /api/v1/outreach
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    validate(&request)?;
    let message = state.outreach.generate(&request).await?;
    Ok(Json(OutreachResponse { message }))
}

/// POST /api/v1/outreach/refine
pub async fn handle_refine(
    State(state): State<AppState>,
    Json(request): Json<OutreachRefineRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    validate(&request.request)?;
    if request.feedback.trim().is_empty() {
        return Err(AppError::Validation("feedback cannot be empty".to_string()));
    }

    let message = state
        .outreach
        .refine(&request.request, &request.previous_message, &request.feedback)
        .await?;
    Ok(Json(OutreachResponse { message }))
}

fn validate(request: &OutreachRequest) -> Result<(), AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    Ok(())
}
