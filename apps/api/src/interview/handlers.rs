//! Axum route handlers for the Interview Prep API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::discovery::normalize_link;
use crate::errors::AppError;
use crate::interview::CompanyPrep;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterviewPrepRequest {
    pub company_url: String,
}

/// POST /api/v1/interview-prep
pub async fn handle_research(
    State(state): State<AppState>,
    Json(request): Json<InterviewPrepRequest>,
) -> Result<Json<CompanyPrep>, AppError> {
    let url = request.company_url.trim();
    if url.is_empty() {
        return Err(AppError::Validation(
            "company_url cannot be empty".to_string(),
        ));
    }

    let prep = state.interview.research(&normalize_link(url)).await?;
    Ok(Json(prep))
}
