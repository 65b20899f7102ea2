//! Axum route handlers for the Job Discovery API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::discovery::{CompanyInfo, Preferences, SearchResponse};
use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub background: String,
    #[serde(default)]
    pub criteria: String,
    /// Overrides the active search configuration when given.
    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    /// `null` when extraction failed; the UI decides the messaging.
    pub preferences: Option<Preferences>,
}

/// POST /api/v1/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if request.background.trim().is_empty() {
        return Err(AppError::Validation(
            "background cannot be empty".to_string(),
        ));
    }

    let response = state
        .discovery
        .search_jobs(
            &request.background,
            &request.criteria,
            request.config.as_deref(),
        )
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/jobs/preferences
///
/// Accepts a multipart body with a `resume` PDF file field and returns the
/// extracted job preferences.
pub async fn handle_preferences(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PreferencesResponse>, AppError> {
    let mut resume_bytes: Option<bytes::Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            resume_bytes = Some(field.bytes().await.map_err(|e| {
                AppError::Validation(format!("Failed to read resume upload: {e}"))
            })?);
        }
    }

    let data = resume_bytes
        .ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let resume_text = extract_pdf_text(&data)?;

    let preferences = state.discovery.extract_preferences(&resume_text).await;
    Ok(Json(PreferencesResponse { preferences }))
}

/// GET /api/v1/companies/:name
pub async fn handle_company(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CompanyInfo>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "company name cannot be empty".to_string(),
        ));
    }
    Ok(Json(state.discovery.get_company_info(&name).await))
}
