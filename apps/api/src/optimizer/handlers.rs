//! Axum route handlers for the Resume Optimizer API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{extract_pdf_text, fetch_page_text};
use crate::optimizer::OptimizationReport;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub resume_text: String,
    pub job_description: String,
    pub previous_output: String,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub analysis: String,
}

/// POST /api/v1/resume/optimize
///
/// Multipart fields: `resume` (PDF file), `job_description` (text) or
/// `job_url` (text, fetched and reduced to page text), and an optional
/// `rewrite` flag ("true" to run the rewrite + change-summary stages).
pub async fn handle_optimize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OptimizationReport>, AppError> {
    let mut resume_bytes: Option<bytes::Bytes> = None;
    let mut job_description: Option<String> = None;
    let mut job_url: Option<String> = None;
    let mut rewrite = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                resume_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?);
            }
            "job_description" => {
                job_description = Some(read_text_field(field).await?);
            }
            "job_url" => {
                job_url = Some(read_text_field(field).await?);
            }
            "rewrite" => {
                rewrite = read_text_field(field).await?.trim() == "true";
            }
            _ => {}
        }
    }

    let data = resume_bytes
        .ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let resume_text = extract_pdf_text(&data)?;

    let job_description = match (job_description, job_url) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some(url)) if !url.trim().is_empty() => fetch_page_text(url.trim()).await?,
        _ => {
            return Err(AppError::Validation(
                "Provide either 'job_description' or 'job_url'".to_string(),
            ))
        }
    };

    let report = state
        .optimizer
        .analyze(&resume_text, &job_description, rewrite)
        .await?;
    Ok(Json(report))
}

/// POST /api/v1/resume/refine
pub async fn handle_refine(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, AppError> {
    if request.feedback.trim().is_empty() {
        return Err(AppError::Validation("feedback cannot be empty".to_string()));
    }

    let analysis = state
        .optimizer
        .refine(
            &request.resume_text,
            &request.job_description,
            &request.previous_output,
            &request.feedback,
        )
        .await?;
    Ok(Json(RefineResponse { analysis }))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))
}
