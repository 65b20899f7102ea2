//! Axum route handlers for the Search Configuration API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::search_config::{NewConfiguration, SearchConfiguration};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListConfigsResponse {
    pub configs: Vec<SearchConfiguration>,
    pub active: String,
}

#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub active: String,
}

/// GET /api/v1/search-configs
pub async fn handle_list(State(state): State<AppState>) -> Json<ListConfigsResponse> {
    Json(ListConfigsResponse {
        configs: state.store.list().await,
        active: state.store.active_name().await,
    })
}

/// POST /api/v1/search-configs
pub async fn handle_create(
    State(state): State<AppState>,
    Json(new): Json<NewConfiguration>,
) -> Result<Json<SearchConfiguration>, AppError> {
    if new.name.trim().is_empty() {
        return Err(AppError::Validation(
            "configuration name cannot be empty".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&new.temperature) {
        return Err(AppError::Validation(format!(
            "temperature {} outside [0.0, 1.0]",
            new.temperature
        )));
    }
    if !new.user_prompt_template.contains("{background}") {
        return Err(AppError::Validation(
            "user_prompt_template must contain the {background} placeholder".to_string(),
        ));
    }

    let config = state.store.create(new).await?;
    Ok(Json(config))
}

/// POST /api/v1/search-configs/:name/activate
pub async fn handle_activate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ActivateResponse>, AppError> {
    state.store.set_active(&name).await?;
    Ok(Json(ActivateResponse { active: name }))
}

/// DELETE /api/v1/search-configs/:name
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ListConfigsResponse>, AppError> {
    state.store.delete(&name).await?;
    Ok(Json(ListConfigsResponse {
        configs: state.store.list().await,
        active: state.store.active_name().await,
    }))
}
