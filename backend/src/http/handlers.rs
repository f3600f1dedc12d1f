//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! agenda service for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::dto::{
    AgendaInfo, AgendaListResponse, AgendaQuery, CategoriesResponse, HealthResponse,
    LiveAgendaView,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{Agenda, AgendaId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.service.repository().health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Live agenda
// =============================================================================

/// GET /v1/agenda
///
/// Latest agenda with live flags computed now, optionally filtered.
pub async fn get_live_agenda(
    State(state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> HandlerResult<LiveAgendaView> {
    let view = state.service.live_agenda(&query.to_filter()).await?;
    Ok(Json(view))
}

/// GET /v1/categories
pub async fn get_categories(State(state): State<AppState>) -> HandlerResult<CategoriesResponse> {
    let categories = state.service.categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

// =============================================================================
// Stored agendas
// =============================================================================

/// GET /v1/agendas
pub async fn list_agendas(State(state): State<AppState>) -> HandlerResult<AgendaListResponse> {
    let agendas = state.service.repository().list_agendas().await?;
    let total = agendas.len();
    Ok(Json(AgendaListResponse { agendas, total }))
}

/// POST /v1/agendas
///
/// Store an agenda document as published by the document store.
pub async fn create_agenda(
    State(state): State<AppState>,
    Json(agenda): Json<Agenda>,
) -> Result<(StatusCode, Json<AgendaInfo>), AppError> {
    let info = state.service.repository().store_agenda(&agenda).await?;
    info!(agenda_id = %info.agenda_id, day = %info.day, "Agenda stored via API");
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /v1/agendas/{agenda_id}
pub async fn get_agenda(
    State(state): State<AppState>,
    Path(agenda_id): Path<i64>,
    Query(query): Query<AgendaQuery>,
) -> HandlerResult<LiveAgendaView> {
    let view = state
        .service
        .annotated_agenda(AgendaId::new(agenda_id), &query.to_filter())
        .await?;
    Ok(Json(view))
}
