use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use super::{name_from_path, run_blocking, AppState};
use crate::api::envelope::Envelope;
use crate::api::error::ApiError;
use crate::api::models::LimitParams;
use crate::api::parsers::parse_limit;

fn limit_from(params: Option<Query<LimitParams>>) -> usize {
    let Query(params) = params.unwrap_or_default();
    parse_limit(params.limit.as_deref())
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let service = state.dashboard.clone();
    let stats = run_blocking(move || service.stats())
        .await?
        .map_err(|e| ApiError::internal("Error al obtener estadísticas", e))?;

    Ok(Envelope::ok(stats))
}

pub async fn recent_players(
    State(state): State<Arc<AppState>>,
    params: Option<Query<LimitParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = limit_from(params);

    let service = state.dashboard.clone();
    let players = run_blocking(move || service.recent_players(limit))
        .await?
        .map_err(|e| ApiError::internal("Error al obtener jugadores", e))?;

    Ok(Envelope::ok(players))
}

pub async fn recent_matches(
    State(state): State<Arc<AppState>>,
    params: Option<Query<LimitParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = limit_from(params);

    let service = state.dashboard.clone();
    let matches = run_blocking(move || service.recent_matches(limit))
        .await?
        .map_err(|e| ApiError::internal("Error al obtener partidos", e))?;

    Ok(Envelope::ok(matches))
}

pub async fn tournaments(
    State(state): State<Arc<AppState>>,
    params: Option<Query<LimitParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = limit_from(params);

    let service = state.dashboard.clone();
    let tournaments = run_blocking(move || service.tournaments(limit))
        .await?
        .map_err(|e| ApiError::internal("Error al obtener torneos", e))?;

    Ok(Envelope::ok(tournaments))
}

pub async fn matches_won(
    State(state): State<Arc<AppState>>,
    nombre: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let name = name_from_path(nombre)?;

    let service = state.dashboard.clone();
    let matches = run_blocking(move || service.matches_won_by_player(&name))
        .await?
        .map_err(|e| ApiError::internal("Error al consultar partidos ganados", e))?;

    Ok(Envelope::ok(matches))
}

/// An unknown name is a successful lookup with `data: null`.
pub async fn player_by_name(
    State(state): State<Arc<AppState>>,
    nombre: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let name = name_from_path(nombre)?;

    let service = state.dashboard.clone();
    let player = run_blocking(move || service.player_by_name(&name))
        .await?
        .map_err(|e| ApiError::internal("Error al buscar jugador", e))?;

    Ok(Envelope::ok(player))
}
