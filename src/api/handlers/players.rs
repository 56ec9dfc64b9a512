use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{name_from_path, run_blocking, AppState};
use crate::api::envelope::Envelope;
use crate::api::error::ApiError;
use crate::documents::{DocumentError, NewDocumentPlayer};

pub async fn test_connectivity(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state.players.clone();
    let report = run_blocking(move || service.test_connectivity())
        .await?
        .map_err(|e| ApiError::internal("Error en test de servicio", e))?;

    Ok(Envelope::ok(report))
}

pub async fn list_all_players(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state.players.clone();
    let players = run_blocking(move || service.list_all())
        .await?
        .map_err(|e| ApiError::internal("Error al obtener todos los jugadores", e))?;

    Ok(Envelope::ok(players))
}

pub async fn search_players(
    State(state): State<Arc<AppState>>,
    nombre: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let name = name_from_path(nombre)?;

    let service = state.players.clone();
    let players = run_blocking(move || service.find_by_name(&name))
        .await?
        .map_err(|e| ApiError::internal("Error al buscar jugadores", e))?;

    Ok(Envelope::ok(players))
}

pub async fn list_document_players(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state.players.clone();
    let players = run_blocking(move || service.list_document_players())
        .await?
        .map_err(|e| ApiError::internal("Error al obtener jugadores de la base documental", e))?;

    Ok(Envelope::ok(players))
}

pub async fn create_document_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDocumentPlayer>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let service = state.players.clone();
    let created = run_blocking(move || service.create_document_player(new))
        .await?
        .map_err(|e| match e.downcast_ref::<DocumentError>() {
            Some(invalid) => ApiError::BadRequest(invalid.to_string()),
            None => ApiError::internal("Error al guardar jugador en la base documental", e),
        })?;

    Ok((
        StatusCode::CREATED,
        Envelope::ok_with_message(created, "Jugador creado correctamente"),
    ))
}
