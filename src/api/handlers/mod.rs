use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::documents::DocumentStore;
use crate::services::auth::AuthService;
use crate::services::dashboard::DashboardService;
use crate::services::players::PlayerService;

pub mod auth;
pub mod dashboard;
pub mod players;

pub const MISSING_PLAYER_NAME: &str = "El nombre del jugador es requerido";

pub struct AppState {
    pub players: PlayerService,
    pub dashboard: DashboardService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(pool: DbPool, documents: Arc<DocumentStore>, config: &AppConfig) -> Self {
        Self {
            players: PlayerService::new(pool.clone(), documents),
            dashboard: DashboardService::new(pool.clone()),
            auth: AuthService::new(pool, config.auth.session_ttl_hours),
        }
    }
}

/// Runs store work off the async executor. Pool waits happen here.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::internal("Error interno del servidor", e.into()))
}

/// Trimmed player name from a path segment; blank is a client error.
pub(crate) fn require_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(MISSING_PLAYER_NAME.to_string()));
    }
    Ok(name.to_string())
}

/// Name segment of the `:nombre` routes; undecodable segments are client errors too.
pub(crate) fn name_from_path(
    segment: Result<Path<String>, PathRejection>,
) -> Result<String, ApiError> {
    let Path(raw) = segment.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    require_name(&raw)
}

/// Target of the name routes when the segment is absent altogether.
pub async fn missing_player_name() -> ApiError {
    ApiError::BadRequest(MISSING_PLAYER_NAME.to_string())
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Ruta no encontrada".to_string())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Método no permitido".to_string())
}

pub async fn root() -> &'static str {
    "¡El servidor está funcionando!"
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::routes::create_router;
    use crate::database::test_support::demo_pool;

    pub struct TestApp {
        pub router: Router,
        _db: tempfile::TempDir,
        _docs: tempfile::TempDir,
    }

    pub fn demo_app() -> TestApp {
        let (db, pool) = demo_pool();
        let docs = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(docs.path().join("jugadores.jsonl")).unwrap();
        let state = Arc::new(AppState::new(pool, Arc::new(store), &AppConfig::default()));

        TestApp {
            router: create_router(state),
            _db: db,
            _docs: docs,
        }
    }

    pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unknown_route_gets_error_envelope() {
        let app = demo_app();
        let (status, body) = get_json(&app, "/api/nada").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Ruta no encontrada");
    }

    #[tokio::test]
    async fn test_wrong_method_gets_error_envelope() {
        let app = demo_app();
        let (status, body) = post_json(&app, "/api/dashboard/stats", serde_json::json!({})).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Método no permitido");
    }

    #[test]
    fn test_require_name_trims() {
        assert_eq!(super::require_name("  Ana ").unwrap(), "Ana");
        assert!(super::require_name("   ").is_err());
    }
}
