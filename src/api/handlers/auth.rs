use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{run_blocking, AppState};
use crate::api::envelope::Envelope;
use crate::api::error::ApiError;
use crate::api::models::{LoginRequest, RegisterRequest};

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let service = state.auth.clone();
    let user = run_blocking(move || service.register(request)).await??;

    Ok((
        StatusCode::CREATED,
        Envelope::ok_with_message(user, "Usuario registrado correctamente"),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let service = state.auth.clone();
    let session = run_blocking(move || service.login(request)).await??;

    Ok(Envelope::ok_with_message(session, "Inicio de sesión exitoso"))
}

pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers);

    let service = state.auth.clone();
    let user = run_blocking(move || service.verify(token.as_deref())).await??;

    Ok(Envelope::ok(user))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;

    async fn verify(app: &TestApp, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri("/api/verify-token");
        if let Some(value) = auth {
            request = request.header("Authorization", value);
        }
        send(app, request.body(Body::empty()).unwrap()).await
    }

    #[tokio::test]
    async fn test_register_login_and_verify() {
        let app = demo_app();

        let (status, body) = post_json(
            &app,
            "/api/register",
            json!({"nombre": "Ana", "email": "ana@club.com", "password": "secreto1"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["email"], "ana@club.com");

        let (status, body) = post_json(
            &app,
            "/api/login",
            json!({"email": "ana@club.com", "password": "secreto1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let (status, body) = verify(&app, Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nombre"], "Ana");
    }

    #[tokio::test]
    async fn test_auth_failures_use_error_envelope() {
        let app = demo_app();

        let (status, body) = post_json(
            &app,
            "/api/login",
            json!({"email": "nadie@club.com", "password": "secreto1"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Credenciales inválidas");

        let (status, _) = verify(&app, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = verify(&app, Some("Bearer desconocido")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post_json(&app, "/api/register", json!({"nombre": "Ana"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc ".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));
    }
}
