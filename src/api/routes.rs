use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    auth, dashboard, method_not_allowed, missing_player_name, not_found, players, root, AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(auth_routes())
        .merge(player_routes())
        .merge(dashboard_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
}

fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/register", post(auth::register))
        .route("/api/verify-token", get(auth::verify_token))
}

fn player_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/jugadores/test", get(players::test_connectivity))
        .route("/api/jugadores/todos", get(players::list_all_players))
        .route("/api/jugadores/buscar/:nombre", get(players::search_players))
        .route("/api/jugadores/buscar/", get(missing_player_name))
        .route("/api/jugadores/buscar", get(missing_player_name))
        .route("/api/jugadores/mongo/todos", get(players::list_document_players))
        .route("/api/jugadores/mongo", post(players::create_document_player))
}

fn dashboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/jugadores", get(dashboard::recent_players))
        .route("/api/dashboard/partidos", get(dashboard::recent_matches))
        .route("/api/dashboard/torneos", get(dashboard::tournaments))
        .route("/api/dashboard/partidos-ganados/:nombre", get(dashboard::matches_won))
        .route("/api/dashboard/partidos-ganados/", get(missing_player_name))
        .route("/api/dashboard/partidos-ganados", get(missing_player_name))
        .route("/api/dashboard/jugador/:nombre", get(dashboard::player_by_name))
        .route("/api/dashboard/jugador/", get(missing_player_name))
        .route("/api/dashboard/jugador", get(missing_player_name))
}
