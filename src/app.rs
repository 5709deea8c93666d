use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::basic_auth_middleware;
use crate::state::AppState;

/// Build the full router over the given state
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected (Basic credentials on every request)
        .merge(auth_routes(state.clone()))
        .merge(item_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security))
    } else {
        router
    };

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new().route("/auth/signup", post(auth::signup))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use axum::routing::delete;
    use handlers::auth;

    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", put(auth::change_password))
        .route("/auth/deleteuser/:username", delete(auth::delete_user))
        .route_layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

fn item_routes(state: AppState) -> Router<AppState> {
    use handlers::items;

    Router::new()
        // Collection; reachable with and without the trailing slash
        .route("/items/", get(items::item_list).post(items::item_create))
        .route("/items", get(items::item_list).post(items::item_create))
        // Individual item
        .route(
            "/items/:id",
            get(items::item_show)
                .put(items::item_update)
                .delete(items::item_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Items API (Rust)",
        "version": version,
        "description": "Basic-auth CRUD backend for user-owned items",
        "endpoints": {
            "signup": "POST /auth/signup (public)",
            "me": "GET /auth/me (basic auth)",
            "change_password": "PUT /auth/change-password (basic auth)",
            "delete_user": "DELETE /auth/deleteuser/:username (basic auth)",
            "items": "/items/[:id] (basic auth)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "memory" })),
        );
    };

    match database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
