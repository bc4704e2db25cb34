use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::{books, recommendations, users, AppState};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Users and reading logs
        .route("/users", post(users::create_user))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/users/:user_id/readings",
            get(users::list_readings).post(users::add_reading),
        )
        .route(
            "/users/:user_id/readings/:reading_id",
            put(users::update_reading),
        )
        .route(
            "/users/:user_id/preferences",
            get(users::get_preferences).put(users::put_preferences),
        )
        // Book catalog
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:book_id", get(books::get_book))
        // Recommendations
        .route(
            "/users/:user_id/recommendations",
            post(recommendations::recommend),
        )
        .route(
            "/users/:user_id/recommendations/detailed",
            get(recommendations::detailed),
        )
        .route(
            "/users/:user_id/recommendations/comfort-levels",
            get(recommendations::compare_levels),
        )
        .route(
            "/users/:user_id/recommendations/similar/:book_id",
            get(recommendations::similar),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
