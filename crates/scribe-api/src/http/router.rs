//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`; trailing slashes are trimmed before
//! routing, so `/api/v1/group/cats/` and `/api/v1/group/cats` are the same page.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/", get(handlers::post::index))
        .route("/group/{slug}", get(handlers::post::group_list))
        .route("/profile/{username}", get(handlers::post::profile))
        .route("/posts/{id}", get(handlers::post::post_detail))
        .route(
            "/create",
            get(handlers::post::create_form).post(handlers::post::create_post),
        )
        .route(
            "/posts/{id}/edit",
            get(handlers::post::edit_form).post(handlers::post::edit_post),
        )
        .route("/groups", get(handlers::group::list_groups));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped in trailing-slash normalization.
///
/// The normalization has to run before routing, so it wraps the router as a
/// service instead of being added with `Router::layer`.
pub fn build_app(state: AppState) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(build_router(state))
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: NormalizePath<Router>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown)
    .await
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
