use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

/// Router wrapped so trailing slashes are trimmed before route matching
pub type App = NormalizePath<Router>;

/// Build the servable application: the router behind path normalization
pub fn build_app(state: AppState, allowed_origins: &[String]) -> App {
    NormalizePath::trim_trailing_slash(build_router(state, allowed_origins))
}

/// Build and configure the application router
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Account routes
        .route(
            "/api/accounts",
            post(handlers::create_account).get(handlers::list_accounts),
        )
        .route(
            "/api/accounts/{id}",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::deactivate_account),
        )
        // Middleware
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
