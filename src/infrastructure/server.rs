// Server module - Provides reusable HTTP server functionality

use axum::Router;
use axum::http::HeaderValue;
use std::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;

/// Build the full application: API under `/api`, Swagger UI, CORS and tracing
pub fn build_router(state: AppState) -> Router {
    let mut allowed_origins = Vec::new();
    for origin in &state.config.cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => allowed_origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api::api_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    (preferred_port.saturating_add(1)..preferred_port.saturating_add(100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_scan_near_the_top_of_the_range_does_not_overflow() {
        // Any result is fine; the scan must simply not panic.
        let _ = find_available_port(u16::MAX - 10);
        let _ = find_available_port(u16::MAX);
    }
}
