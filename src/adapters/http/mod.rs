//! HTTP adapters - REST API implementations.
//!
//! [`build_router`] assembles the full service: intake routes plus CORS and
//! request tracing layers.

pub mod intake;

pub use intake::{intake_router, IntakeAppState};

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer. No origins means any origin is allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}

/// Build the application router with middleware applied.
pub fn build_router(state: IntakeAppState, cors_origins: &[String]) -> Router {
    intake_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}
