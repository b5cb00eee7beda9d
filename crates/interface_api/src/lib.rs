//! HTTP API Layer
//!
//! This crate provides the REST API for policy records using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for policies and health checks
//! - **Middleware**: Request logging
//! - **DTOs**: camelCase request/response bodies with field rules
//! - **Error Handling**: Consistent error responses
//!
//! # Routes
//!
//! | verb   | path                 |
//! |--------|----------------------|
//! | GET    | `/api/policies`      |
//! | POST   | `/api/policies`      |
//! | GET    | `/api/policies/:id`  |
//! | PUT    | `/api/policies/:id`  |
//! | DELETE | `/api/policies/:id`  |
//! | GET    | `/health`            |
//! | GET    | `/health/ready`      |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use domain_policy::PolicyService;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{health, policy};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PolicyService,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Policy service over the configured record store
/// * `config` - API configuration
pub fn create_router(service: PolicyService, config: ApiConfig) -> Router {
    let cors = cors_layer(&config);
    let state = AppState { service, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let policy_routes = Router::new()
        .route(
            "/api/policies",
            get(policy::list_policies).post(policy::create_policy),
        )
        .route(
            "/api/policies/:id",
            get(policy::get_policy)
                .put(policy::update_policy)
                .delete(policy::delete_policy),
        )
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .merge(policy_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Builds the CORS layer from the configured origin allow-list
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
