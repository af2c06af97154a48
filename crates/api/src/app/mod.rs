//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: dependency wiring (post store, user directory, token
//!   authority, session store)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
    };

    // JSON API: every route requires a verified bearer token, checked
    // before the handler stack sees the request.
    let api = routes::api_router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services.clone())),
    );

    // Browser surface: session-cookie based, no bearer requirement.
    let web = routes::web_router().layer(Extension(services));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", api)
        .merge(web)
}
