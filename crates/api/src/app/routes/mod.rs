use axum::{routing::get, routing::post, Router};

pub mod posts;
pub mod session;
pub mod system;

/// Router for the bearer-protected JSON API (mounted under `/api/v1`).
pub fn api_router() -> Router {
    Router::new()
        .route("/user", get(system::current_user))
        .nest("/posts", posts::router())
}

/// Router for the browser-facing session surface.
pub fn web_router() -> Router {
    Router::new()
        .route("/", get(session::welcome))
        .route("/login", get(session::create).post(session::store))
        .route("/logout", post(session::destroy))
        .route("/dashboard", get(session::dashboard))
        .route("/dashboard/posts", post(session::demo_create_post))
}
