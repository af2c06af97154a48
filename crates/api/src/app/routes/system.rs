use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use scrawl_auth::UserDirectory;

use crate::app::services::AppServices;
use crate::context::AuthedUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The identity behind the presented bearer token.
pub async fn current_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthedUser>,
) -> impl IntoResponse {
    match services.users.get(user.user_id()) {
        Some(profile) => Json(serde_json::json!({
            "user_id": profile.id,
            "name": profile.name,
            "email": profile.email,
        })),
        None => Json(serde_json::json!({ "user_id": user.user_id() })),
    }
}
