use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use scrawl_auth::UserDirectory;
use scrawl_core::{rules, DomainError, NewPost, Post, PostPatch, UserId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthedUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(show_post).put(update_post).delete(delete_post))
}

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let posts: Vec<_> = services.posts.list().iter().map(dto::post_to_json).collect();

    Json(serde_json::json!({
        "message": "all posts",
        "posts": posts,
    }))
    .into_response()
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthedUser>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let post = match create_from_raw(&services, user.user_id(), &body) {
        Ok(post) => post,
        Err(response) => return response,
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "post created!",
            "post": dto::post_to_json(&post),
        })),
    )
        .into_response()
}

/// Validate a raw attribute map and persist the post.
///
/// Shared between the JSON API and the dashboard demo form; both paths get
/// identical rule evaluation and the same error responses.
pub(crate) fn create_from_raw(
    services: &AppServices,
    author: UserId,
    raw: &serde_json::Value,
) -> Result<Post, axum::response::Response> {
    let users = services.users.clone();
    let rules = rules::post_create_rules(Arc::new(move |id| users.exists(UserId::from(id))));

    let cleaned = rules::validate(raw, &rules)
        .map_err(|fields| errors::domain_error_to_response(fields.into()))?;

    let new: NewPost = serde_json::from_value(cleaned.into_value()).map_err(|e| {
        errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "deserialize_error",
            e.to_string(),
        )
    })?;

    // The API contract accepts a caller-chosen author; surface the mismatch
    // instead of silently attributing content across users.
    if new.user_id != author {
        tracing::warn!(
            claimed_user = %new.user_id,
            authenticated_user = %author,
            "post created on behalf of another user"
        );
    }

    Ok(services.posts.create(new))
}

pub async fn show_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_post_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.posts.get(id) {
        Some(post) => Json(serde_json::json!({
            "message": "post show",
            "post": dto::post_to_json(&post),
        }))
        .into_response(),
        None => errors::domain_error_to_response(DomainError::NotFound),
    }
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    // Validation precedes the lookup: a bad payload is reported even when
    // the id does not resolve.
    let cleaned = match rules::validate(&body, &rules::post_update_rules()) {
        Ok(cleaned) => cleaned,
        Err(fields) => return errors::domain_error_to_response(fields.into()),
    };

    let patch: PostPatch = match serde_json::from_value(cleaned.into_value()) {
        Ok(patch) => patch,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "deserialize_error",
                e.to_string(),
            )
        }
    };

    let id = match dto::parse_post_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.posts.update(id, patch) {
        Some(post) => Json(serde_json::json!({
            "message": "post updated!",
            "post": dto::post_to_json(&post),
        }))
        .into_response(),
        None => errors::domain_error_to_response(DomainError::NotFound),
    }
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_post_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.posts.delete(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::domain_error_to_response(DomainError::NotFound)
    }
}
