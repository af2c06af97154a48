use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use scrawl_core::DomainError;

/// Translate a domain error into its single HTTP response.
///
/// This is the one place status codes are assigned; handlers return
/// `DomainError` values and never pick codes themselves.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": "The given data was invalid.",
                "errors": errors,
            })),
        )
            .into_response(),
        // An unparseable id cannot name an existing post.
        DomainError::InvalidId(_) | DomainError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "post not found")
        }
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
