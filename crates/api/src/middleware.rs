use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use scrawl_auth::TokenAuthority;

use crate::context::AuthedUser;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenAuthority>,
}

/// Bearer-token gate for the JSON API.
///
/// A missing, malformed, unknown, or revoked token short-circuits with 401
/// before any handler logic runs.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let user_id = state
        .tokens
        .verify(token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(AuthedUser::new(user_id));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(extract_bearer(&headers), Ok("abc123"));
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn non_bearer_schemes_are_unauthorized() {
        let headers = headers_with_auth("Basic dXNlcjpwdw==");
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn empty_bearer_value_is_unauthorized() {
        let headers = headers_with_auth("Bearer   ");
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }
}
