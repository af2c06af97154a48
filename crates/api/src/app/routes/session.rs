//! Browser-facing session flow: login, logout, and the developer dashboard.
//!
//! These routes establish and tear down server-side sessions; the bearer
//! tokens they hand out are what the JSON API actually authenticates with.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;

use scrawl_auth::{TokenAuthority, UserDirectory, UserProfile};
use scrawl_infra::Session;

use crate::app::services::AppServices;
use crate::app::{errors, routes::posts};

const SESSION_COOKIE: &str = "scrawl_session";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    #[serde(rename = "_token", default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DemoPostForm {
    pub title: String,
    pub content: String,
    pub user_id: String,
    #[serde(rename = "_token")]
    pub token: String,
}

/// Anonymous landing page.
pub async fn welcome() -> Html<String> {
    Html(render_welcome())
}

/// Display the login view.
pub async fn create() -> Html<String> {
    Html(render_login(None))
}

/// Handle an incoming authentication request.
pub async fn store(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<LoginForm>,
) -> axum::response::Response {
    let Some(user_id) = services
        .users
        .verify_credentials(&form.email, &form.password)
    else {
        tracing::info!(email = %form.email, "login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Html(render_login(Some(
                "These credentials do not match our records.",
            ))),
        )
            .into_response();
    };

    // Issue a fresh API token and bind it to a brand-new session.
    let issued = services.tokens.issue(user_id);
    let session = services.sessions.log_in(user_id, issued.token);

    redirect_with_session("/dashboard", &session.id)
}

/// Destroy an authenticated session.
///
/// Revokes every token owned by the user, drops the session, and hands the
/// browser a fresh anonymous session with a regenerated anti-fixation
/// token. Calling this without an active session is a no-op with the same
/// redirect.
pub async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    form: Option<Form<LogoutForm>>,
) -> axum::response::Response {
    let Some(session) = current_session(&services, &headers) else {
        return Redirect::to("/").into_response();
    };

    let supplied = form.as_ref().and_then(|Form(f)| f.token.as_deref());
    if supplied != Some(session.csrf_token.as_str()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "csrf_mismatch",
            "page expired, reload and retry",
        );
    }

    if let Some(user_id) = session.user_id {
        let revoked = services.tokens.revoke_all(user_id);
        tracing::info!(user_id = %user_id, revoked, "logout revoked bearer tokens");
    }

    services.sessions.invalidate(&session.id);

    let fresh = services.sessions.start();
    redirect_with_session("/", &fresh.id)
}

/// Developer dashboard: shows the session's bearer token and a demo form.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let Some(session) = current_session(&services, &headers) else {
        return Redirect::to("/login").into_response();
    };
    let Some(user_id) = session.user_id else {
        return Redirect::to("/login").into_response();
    };

    let profile = services.users.get(user_id);
    Html(render_dashboard(&session, profile.as_ref())).into_response()
}

/// Demo create-post form submission (session auth, not bearer).
///
/// Funnels through the exact same validation and repository path as the
/// JSON endpoint.
pub async fn demo_create_post(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Form(form): Form<DemoPostForm>,
) -> axum::response::Response {
    let Some(session) = current_session(&services, &headers) else {
        return Redirect::to("/login").into_response();
    };
    let Some(user_id) = session.user_id else {
        return Redirect::to("/login").into_response();
    };

    if form.token != session.csrf_token {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "csrf_mismatch",
            "page expired, reload and retry",
        );
    }

    // Form values arrive as strings; the API contract wants a numeric
    // user_id. Unparseable input is passed through for the rules to reject.
    let user_value = match form.user_id.trim().parse::<u64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(form.user_id.clone()),
    };
    let raw = serde_json::json!({
        "title": form.title,
        "content": form.content,
        "user_id": user_value,
    });

    match posts::create_from_raw(&services, user_id, &raw) {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(response) => response,
    }
}

fn current_session(services: &AppServices, headers: &HeaderMap) -> Option<Session> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let id = cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)?;

    services.sessions.get(id)
}

fn redirect_with_session(to: &str, session_id: &str) -> axum::response::Response {
    let mut response = Redirect::to(to).into_response();
    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = header::HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_welcome() -> String {
    "<!doctype html>\n<html><head><title>scrawl</title></head><body>\n\
     <h1>scrawl</h1>\n\
     <p>A small posts API. <a href=\"/login\">Log in</a> to get a bearer token.</p>\n\
     </body></html>"
        .to_string()
}

fn render_login(error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape_html(message)),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n<html><head><title>Log in</title></head><body>\n\
         <h1>Log in</h1>\n{error_html}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n</body></html>"
    )
}

fn render_dashboard(session: &Session, profile: Option<&UserProfile>) -> String {
    let token = session.token.as_deref().unwrap_or("No Token Found");
    let greeting = match profile {
        Some(profile) => format!(
            "Signed in as {} (user id {})",
            escape_html(&profile.name),
            profile.id
        ),
        None => "Signed in".to_string(),
    };
    let csrf = &session.csrf_token;
    let user_id = session
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    format!(
        "<!doctype html>\n<html><head><title>Dashboard</title></head><body>\n\
         <h1>Test All APIs</h1>\n\
         <p>{greeting}</p>\n\
         <h2>Your token for API requests</h2>\n\
         <p>Send it in the <code>Authorization</code> header as a bearer token:</p>\n\
         <pre><code>Authorization: Bearer {token}</code></pre>\n\
         <h2>Endpoints</h2>\n\
         <ul>\n\
         <li><code>GET /api/v1/posts</code> — all posts</li>\n\
         <li><code>POST /api/v1/posts</code> — create (title, content, user_id)</li>\n\
         <li><code>GET /api/v1/posts/{{id}}</code> — one post</li>\n\
         <li><code>PUT /api/v1/posts/{{id}}</code> — update (title?, content?)</li>\n\
         <li><code>DELETE /api/v1/posts/{{id}}</code> — delete</li>\n\
         </ul>\n\
         <h2>Create a post from the browser</h2>\n\
         <form method=\"post\" action=\"/dashboard/posts\">\n\
         <input type=\"hidden\" name=\"_token\" value=\"{csrf}\">\n\
         <label>Title <input type=\"text\" name=\"title\"></label>\n\
         <label>Content <textarea name=\"content\"></textarea></label>\n\
         <label>User id <input type=\"text\" name=\"user_id\" value=\"{user_id}\"></label>\n\
         <button type=\"submit\">Create</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/logout\">\n\
         <input type=\"hidden\" name=\"_token\" value=\"{csrf}\">\n\
         <button type=\"submit\">Log out</button>\n\
         </form>\n\
         </body></html>"
    )
}
