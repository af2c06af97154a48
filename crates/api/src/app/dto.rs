//! Request/response mapping helpers.

use scrawl_core::{DomainError, Post, PostId};

/// Parse a path segment into a post id.
///
/// Anything non-numeric cannot name an existing post, so the caller maps
/// the error to not-found rather than a bad-request.
pub fn parse_post_id(raw: &str) -> Result<PostId, DomainError> {
    raw.parse::<PostId>()
}

pub fn post_to_json(post: &Post) -> serde_json::Value {
    serde_json::json!({
        "id": post.id,
        "title": post.title,
        "content": post.content,
        "user_id": post.user_id,
    })
}
