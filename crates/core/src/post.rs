//! The `Post` entity and its write-side shapes.

use serde::{Deserialize, Serialize};

use crate::id::{PostId, UserId};

/// A persisted post.
///
/// # Invariants
/// - `id` is assigned by the store on creation and never changes.
/// - `user_id` references an existing user at creation time and never
///   changes afterwards (updates cannot reassign ownership).
/// - `title` and `content` are non-empty validated strings; `title` is at
///   most [`TITLE_MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub user_id: UserId,
}

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Validated input for creating a post. The id comes from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: UserId,
}

/// Validated partial update. Only supplied fields are overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Post {
    /// Overwrite the fields present in `patch`; id and ownership are untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}
