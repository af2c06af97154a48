//! Post repository: keyed storage of posts behind an explicit trait.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use scrawl_core::{NewPost, Post, PostId, PostPatch};

/// Durable keyed storage of posts.
///
/// Lookup by id is direct keyed access, never a scan. Each method is a
/// single atomic store operation: a create either fully succeeds with an
/// assigned id or does nothing, and a delete either removes the record or
/// reports it absent.
pub trait PostRepository: Send + Sync {
    /// Persist a new post, assigning the next id.
    fn create(&self, new: NewPost) -> Post;

    /// Keyed lookup.
    fn get(&self, id: PostId) -> Option<Post>;

    /// Overwrite only the fields present in `patch`; `id` and `user_id`
    /// are never altered. Returns the updated post, or `None` if absent.
    fn update(&self, id: PostId, patch: PostPatch) -> Option<Post>;

    /// Remove the post. Returns whether a record existed.
    fn delete(&self, id: PostId) -> bool;

    /// Every post, in insertion order.
    fn list(&self) -> Vec<Post>;
}

impl<S> PostRepository for Arc<S>
where
    S: PostRepository + ?Sized,
{
    fn create(&self, new: NewPost) -> Post {
        (**self).create(new)
    }

    fn get(&self, id: PostId) -> Option<Post> {
        (**self).get(id)
    }

    fn update(&self, id: PostId, patch: PostPatch) -> Option<Post> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: PostId) -> bool {
        (**self).delete(id)
    }

    fn list(&self) -> Vec<Post> {
        (**self).list()
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    // Keyed by id; ids are monotonic, so ascending key order equals
    // insertion order.
    posts: BTreeMap<u64, Post>,
}

/// In-memory post store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for InMemoryPostStore {
    fn create(&self, new: NewPost) -> Post {
        let mut inner = self.inner.write().expect("post store lock poisoned");

        inner.next_id += 1;
        let post = Post {
            id: PostId::from_u64(inner.next_id),
            title: new.title,
            content: new.content,
            user_id: new.user_id,
        };
        inner.posts.insert(post.id.as_u64(), post.clone());

        tracing::info!(post_id = %post.id, user_id = %post.user_id, "created post");
        post
    }

    fn get(&self, id: PostId) -> Option<Post> {
        let inner = self.inner.read().ok()?;
        inner.posts.get(&id.as_u64()).cloned()
    }

    fn update(&self, id: PostId, patch: PostPatch) -> Option<Post> {
        let mut inner = self.inner.write().ok()?;
        let post = inner.posts.get_mut(&id.as_u64())?;
        post.apply(patch);

        tracing::info!(post_id = %id, "updated post");
        Some(post.clone())
    }

    fn delete(&self, id: PostId) -> bool {
        let mut inner = match self.inner.write() {
            Ok(inner) => inner,
            Err(_) => return false,
        };

        let removed = inner.posts.remove(&id.as_u64()).is_some();
        if removed {
            tracing::info!(post_id = %id, "deleted post");
        }
        removed
    }

    fn list(&self) -> Vec<Post> {
        match self.inner.read() {
            Ok(inner) => inner.posts.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
