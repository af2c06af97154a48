//! Dependency wiring for the HTTP layer.

use std::sync::Arc;

use scrawl_auth::{InMemoryTokenAuthority, InMemoryUserDirectory, TokenAuthority, UserDirectory};
use scrawl_infra::{InMemoryPostStore, PostRepository, SessionStore};

/// Everything a handler needs, passed explicitly instead of looked up from
/// ambient globals.
#[derive(Clone)]
pub struct AppServices {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub tokens: Arc<dyn TokenAuthority>,
    pub sessions: Arc<SessionStore>,
}

impl AppServices {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserDirectory>,
        tokens: Arc<dyn TokenAuthority>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            posts,
            users,
            tokens,
            sessions,
        }
    }
}

/// In-memory wiring (dev): seeds a demo account so the login flow works out
/// of the box.
pub fn build_services() -> AppServices {
    let users = Arc::new(InMemoryUserDirectory::new());
    let demo = users.add_user("Demo User", "demo@scrawl.dev", "password");
    tracing::info!(user_id = %demo, "seeded demo account demo@scrawl.dev (password: password)");

    AppServices::new(
        Arc::new(InMemoryPostStore::new()),
        users,
        Arc::new(InMemoryTokenAuthority::new()),
        Arc::new(SessionStore::new()),
    )
}
