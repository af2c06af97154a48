//! `scrawl-infra` — storage adapters behind the domain's trait seams.
//!
//! Durable state lives outside the request handlers: the post repository
//! and the server-side session store. Everything here provides atomic
//! single-record operations; no call spans multiple records transactionally.

pub mod posts;
pub mod session;

pub use posts::{InMemoryPostStore, PostRepository};
pub use session::{Session, SessionStore};
