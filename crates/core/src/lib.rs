//! `scrawl-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage):
//! identifiers, the `Post` entity, the domain error taxonomy, and the
//! declarative input-validation layer.

pub mod error;
pub mod id;
pub mod post;
pub mod rules;

pub use error::{DomainError, DomainResult};
pub use id::{PostId, UserId};
pub use post::{NewPost, Post, PostPatch};
pub use rules::{CleanedFields, FieldErrors, RuleSet, validate};
