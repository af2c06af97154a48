//! `scrawl-auth` — authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns the
//! opaque bearer-token lifecycle (issue, verify, revoke) and the user
//! directory seam the rest of the system authenticates against.

pub mod directory;
pub mod token;

pub use directory::{InMemoryUserDirectory, UserDirectory, UserProfile};
pub use token::{AccessToken, InMemoryTokenAuthority, TokenAuthority};
