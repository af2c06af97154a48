//! Opaque bearer tokens: issuance, verification, revocation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use scrawl_core::UserId;

/// A freshly issued bearer token.
///
/// The token string is opaque to callers; nothing about the holder can be
/// derived from it without asking the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
}

/// Issues, verifies, and revokes opaque bearer tokens.
///
/// Revocation is synchronous: once `revoke_all` returns, `verify` must
/// reject every token it removed.
pub trait TokenAuthority: Send + Sync {
    /// Mint a new token bound to `user_id`.
    fn issue(&self, user_id: UserId) -> AccessToken;

    /// Resolve a presented token to its owner, or `None` if the token was
    /// never issued or has been revoked.
    fn verify(&self, token: &str) -> Option<UserId>;

    /// Revoke every token bound to `user_id`, returning how many were
    /// removed.
    fn revoke_all(&self, user_id: UserId) -> usize;
}

impl<S> TokenAuthority for Arc<S>
where
    S: TokenAuthority + ?Sized,
{
    fn issue(&self, user_id: UserId) -> AccessToken {
        (**self).issue(user_id)
    }

    fn verify(&self, token: &str) -> Option<UserId> {
        (**self).verify(token)
    }

    fn revoke_all(&self, user_id: UserId) -> usize {
        (**self).revoke_all(user_id)
    }
}

#[derive(Debug, Clone)]
struct IssuedToken {
    user_id: UserId,
    issued_at: DateTime<Utc>,
}

/// In-memory token authority for dev/test.
///
/// Tokens have no expiry; they live until individually or collectively
/// revoked.
#[derive(Debug, Default)]
pub struct InMemoryTokenAuthority {
    tokens: RwLock<HashMap<String, IssuedToken>>,
}

impl InMemoryTokenAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_token_string() -> String {
        // Two v4 UUIDs' worth of randomness, hex-encoded.
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }
}

impl TokenAuthority for InMemoryTokenAuthority {
    fn issue(&self, user_id: UserId) -> AccessToken {
        let token = Self::mint_token_string();
        let issued_at = Utc::now();

        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(
                token.clone(),
                IssuedToken {
                    user_id,
                    issued_at,
                },
            );
        }

        tracing::info!(user_id = %user_id, "issued bearer token");

        AccessToken {
            token,
            user_id,
            issued_at,
        }
    }

    fn verify(&self, token: &str) -> Option<UserId> {
        let tokens = self.tokens.read().ok()?;
        tokens.get(token).map(|issued| issued.user_id)
    }

    fn revoke_all(&self, user_id: UserId) -> usize {
        let mut tokens = match self.tokens.write() {
            Ok(tokens) => tokens,
            Err(_) => return 0,
        };

        let before = tokens.len();
        tokens.retain(|_, issued| issued.user_id != user_id);
        let revoked = before - tokens.len();

        tracing::info!(user_id = %user_id, revoked, "revoked all bearer tokens for user");
        revoked
    }
}
