//! User directory seam.
//!
//! Users are owned by an external system; the API only ever needs two
//! questions answered: does this id exist, and do these credentials belong
//! to someone. The in-memory implementation backs dev and tests.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use scrawl_core::UserId;

/// Public view of a directory entry. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Read-only authentication questions against the external user store.
pub trait UserDirectory: Send + Sync {
    /// Whether a user with this id exists.
    fn exists(&self, id: UserId) -> bool;

    /// Profile lookup for display purposes.
    fn get(&self, id: UserId) -> Option<UserProfile>;

    /// Resolve credentials to the owning user, or `None` on any mismatch.
    fn verify_credentials(&self, email: &str, password: &str) -> Option<UserId>;
}

impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    fn exists(&self, id: UserId) -> bool {
        (**self).exists(id)
    }

    fn get(&self, id: UserId) -> Option<UserProfile> {
        (**self).get(id)
    }

    fn verify_credentials(&self, email: &str, password: &str) -> Option<UserId> {
        (**self).verify_credentials(email, password)
    }
}

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    next_id: u64,
    users: BTreeMap<u64, UserRecord>,
}

/// Seedable in-memory directory for dev/test.
///
/// Credential checks compare the seeded password directly; real deployments
/// replace this implementation behind the [`UserDirectory`] trait.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<DirectoryInner>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return the assigned id.
    pub fn add_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> UserId {
        let mut inner = self.inner.write().expect("user directory lock poisoned");

        inner.next_id += 1;
        let id = inner.next_id;
        inner.users.insert(
            id,
            UserRecord {
                name: name.into(),
                email: email.into(),
                password: password.into(),
            },
        );

        UserId::from_u64(id)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn exists(&self, id: UserId) -> bool {
        match self.inner.read() {
            Ok(inner) => inner.users.contains_key(&id.as_u64()),
            Err(_) => false,
        }
    }

    fn get(&self, id: UserId) -> Option<UserProfile> {
        let inner = self.inner.read().ok()?;
        inner.users.get(&id.as_u64()).map(|record| UserProfile {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
        })
    }

    fn verify_credentials(&self, email: &str, password: &str) -> Option<UserId> {
        let inner = self.inner.read().ok()?;
        inner
            .users
            .iter()
            .find(|(_, record)| record.email == email && record.password == password)
            .map(|(id, _)| UserId::from_u64(*id))
    }
}
