//! Server-side sessions for the browser-facing login flow.
//!
//! A session is an opaque id (carried in a cookie) mapped to server-side
//! state: the logged-in user, the bearer token issued at login, and an
//! anti-fixation token that is regenerated whenever the session changes
//! hands (login, logout).

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use scrawl_core::UserId;

/// One server-side session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: Option<UserId>,
    /// Bearer token issued at login, surfaced on the dashboard.
    pub token: Option<String>,
    /// Anti-fixation token embedded in forms served under this session.
    pub csrf_token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn anonymous() -> Self {
        Self {
            id: opaque(),
            user_id: None,
            token: None,
            csrf_token: opaque(),
            created_at: Utc::now(),
        }
    }
}

fn opaque() -> String {
    Uuid::new_v4().simple().to_string()
}

/// In-memory session store.
///
/// Sessions never outlive the process; that matches their role here as
/// glue for the demo UI rather than durable state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh anonymous session (fresh id, fresh anti-fixation token).
    pub fn start(&self) -> Session {
        let session = Session::anonymous();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(session.id.clone(), session.clone());
        }
        session
    }

    /// Begin a fresh session bound to a logged-in user and their token.
    ///
    /// A brand-new id is always minted, so a pre-login session id can never
    /// be promoted to an authenticated one.
    pub fn log_in(&self, user_id: UserId, token: String) -> Session {
        let mut session = Session::anonymous();
        session.user_id = Some(user_id);
        session.token = Some(token);

        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(session.id.clone(), session.clone());
        }

        tracing::info!(user_id = %user_id, "session established");
        session
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let sessions = self.sessions.read().ok()?;
        sessions.get(id).cloned()
    }

    /// Remove the session, returning its final state. Absent ids are a
    /// no-op returning `None`.
    pub fn invalidate(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().ok()?;
        sessions.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_sessions_are_anonymous() {
        let store = SessionStore::new();
        let session = store.start();

        assert!(session.user_id.is_none());
        assert!(session.token.is_none());
        assert_eq!(store.get(&session.id), Some(session));
    }

    #[test]
    fn login_binds_user_and_token_under_a_fresh_id() {
        let store = SessionStore::new();
        let anonymous = store.start();
        let session = store.log_in(UserId::from_u64(3), "tok".to_string());

        assert_ne!(session.id, anonymous.id);
        assert_ne!(session.csrf_token, anonymous.csrf_token);
        assert_eq!(session.user_id, Some(UserId::from_u64(3)));
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[test]
    fn invalidate_removes_and_is_idempotent() {
        let store = SessionStore::new();
        let session = store.log_in(UserId::from_u64(1), "tok".to_string());

        assert!(store.invalidate(&session.id).is_some());
        assert!(store.get(&session.id).is_none());
        assert!(store.invalidate(&session.id).is_none());
    }

    #[test]
    fn unknown_session_id_resolves_to_none() {
        let store = SessionStore::new();
        assert!(store.get("missing").is_none());
    }
}
