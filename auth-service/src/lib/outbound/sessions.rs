use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "sessionid";

/// Server-side view of an authenticated session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
}

/// In-memory session store.
///
/// Backs the cookie-based mechanism that coexists with the bearer token.
/// Sessions live for the lifetime of the process; the token remains valid
/// independently of them.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an authenticated user.
    ///
    /// # Returns
    /// The session identifier to hand to the client as a cookie value.
    pub async fn insert(&self, user: &User) -> Uuid {
        let session_id = Uuid::new_v4();

        let record = SessionRecord {
            user_id: user.id,
            username: user.username.as_str().to_string(),
            role: user.role.as_str().to_string(),
        };

        self.sessions.write().await.insert(session_id, record);

        session_id
    }

    /// Look up a session by identifier.
    pub async fn get(&self, session_id: &Uuid) -> Option<SessionRecord> {
        self.sessions.read().await.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::RoleName;
    use crate::domain::user::models::Username;

    fn user() -> User {
        User {
            id: UserId(7),
            username: Username::new("sue".to_string()).unwrap(),
            password_hash: "$2b$08$digest".to_string(),
            role: RoleName::new("student".to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemorySessionStore::new();
        let user = user();

        let session_id = store.insert(&user).await;
        let record = store.get(&session_id).await.expect("Session missing");

        assert_eq!(record.user_id, UserId(7));
        assert_eq!(record.username, "sue");
        assert_eq!(record.role, "student");
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_unique_per_login() {
        let store = InMemorySessionStore::new();
        let user = user();

        let first = store.insert(&user).await;
        let second = store.insert(&user).await;

        assert_ne!(first, second);
    }
}
