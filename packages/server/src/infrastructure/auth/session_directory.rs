//! In-memory session directory: session token -> nickname.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{IdentityProvider, Nickname, SessionContext};

/// Session tokens issued by the login service, mapped to the user's nickname
#[derive(Default)]
pub struct InMemorySessionDirectory {
    sessions: RwLock<HashMap<String, Nickname>>,
}

impl InMemorySessionDirectory {
    /// Create a directory seeded with `(token, nickname)` entries
    pub fn new(entries: impl IntoIterator<Item = (String, Nickname)>) -> Self {
        Self {
            sessions: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Record a login
    pub async fn insert(&self, token: String, nickname: Nickname) {
        self.sessions.write().await.insert(token, nickname);
    }

    /// Record a logout; returns whether the token was known
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

#[async_trait]
impl IdentityProvider for InMemorySessionDirectory {
    async fn current_identity(&self, session: &SessionContext) -> Option<Nickname> {
        let token = session.token()?;
        self.sessions.read().await.get(token).cloned()
    }
}
