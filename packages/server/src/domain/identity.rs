//! Identity lookup (authentication collaborator) and the deployment's auth policy.

use async_trait::async_trait;

use super::{Nickname, SessionContext};

/// Looks up the authenticated nickname behind a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `None` when the session carries no authenticated user
    async fn current_identity(&self, session: &SessionContext) -> Option<Nickname>;
}

/// Whether presence and messages require an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Unauthenticated connections are rejected
    Required,
    /// Unauthenticated connections use their claimed nickname, or `anonymous_name`
    Optional { anonymous_name: Nickname },
}
