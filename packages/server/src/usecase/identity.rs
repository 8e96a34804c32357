//! UseCase: 接続の表示名（Identity）の解決
//!
//! 認証済みの Identity を優先する。認証必須の構成では未認証を拒否し、
//! 匿名参加を許可する構成ではクライアントが名乗った名前、なければ匿名名を使う。

use std::sync::Arc;

use crate::domain::{AuthPolicy, IdentityProvider, Nickname, SessionContext};

use super::error::IdentityError;

/// Text of the `auth_required` event
pub const AUTH_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";

/// Identity 解決のユースケース
pub struct IdentityResolver {
    /// IdentityProvider（認証コラボレーターの抽象化）
    provider: Arc<dyn IdentityProvider>,
    policy: AuthPolicy,
}

impl IdentityResolver {
    /// 新しい IdentityResolver を作成
    pub fn new(provider: Arc<dyn IdentityProvider>, policy: AuthPolicy) -> Self {
        Self { provider, policy }
    }

    /// Identity を解決
    ///
    /// # Arguments
    ///
    /// * `session` - 接続時に提示されたセッション
    /// * `claimed` - クライアントが名乗った名前（匿名参加時のみ使用）
    ///
    /// # Returns
    ///
    /// * `Ok(Nickname)` - 解決された Identity
    /// * `Err(IdentityError::Unauthorized)` - 認証必須で未認証
    pub async fn resolve(
        &self,
        session: &SessionContext,
        claimed: Option<&str>,
    ) -> Result<Nickname, IdentityError> {
        if let Some(identity) = self.provider.current_identity(session).await {
            return Ok(identity);
        }

        match &self.policy {
            AuthPolicy::Required => Err(IdentityError::Unauthorized),
            AuthPolicy::Optional { anonymous_name } => Ok(claimed
                .and_then(|name| Nickname::new(name.to_string()).ok())
                .unwrap_or_else(|| anonymous_name.clone())),
        }
    }
}
