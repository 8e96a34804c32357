//! UseCase: プレゼンス取得処理

use std::sync::Arc;

use crate::domain::{PresenceRepository, PresenceSnapshot};

/// 全ルームの人数とメンバーを取得するユースケース
pub struct GetPresenceUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
}

impl GetPresenceUseCase {
    /// 新しい GetPresenceUseCase を作成
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 現在のスナップショットを取得（ルームは設定順）
    pub async fn execute(&self) -> PresenceSnapshot {
        self.repository.snapshot().await
    }
}
