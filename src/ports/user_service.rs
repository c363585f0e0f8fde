use crate::domain::value_objects::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザー概要
///
/// 予約ビューの組み立てに必要な範囲のみを保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// ユーザーサービスポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
/// 予約コンテキストはユーザーを読み取るだけで、変更しない。
#[async_trait]
pub trait UserService: Send + Sync {
    /// IDでユーザーを取得する
    ///
    /// 存在しない場合は `None` を返す。
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserSummary>>;
}
