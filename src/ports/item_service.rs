use crate::domain::value_objects::{ItemId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテム概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub item_id: ItemId,
    pub name: String,
    pub description: String,
    /// 貸出可能フラグ
    pub available: bool,
    /// 所有者
    pub owner_id: UserId,
}

/// アイテムサービスポート
///
/// 予約コンテキストとアイテムカタログコンテキストの境界を維持する。
/// 複数リクエストから同時に読み取られるため、実装は並行読み取りに安全であること。
#[async_trait]
pub trait ItemService: Send + Sync {
    /// IDでアイテムを取得する
    ///
    /// 存在しない場合は `None` を返す。
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<ItemSummary>>;
}
