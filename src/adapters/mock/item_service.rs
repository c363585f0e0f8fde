use crate::domain::value_objects::{ItemId, UserId};
use crate::ports::item_service::{ItemService as ItemServiceTrait, ItemSummary, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// ItemServiceのモック実装
///
/// アイテムを登録することで状態を持ったテストをサポート。
/// 貸出可否の切り替えも可能。
pub struct ItemService {
    items: RwLock<HashMap<ItemId, ItemSummary>>,
}

impl ItemService {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, item: ItemSummary) {
        self.items.write().unwrap().insert(item.item_id, item);
    }

    /// 所有者と貸出可否を指定してアイテムを登録し、IDを返す
    pub fn add_owned_item(&self, owner_id: UserId, available: bool) -> ItemId {
        let item_id = ItemId::new();
        self.add_item(ItemSummary {
            item_id,
            name: "Mock Item".to_string(),
            description: "Mock item description".to_string(),
            available,
            owner_id,
        });
        item_id
    }

    /// 貸出可否を変更
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.write().unwrap().get_mut(&item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<ItemSummary>> {
        Ok(self.items.read().unwrap().get(&item_id).cloned())
    }
}
