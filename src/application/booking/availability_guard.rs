use crate::domain::value_objects::{ItemId, UserId};
use crate::ports::{ItemService, ItemSummary};

use super::errors::{BookingApplicationError, Result};

/// 予約申込の可否判定（読み取りのみ）
///
/// ビジネスルール（判定順）：
/// - アイテムが存在すること
/// - アイテムが貸出可能であること
/// - 申込者がアイテムの所有者ではないこと
///
/// 自分のアイテムへの申込は権限エラーではなく `NotFound` として扱う。
///
/// # 戻り値
/// 判定を通過したアイテム
pub async fn authorize(
    item_service: &dyn ItemService,
    requester_id: UserId,
    item_id: ItemId,
) -> Result<ItemSummary> {
    let item = item_service
        .find_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemServiceError)?
        .ok_or_else(|| BookingApplicationError::NotFound(format!("item {}", item_id)))?;

    if !item.available {
        return Err(BookingApplicationError::UnavailableItem(
            "item not available".to_string(),
        ));
    }

    if item.owner_id == requester_id {
        return Err(BookingApplicationError::NotFound(
            "owner cannot book own item".to_string(),
        ));
    }

    Ok(item)
}
