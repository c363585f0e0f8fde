use chrono::{DateTime, Utc};

/// 時刻ソースポート
///
/// 現在/過去/未来の分類と申込時の期間検証の基準時刻を供給する。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
