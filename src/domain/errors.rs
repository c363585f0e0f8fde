/// 予約期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingPeriodError {
    /// 開始日時が過去
    StartInPast,
    /// 終了日時が未来ではない
    EndNotInFuture,
    /// 開始日時が終了日時より前ではない
    StartNotBeforeEnd,
}

impl std::fmt::Display for BookingPeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            BookingPeriodError::StartInPast => "start must not be in the past",
            BookingPeriodError::EndNotInFuture => "end must be in the future",
            BookingPeriodError::StartNotBeforeEnd => "start must be before end",
        };
        f.write_str(message)
    }
}

/// 承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideBookingError {
    /// 操作者がアイテムの所有者ではない
    NotItemOwner,
    /// 既に承認または却下済み
    AlreadyDecided,
    /// 承認・却下の指定がない
    MissingDecision,
}
