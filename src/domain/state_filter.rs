use serde::{Deserialize, Serialize};

/// 予約一覧の状態フィルタ
///
/// 時間軸（CURRENT / PAST / FUTURE）またはステータス（WAITING / REJECTED）で
/// 予約を分類する6種類の取得モード。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStateFilter {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingStateFilter {
    /// すべてのフィルタ（宣言順）
    pub const VARIANTS: [BookingStateFilter; 6] = [
        BookingStateFilter::All,
        BookingStateFilter::Current,
        BookingStateFilter::Past,
        BookingStateFilter::Future,
        BookingStateFilter::Waiting,
        BookingStateFilter::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStateFilter::All => "ALL",
            BookingStateFilter::Current => "CURRENT",
            BookingStateFilter::Past => "PAST",
            BookingStateFilter::Future => "FUTURE",
            BookingStateFilter::Waiting => "WAITING",
            BookingStateFilter::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 大文字小文字を区別する
impl std::str::FromStr for BookingStateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStateFilter::VARIANTS
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| format!("Unknown state: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_known_values() {
        assert_eq!("ALL".parse(), Ok(BookingStateFilter::All));
        assert_eq!("CURRENT".parse(), Ok(BookingStateFilter::Current));
        assert_eq!("PAST".parse(), Ok(BookingStateFilter::Past));
        assert_eq!("FUTURE".parse(), Ok(BookingStateFilter::Future));
        assert_eq!("WAITING".parse(), Ok(BookingStateFilter::Waiting));
        assert_eq!("REJECTED".parse(), Ok(BookingStateFilter::Rejected));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("all".parse::<BookingStateFilter>().is_err());
        assert!("Future".parse::<BookingStateFilter>().is_err());
    }

    #[test]
    fn test_parse_unknown_value() {
        let result = "123".parse::<BookingStateFilter>();
        assert_eq!(result, Err("Unknown state: 123".to_string()));
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(BookingStateFilter::default(), BookingStateFilter::All);
    }
}
