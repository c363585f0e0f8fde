use crate::ports::Clock;
use chrono::{DateTime, Utc};

/// システム時刻を返すClock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
