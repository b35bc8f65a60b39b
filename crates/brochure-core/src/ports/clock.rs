//! Clock port - 時刻の抽象化
//!
//! # 実装
//! - **SystemClock**: 本番用
//! - **FixedClock**: 決定的なテスト用
//! - **ManualClock**: 期限切れのテスト用（`advance` で進められる）

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Clock は現在時刻を提供
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Epoch milliseconds, the unit stored in every record.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

#[derive(Debug)]
pub struct ManualClock {
    at: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at: Mutex::new(at) }
    }

    pub fn advance(&self, by: Duration) {
        let ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        let mut at = self.at.lock();
        // past chrono's range the clock stays put
        if let Some(next) = chrono::Duration::try_milliseconds(ms).and_then(|d| at.checked_add_signed(d)) {
            *at = next;
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.at.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.at.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_does_not_move() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now_ms(), at.timestamp_millis());
    }

    #[test]
    fn manual_clock_advances() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(at);
        clock.advance(Duration::from_millis(1_500));
        assert_eq!(clock.now_ms(), at.timestamp_millis() + 1_500);
    }

    #[test]
    fn manual_clock_ignores_out_of_range_advance() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(at);
        clock.advance(Duration::from_millis(u64::MAX));
        assert_eq!(clock.now(), at);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_ms(), at.timestamp_millis() + 1_000);
    }
}
