//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻を timestamp 部に使う ULID 生成器

use std::sync::Arc;

use ulid::Ulid;

use crate::domain::ids::{SessionId, UploadId};
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn generate_upload_id(&self) -> UploadId;

    fn generate_session_id(&self) -> SessionId;
}

/// UlidGenerator は Clock を使って現在時刻ベースの ULID を生成します。
/// テスト時に FixedClock を渡すと timestamp 部が決定的になります。
pub struct UlidGenerator {
    clock: Arc<dyn Clock>,
}

impl UlidGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now_ms().max(0) as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl IdGenerator for UlidGenerator {
    fn generate_upload_id(&self) -> UploadId {
        UploadId::from(self.next())
    }

    fn generate_session_id(&self) -> SessionId {
        SessionId::from(self.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(Arc::new(SystemClock));

        let id1 = id_gen.generate_upload_id();
        let id2 = id_gen.generate_upload_id();

        assert_ne!(id1, id2);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp_part() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(Arc::new(FixedClock::new(fixed_time)));

        let id1 = id_gen.generate_session_id();
        let id2 = id_gen.generate_session_id();

        // ランダム部があるので ID は異なるが、timestamp 部は同じ
        assert_ne!(id1, id2);
        assert_eq!(id1.timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(id2.timestamp_ms(), id1.timestamp_ms());
    }

    #[test]
    fn display_prefixes_differ() {
        let id_gen = UlidGenerator::new(Arc::new(SystemClock));

        assert!(id_gen.generate_upload_id().to_string().starts_with("upload-"));
        assert!(id_gen.generate_session_id().to_string().starts_with("session-"));
    }
}
