//! Domain identifiers (strongly-typed IDs).
//!
//! ULID ベースの ID を Phantom type パターンで型付けしています。
//! `UploadId` と `SessionId` は実行時には同じ 16 bytes ですが、
//! コンパイル時には混同できません。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: upload の開始順に並ぶ
//! - **衝突しない**: 同じミリ秒内でもランダム部で区別される

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"upload-", "session-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }

    /// Timestamp part of the ULID (epoch milliseconds).
    pub fn timestamp_ms(&self) -> u64 {
        self.ulid.timestamp_ms()
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Upload のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Upload {}

impl IdMarker for Upload {
    fn prefix() -> &'static str {
        "upload-"
    }
}

/// Session のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Session {}

impl IdMarker for Session {
    fn prefix() -> &'static str {
        "session-"
    }
}

/// Identifier of one file moving through the upload widget.
pub type UploadId = Id<Upload>;

/// Identifier of one browsing session (written to the session-scoped store).
pub type SessionId = Id<Session>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let ulid1 = Ulid::new();
        let ulid2 = Ulid::new();

        let upload = UploadId::from_ulid(ulid1);
        let session = SessionId::from_ulid(ulid2);

        assert_eq!(upload.as_ulid(), ulid1);
        assert_eq!(session.as_ulid(), ulid2);

        assert!(upload.to_string().starts_with("upload-"));
        assert!(session.to_string().starts_with("session-"));
        // let _: UploadId = session; // <- does not compile
    }

    #[test]
    fn ulid_ids_are_sortable() {
        let id1 = UploadId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = UploadId::from_ulid(Ulid::new());

        assert!(id1 < id2);
        assert!(id1.timestamp_ms() <= id2.timestamp_ms());
    }

    #[test]
    fn ids_can_be_serialized() {
        let id = SessionId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: SessionId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<UploadId>(), size_of::<Ulid>());
        assert_eq!(size_of::<SessionId>(), 16);
    }
}
