//! Errors - エラー型と分類
//!
//! どの失敗もページにとって致命的ではなく、機能が無効になるだけです。

use thiserror::Error;

use crate::ports::KvError;

/// ErrorKind は失敗の運用分類
///
/// - StorageUnavailable: ホストが永続ストレージを無効化している（起動時に一度だけ判定）
/// - Quota: 容量超過・シリアライズ失敗（操作ごと）
/// - Corruption: 壊れた JSON（掃除・eviction で削除される）
/// - Validation: ファイル検証の失敗（ファイルごと）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StorageUnavailable,
    Quota,
    Corruption,
    Validation,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {0}")]
    Quota(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("corrupted record under key={0}")]
    Corrupted(String),

    #[error("import failed: {0}")]
    Import(String),

    #[error(transparent)]
    Kv(KvError),
}

impl From<KvError> for StorageError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::QuotaExceeded { .. } => StorageError::Quota(err.to_string()),
            KvError::Unavailable(reason) => StorageError::Unavailable(reason),
            other => StorageError::Kv(other),
        }
    }
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Unavailable(_) | StorageError::Kv(_) => ErrorKind::StorageUnavailable,
            StorageError::Quota(_) | StorageError::Serialize(_) => ErrorKind::Quota,
            StorageError::Corrupted(_) | StorageError::Import(_) => ErrorKind::Corruption,
        }
    }
}
