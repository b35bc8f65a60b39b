//! KeyValueStore port - ブラウザの localStorage / sessionStorage 相当
//!
//! 文字列キーに文字列値を保存するだけの小さなインターフェースです。
//! エンベロープ（StoredRecord）・期限・eviction は `storage` 層の責務で、
//! ここには含みません。
//!
//! # 実装
//! - **InMemoryStore**: session スコープとテスト用
//! - **FileStore**: JSON ファイルに永続化する durable スコープ

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("quota exceeded: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("{0}")]
    Unavailable(String),

    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not a JSON object of strings: {0}")]
    Corrupted(String),
}

/// KeyValueStore は同期的な key-value ストア
///
/// # 設計原則
/// - すべての操作は同期（呼び出し元のターンをブロックする）
/// - `&self` で呼べるように内部可変性を持つ
/// - `list_keys` は prefix でのフィルタをしない（呼び出し側が行う）
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    fn remove(&self, key: &str) -> Result<(), KvError>;

    fn list_keys(&self) -> Result<Vec<String>, KvError>;
}
