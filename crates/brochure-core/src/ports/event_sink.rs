//! EventSink port - ドメインイベントの送信先
//!
//! # 実装
//! - TracingEventSink: `tracing` にログとして流す
//! - RecordingEventSink: 受け取ったイベントを保持する（テスト・デモ用）

use crate::domain::DomainEvent;

/// EventSink はドメインイベントを受け取る
///
/// 送信は失敗しない（イベントは装飾的な通知にすぎない）。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}
