//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStore**: session スコープ・テスト用の key-value ストア
//! - **FileStore**: durable スコープ（JSON ファイル 1 個）
//! - **TracingEventSink / RecordingEventSink / FanoutEventSink**: イベント送信先
//! - **DisplayList**: 描画呼び出しを記録して SVG に書き出す Canvas2d

pub mod display_list;
pub mod event_sinks;
pub mod file_kv;
pub mod inmem_kv;

pub use self::display_list::{DisplayList, DrawCommand, PathSeg};
pub use self::event_sinks::{FanoutEventSink, RecordingEventSink, TracingEventSink};
pub use self::file_kv::FileStore;
pub use self::inmem_kv::InMemoryStore;
