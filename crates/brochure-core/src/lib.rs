//! brochure-core
//!
//! Interactive layer of a brochure site, without a browser: prefixed
//! key-value storage with expiry and eviction, canvas charts, drag-and-drop
//! uploads with simulated progress, form validation and page bootstrap.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, record, preferences, upload, events, errors）
//! - **ports**: 抽象化レイヤー（KeyValueStore, Canvas2d, Clock, IdGenerator, EventSink）
//! - **impls**: 実装（InMemoryStore, FileStore, DisplayList, イベントシンク）
//! - **storage**: StoredRecord エンベロープ・期限・eviction・export/import
//! - **upload**: ファイル検証・DropZone・アップロード管理・並べ替え
//! - **render**: チャート registry と再描画ドライバ
//! - **validate**: フォーム検証・書式・debounce/throttle
//! - **app**: `Site` の組み立てとページ機能
//! - **config**: JSON 設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod render;
pub mod storage;
pub mod upload;
pub mod validate;
