//! Ports - 抽象化レイヤー
//!
//! ホストページ（ブラウザ）への依存はすべてここの trait 越しに扱います。
//! テストではインメモリ実装に、デモでは JSON ファイルや SVG に差し替えます。
//!
//! # 設計原則
//! - グローバルな状態を持たない（`app::Site` が一度だけ組み立てて渡す）
//! - ストレージは同期 API（ホストが同一タブ内のアクセスを直列化する）

pub mod canvas;
pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod kv_store;

pub use self::canvas::{Canvas2d, Color, Paint, TextAlign};
pub use self::clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::kv_store::{KeyValueStore, KvError};
