//! Render - immediate-mode charts
//!
//! 描画はすべて `Canvas2d` への全面再描画です。差分もシーングラフも持ちません。
//!
//! # 主要コンポーネント
//! - **VisualizationRegistry / Renderer**: kind 文字列 → chart のディスパッチ
//! - **charts**: サイト固定データの各チャート
//! - **HeroAnimation / ServiceComparison**: 再描画のトリガー

pub mod animation;
pub mod charts;
pub mod palette;
pub mod registry;

pub use self::animation::{HeroAnimation, Rect, ServiceComparison, is_in_viewport};
pub use self::charts::{Service, builtin_registry};
pub use self::palette::{Palette, with_alpha};
pub use self::registry::{Frame, RenderError, Renderer, Visualization, VisualizationRegistry};
