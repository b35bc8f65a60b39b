//! App - ページ文脈の組み立てと機能の結線
//!
//! ports / storage / upload / render を `Site` 1 つにまとめます。
//! グローバルなモジュールオブジェクトの代わりに、ここで作った `Site` を明示的に渡します。
//!
//! # 主要コンポーネント
//! - **SiteBuilder**: ports の差し替えと起動時検証
//! - **Site**: boot / 通知 / 描画の入口
//! - **preferences / analytics / collections / forms / uploads**: `impl Site` の機能別ファイル
//! - **page**: ナビゲーション・スクロール・カウンターなどのページ効果
//! - **SweepLoop**: 期限切れエントリの定期削除

pub mod analytics;
pub mod builder;
pub mod collections;
pub mod forms;
pub mod page;
pub mod preferences;
pub mod site;
pub mod sweep_loop;
pub mod uploads;

// 主要な型を再エクスポート
pub use self::analytics::{AnalyticsSummary, PageViews};
pub use self::builder::{BuildError, SiteBuilder};
pub use self::collections::{Bookmark, Favorite, FavoriteItem, SEARCH_HISTORY_LIMIT};
pub use self::forms::{FORM_DRAFT_TTL, FormData, form_snapshot};
pub use self::page::{
    Accordion, MobileMenu, RevealTarget, ScrollEffects, ScrollUpdate, active_nav_links, counter_value,
    current_page, filter_matches,
};
pub use self::site::{BootReport, Site};
pub use self::sweep_loop::SweepLoop;
