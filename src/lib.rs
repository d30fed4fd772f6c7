//! sca-site
//!
//! Symbiotic Cognitive Architecture プロジェクトのランディングページ生成エンジン。
//! ロケール切替（en / ja）とリポジトリステータスパネルを提供する。

pub mod config;
pub mod html;
pub mod locale;
pub mod page;
pub mod site;
pub mod status;

mod test_utils;

// Site を再エクスポート
pub use site::{
    RenderedSite,
    Site,
};
