//! 求人スクレイパーサービス
//!
//! - ヘッドレスChromeで求人一覧ページを取得し、求人カードを抽出
//! - 抽出結果を日付付きのExcelファイルに出力
//! - `GET /scrape-jobs` で上記を1回実行するHTTPサーバー
//!
//! # 使用例
//!
//! ```rust,ignore
//! use job_scraper_service::{ScrapeRequest, ScraperConfig, ScraperService};
//! use tower::ServiceExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = ScraperService::chrome(ScraperConfig::default(), ".");
//!
//!     let result = service.oneshot(ScrapeRequest::today()).await.unwrap();
//!     println!("{} jobs -> {:?}", result.jobs.len(), result.file_path);
//! }
//! ```
//!
//! # サーバー起動例
//!
//! ```rust,ignore
//! use job_scraper_service::{server, AppConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     server::listen(AppConfig::from_env()).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod server;
pub mod service;
pub mod timesjobs;
pub mod traits;

#[cfg(test)]
mod testing;

// 主要な型をリエクスポート
pub use config::{AppConfig, Environment, ScraperConfig};
pub use error::ScraperError;
pub use export::export_jobs;
pub use service::{ScrapeRequest, ScrapeResult, ScraperFactory, ScraperService};
pub use timesjobs::{JobRecord, JobStats, TimesJobsScraper};
pub use traits::Scraper;
