//! TimesJobs スクレイパーモジュール
//!
//! 求人一覧ページをヘッドレスブラウザで開き、求人カードを `JobRecord` に変換する

mod extract;
mod scraper;
mod types;

pub use extract::{normalize_text, FieldExtractor, JobExtractor};
pub use scraper::TimesJobsScraper;
pub use types::{JobField, JobRecord, JobStats, NOT_AVAILABLE};
