use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{NaiveDate, Utc};
use tower::Service;
use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::export::export_jobs;
use crate::timesjobs::{JobRecord, JobStats, TimesJobsScraper};
use crate::traits::Scraper;

/// リクエストごとに新しいスクレイパーを生成する
pub type ScraperFactory = Arc<dyn Fn() -> Box<dyn Scraper> + Send + Sync>;

/// スクレイピングリクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeRequest {
    /// 出力ファイル名に使う日付
    pub date: NaiveDate,
}

impl ScrapeRequest {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// UTCの今日付
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// スクレイピング結果
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub jobs: Vec<JobRecord>,
    pub file_path: PathBuf,
}

impl ScrapeResult {
    pub fn stats(&self) -> JobStats {
        JobStats::from_jobs(&self.jobs)
    }

    /// 先頭から最大 `n` 件
    pub fn sample(&self, n: usize) -> &[JobRecord] {
        &self.jobs[..self.jobs.len().min(n)]
    }
}

/// tower::Serviceを実装したスクレイパーサービス
///
/// 抽出 → 空チェック → Excel出力 を1回ずつ実行する。リトライはしない。
#[derive(Clone)]
pub struct ScraperService {
    factory: ScraperFactory,
    output_dir: PathBuf,
}

impl std::fmt::Debug for ScraperService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScraperService")
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl ScraperService {
    pub fn new(factory: ScraperFactory, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            factory,
            output_dir: output_dir.into(),
        }
    }

    /// ヘッドレスChromeで TimesJobs を取得するサービス
    pub fn chrome(config: ScraperConfig, output_dir: impl Into<PathBuf>) -> Self {
        let factory: ScraperFactory = Arc::new(move || {
            Box::new(TimesJobsScraper::new(config.clone())) as Box<dyn Scraper>
        });
        Self::new(factory, output_dir)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("Starting job scraping process...");

        let mut scraper = (self.factory)();
        let output_dir = self.output_dir.clone();

        Box::pin(async move {
            // ブラウザは execute 内で必ず解放される
            let jobs = scraper.execute().await?;
            if jobs.is_empty() {
                return Err(ScraperError::NoJobs);
            }
            info!("Successfully scraped {} jobs", jobs.len());

            let file_path = export_jobs(&jobs, &output_dir, req.date)?;

            Ok(ScrapeResult { jobs, file_path })
        })
    }
}
