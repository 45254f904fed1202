//! TimesJobs 求人一覧スクレイパー実装
//!
//! 1リクエストにつき1ブラウザを起動し、終了時に必ず破棄する。

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::Scraper;

use super::extract::JobExtractor;
use super::types::JobRecord;

/// ネットワークアイドル判定のインターバル（ミリ秒）
const NETWORK_IDLE_CHECK_INTERVAL_MS: u64 = 500;
/// 連続でアイドルと判定されるべき回数
const REQUIRED_IDLE_CHECKS: u32 = 3;
/// セレクタ待機のポーリング間隔（ミリ秒）
const SELECTOR_POLL_INTERVAL_MS: u64 = 250;

pub struct TimesJobsScraper {
    config: ScraperConfig,
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    user_data_dir: Option<PathBuf>,
}

impl TimesJobsScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
            handler_task: None,
            user_data_dir: None,
        }
    }

    /// ブラウザプロセスを保持しているか
    pub fn is_open(&self) -> bool {
        self.browser.is_some()
    }

    fn get_page(&self) -> Result<&Page, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("Browser not initialized".into()))
    }

    fn browser_config(&self, user_data_dir: &Path) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(user_data_dir)
            .window_size(self.config.viewport_width, self.config.viewport_height)
            .viewport(Viewport {
                width: self.config.viewport_width,
                height: self.config.viewport_height,
                ..Default::default()
            })
            .launch_timeout(self.config.launch_timeout)
            .request_timeout(self.config.navigation_timeout)
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage");

        if let Some(path) = &self.config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("Invalid browser config: {}", e)))
    }

    /// 求人要素が現れるまでポーリング
    async fn wait_for_selector(&self, page: &Page) -> Result<(), ScraperError> {
        let selector = &self.config.job_selector;
        let timeout = self.config.selector_timeout;
        let start = Instant::now();

        loop {
            // 1回の CDP 呼び出しが停止しても待機時間の上限を超えないようにする
            let remaining = timeout.saturating_sub(start.elapsed());
            let found = tokio::time::timeout(remaining, page.find_element(selector.as_str()))
                .await
                .map(|r| r.is_ok())
                .unwrap_or(false);
            if found {
                debug!("Selector {} found after {:?}", selector, start.elapsed());
                return Ok(());
            }

            if start.elapsed() >= timeout {
                if self.config.debug {
                    log_screenshot(page).await;
                }
                return Err(ScraperError::Timeout(format!(
                    "selector {} did not appear within {}s",
                    selector,
                    timeout.as_secs()
                )));
            }

            sleep(Duration::from_millis(SELECTOR_POLL_INTERVAL_MS)).await;
        }
    }
}

#[async_trait]
impl Scraper for TimesJobsScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Launching browser...");

        // 同時リクエストでプロファイルを共有しないよう、起動ごとに専用ディレクトリを使う
        let user_data_dir = unique_user_data_dir();
        let browser_config = self.browser_config(&user_data_dir)?;
        self.user_data_dir = Some(user_data_dir);

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        self.handler_task = Some(tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        }));
        self.browser = Some(browser);

        let page = self
            .browser
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("Browser not initialized".into()))?
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        page.set_user_agent(SetUserAgentOverrideParams::new(self.config.user_agent.clone()))
            .await
            .map_err(|e| ScraperError::BrowserInit(format!("Failed to set user agent: {}", e)))?;

        self.page = Some(page);

        info!("Browser initialized successfully");
        Ok(())
    }

    async fn navigate(&mut self) -> Result<(), ScraperError> {
        let page = self.get_page()?.clone();
        let timeout = self.config.navigation_timeout;

        info!("Navigating to jobs page...");
        let navigation = async {
            page.goto(self.config.target_url.as_str())
                .await
                .map_err(|e| ScraperError::Navigation(e.to_string()))?;
            wait_request_idle(&page).await;
            Ok::<(), ScraperError>(())
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| {
                ScraperError::Timeout(format!(
                    "navigation did not settle within {}s",
                    timeout.as_secs()
                ))
            })??;

        info!("Waiting for job listings...");
        self.wait_for_selector(&page).await?;

        let delay = random_delay(self.config.min_delay, self.config.max_delay);
        debug!("Sleeping {:?} before extraction", delay);
        sleep(delay).await;

        Ok(())
    }

    async fn extract(&mut self) -> Result<Vec<JobRecord>, ScraperError> {
        let page = self.get_page()?;

        info!("Extracting job data...");
        let html = page
            .content()
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        let extractor = JobExtractor::new(&self.config.job_selector)?;
        let jobs = extractor.extract(&html);

        info!("Extracted {} job cards", jobs.len());
        Ok(jobs)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.page = None;

        let mut result = Ok(());

        if let Some(mut browser) = self.browser.take() {
            info!("Closing browser...");
            if let Err(e) = browser.close().await {
                debug!("Browser close command failed: {}", e);
            }
            // 子プロセスの終了を待つ（ゾンビ化防止）
            if let Err(e) = browser.wait().await {
                warn!("Failed to wait for browser process: {}", e);
                result = Err(ScraperError::FileIO(e));
            }
        }

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        if let Some(dir) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                debug!("Failed to remove user data dir {:?}: {}", dir, e);
            }
        }

        result
    }
}

/// ネットワークリクエストがアイドル状態になるまで待機
async fn wait_request_idle(page: &Page) {
    let start = Instant::now();
    let mut idle_count = 0;

    loop {
        let result = page
            .evaluate(
                r#"
                (() => {
                    const entries = performance.getEntriesByType('resource');
                    const now = performance.now();
                    const recent = entries.filter(e => (now - e.startTime) < 500 && e.duration === 0);
                    return recent.length === 0;
                })()
                "#,
            )
            .await;

        match result {
            Ok(val) => {
                if val.into_value::<bool>().unwrap_or(false) {
                    idle_count += 1;
                    if idle_count >= REQUIRED_IDLE_CHECKS {
                        debug!("Network idle after {:?}", start.elapsed());
                        return;
                    }
                } else {
                    idle_count = 0;
                }
            }
            Err(e) => {
                debug!("Network idle check error: {}", e);
                idle_count = 0;
            }
        }

        sleep(Duration::from_millis(NETWORK_IDLE_CHECK_INTERVAL_MS)).await;
    }
}

async fn log_screenshot(page: &Page) {
    match page
        .screenshot(ScreenshotParams::builder().full_page(true).build())
        .await
    {
        Ok(screenshot) => {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
            debug!("Timeout screenshot: data:image/png;base64,{}", encoded);
        }
        Err(e) => debug!("Failed to capture screenshot: {}", e),
    }
}

/// [min, max] の一様乱数で待機時間を決める
fn random_delay(min: Duration, max: Duration) -> Duration {
    let min_ms = min.as_millis() as u64;
    let max_ms = max.as_millis() as u64;
    if min_ms >= max_ms {
        return min;
    }
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

fn unique_user_data_dir() -> PathBuf {
    let unique_id = format!(
        "{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    std::env::temp_dir().join(format!("job-scraper-{}", unique_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_new() {
        let scraper = TimesJobsScraper::new(ScraperConfig::default());
        assert!(!scraper.is_open());
        assert!(scraper.page.is_none());
        assert!(scraper.handler_task.is_none());
    }

    #[test]
    fn test_random_delay_within_bounds() {
        let min = Duration::from_secs(2);
        let max = Duration::from_secs(5);
        for _ in 0..100 {
            let delay = random_delay(min, max);
            assert!(delay >= min && delay <= max, "{:?}", delay);
        }
    }

    #[test]
    fn test_random_delay_degenerate_range() {
        let d = Duration::from_millis(10);
        assert_eq!(random_delay(d, d), d);
        assert_eq!(random_delay(Duration::ZERO, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_unique_user_data_dirs_differ() {
        let a = unique_user_data_dir();
        std::thread::sleep(Duration::from_millis(1));
        let b = unique_user_data_dir();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_close_without_initialize() {
        let mut scraper = TimesJobsScraper::new(ScraperConfig::default());
        scraper.close().await.unwrap();
        assert!(!scraper.is_open());
    }

    fn missing_chrome_config() -> ScraperConfig {
        ScraperConfig::default().with_chrome_path("/nonexistent/chrome-for-tests")
    }

    #[tokio::test]
    async fn test_close_after_failed_launch_releases_everything() {
        let mut scraper = TimesJobsScraper::new(missing_chrome_config());

        let err = scraper.initialize().await.unwrap_err();
        assert!(matches!(err, ScraperError::BrowserInit(_)), "{:?}", err);

        // プロファイルディレクトリは起動前に割り当て済み
        let dir = scraper.user_data_dir.clone().unwrap();
        std::fs::create_dir_all(&dir).unwrap();

        scraper.close().await.unwrap();

        assert!(!scraper.is_open());
        assert!(scraper.page.is_none());
        assert!(scraper.handler_task.is_none());
        assert!(scraper.user_data_dir.is_none());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_execute_with_failed_launch_closes() {
        let mut scraper = TimesJobsScraper::new(missing_chrome_config());

        let err = scraper.execute().await.unwrap_err();

        assert!(matches!(err, ScraperError::BrowserInit(_)), "{:?}", err);
        assert!(!scraper.is_open());
        assert!(scraper.user_data_dir.is_none());
    }

    #[tokio::test]
    async fn test_navigate_before_initialize_fails() {
        let mut scraper = TimesJobsScraper::new(ScraperConfig::default());
        let err = scraper.navigate().await.unwrap_err();
        assert!(matches!(err, ScraperError::BrowserInit(_)));
    }

    #[tokio::test]
    #[ignore] // 実環境テスト用: cargo test test_scrape_live -- --ignored --nocapture
    async fn test_scrape_live() {
        tracing_subscriber::fmt()
            .with_env_filter("info,job_scraper_service=debug")
            .init();

        let config = ScraperConfig::from_env().with_debug(true);
        let mut scraper = TimesJobsScraper::new(config);

        let result = scraper.execute().await;
        assert!(!scraper.is_open());

        match result {
            Ok(jobs) => {
                println!("Jobs: {}", jobs.len());
                for job in jobs.iter().take(3) {
                    println!("  - {} @ {} ({})", job.title, job.company, job.location);
                }
            }
            Err(e) => panic!("Scrape failed: {:?}", e),
        }
    }
}
