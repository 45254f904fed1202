use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://www.timesjobs.com/candidate/job-search.html?searchType=Home_Search&from=submit&asKey=OFF&txtKeywords=&cboPresFuncArea=35";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_JOB_SELECTOR: &str = ".job-bx";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// ブラウザ・抽出設定
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub target_url: String,
    /// 求人カード要素のセレクタ
    pub job_selector: String,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,
    /// デバッグモード（失敗時スクリーンショットをログ出力）
    pub debug: bool,
    /// Chrome実行ファイルのパス（未指定ならchromiumoxideの自動検出）
    pub chrome_path: Option<String>,
    pub launch_timeout: Duration,
    /// ナビゲーション + ネットワークアイドル待機のタイムアウト
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    /// 抽出前のランダム待機（下限）
    pub min_delay: Duration,
    /// 抽出前のランダム待機（上限）
    pub max_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            job_selector: DEFAULT_JOB_SELECTOR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            viewport_width: 1366,
            viewport_height: 768,
            headless: true,
            debug: false,
            chrome_path: None,
            launch_timeout: Duration::from_secs(30),
            navigation_timeout: Duration::from_secs(60),
            selector_timeout: Duration::from_secs(15),
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl ScraperConfig {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Default::default()
        }
    }

    /// 環境変数から設定を読み込む（未設定の項目はデフォルト値）
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SCRAPE_URL") {
            config.target_url = url;
        }
        config.chrome_path = std::env::var("CHROME_PATH")
            .or_else(|_| std::env::var("CHROMIUM_PATH"))
            .ok();
        if let Ok(value) = std::env::var("SCRAPER_HEADLESS") {
            config.headless = parse_flag(&value).unwrap_or(true);
        }
        if let Ok(value) = std::env::var("SCRAPER_DEBUG") {
            config.debug = parse_flag(&value).unwrap_or(false);
        }

        config
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_chrome_path(mut self, path: impl Into<String>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }

    /// ランダム待機の範囲を設定（min > max の場合は入れ替える）
    pub fn with_delay_range(mut self, min: Duration, max: Duration) -> Self {
        if min <= max {
            self.min_delay = min;
            self.max_delay = max;
        } else {
            self.min_delay = max;
            self.max_delay = min;
        }
        self
    }
}

/// 実行環境モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// サーバー・出力設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    /// Excelファイルの出力先ディレクトリ
    pub output_dir: PathBuf,
    /// レスポンスの excelLink に使う外部リンク（未指定なら出力ファイルのパス）
    pub excel_link: Option<String>,
    pub environment: Environment,
    pub scraper: ScraperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            output_dir: PathBuf::from("."),
            excel_link: None,
            environment: Environment::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            scraper: ScraperConfig::from_env(),
            ..Default::default()
        };

        if let Ok(address) = std::env::var("BIND_ADDRESS") {
            config.bind_address = address;
        }
        if let Ok(dir) = std::env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config.excel_link = std::env::var("EXCEL_LINK").ok().filter(|s| !s.is_empty());
        if let Ok(env) = std::env::var("APP_ENV") {
            config.environment = Environment::parse(&env);
        }

        config
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_excel_link(mut self, link: impl Into<String>) -> Self {
        self.excel_link = Some(link.into());
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
