use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Browser initialization failed: {0}")]
    BrowserInit(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("JavaScript evaluation failed: {0}")]
    JavaScript(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No jobs found or scraping failed")]
    NoJobs,

    #[error("Excel export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("File I/O error: {0}")]
    FileIO(#[from] std::io::Error),
}

impl ScraperError {
    /// スクレイピング段階のエラーか（エクスポート段階ならfalse）
    pub fn is_scrape_failure(&self) -> bool {
        !matches!(self, ScraperError::Export(_) | ScraperError::FileIO(_))
    }
}
