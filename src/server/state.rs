use crate::config::{AppConfig, Environment};
use crate::service::ScraperService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub service: ScraperService,
    pub environment: Environment,
    /// 固定の外部リンク（未設定なら出力ファイルのパスを返す）
    pub excel_link: Option<String>,
}

impl AppState {
    pub fn new(service: ScraperService, config: &AppConfig) -> Self {
        Self {
            service,
            environment: config.environment,
            excel_link: config.excel_link.clone(),
        }
    }

    /// 実ブラウザを使う本番用の状態
    pub fn from_config(config: &AppConfig) -> Self {
        let service = ScraperService::chrome(config.scraper.clone(), config.output_dir.clone());
        Self::new(service, config)
    }
}
