use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::config::Environment;
use crate::error::ScraperError;

/// 失敗時のレスポンスボディ
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    /// エラー詳細（エラーチェーンの Debug 表示、development のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// パイプラインのエラーを 500 JSON に変換する
#[derive(Debug)]
pub struct ApiError {
    error: ScraperError,
    environment: Environment,
}

impl ApiError {
    pub fn new(error: ScraperError, environment: Environment) -> Self {
        Self { error, environment }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.error.to_string(),
            details: self
                .environment
                .is_development()
                .then(|| format!("{:#?}", self.error)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // クライアントへの返却内容に関わらず、サーバー側には詳細を残す
        let stage = if self.error.is_scrape_failure() {
            "Scraping"
        } else {
            "Export"
        };
        error!("{} error: {:?}", stage, self.error);

        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body())).into_response()
    }
}
