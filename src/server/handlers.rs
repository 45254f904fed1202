use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tower::ServiceExt;
use tracing::info;

use crate::service::{ScrapeRequest, ScrapeResult};
use crate::timesjobs::{JobRecord, JobStats};

use super::error::ApiError;
use super::state::AppState;

/// レスポンスに含めるサンプル件数
pub const SAMPLE_SIZE: usize = 3;

/// 成功時のレスポンスボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    pub stats: JobStats,
    pub excel_link: String,
    /// 今回書き出したファイル
    pub file: String,
    pub data_sample: Vec<JobRecord>,
}

impl ScrapeResponse {
    pub fn new(result: &ScrapeResult, excel_link: Option<&str>) -> Self {
        let file = result.file_path.display().to_string();
        Self {
            success: true,
            message: "Scraping completed successfully".to_string(),
            stats: result.stats(),
            excel_link: excel_link.map(str::to_string).unwrap_or_else(|| file.clone()),
            file,
            data_sample: result.sample(SAMPLE_SIZE).to_vec(),
        }
    }
}

/// GET /scrape-jobs
pub async fn scrape_jobs(
    State(state): State<AppState>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let result = state
        .service
        .clone()
        .oneshot(ScrapeRequest::today())
        .await
        .map_err(|e| ApiError::new(e, state.environment))?;

    info!(
        "Responding with {} jobs from {}",
        result.jobs.len(),
        result.file_path.display()
    );

    Ok(Json(ScrapeResponse::new(
        &result,
        state.excel_link.as_deref(),
    )))
}

pub async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "success": false, "error": "Not found" })),
    )
}
