use std::any::Any;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::{error, info};

/// 全リクエストの時刻・メソッド・URLを記録
pub async fn log_request(request: Request, next: Next) -> Response {
    info!(
        "{} - {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        request.method(),
        request.uri()
    );
    next.run(request).await
}

/// ハンドラ内の panic を 500 JSON に変換
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    error!("Unhandled error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "message": "Internal server error",
            "error": detail,
        })),
    )
        .into_response()
}
