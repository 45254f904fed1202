//! HTTP サーバー
//!
//! `GET /scrape-jobs` でスクレイピング → Excel出力を実行する

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::ScraperError;

pub use error::{ApiError, ErrorBody};
pub use handlers::ScrapeResponse;
pub use router::build_routes;
pub use state::AppState;

/// Ctrl-C を受けるまでサーバーを実行
pub async fn listen(config: AppConfig) -> Result<(), ScraperError> {
    let state = AppState::from_config(&config);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    let address = listener.local_addr()?;

    info!("Server running on http://{}", address);
    info!("Access the scraper endpoint at: http://{}/scrape-jobs", address);
    info!("Writing Excel files to {:?}", state.service.output_dir());
    info!("Press CTRL+C to stop");

    axum::serve(listener, build_routes(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for ctrl+c: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Server shutting down...");
        })
        .await?;

    Ok(())
}
