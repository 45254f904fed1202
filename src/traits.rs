use async_trait::async_trait;
use tracing::warn;

use crate::error::ScraperError;
use crate::timesjobs::JobRecord;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// ブラウザ初期化（起動・ページ作成・UA/ビューポート設定）
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// 対象ページへ遷移し、求人要素の出現まで待機
    async fn navigate(&mut self) -> Result<(), ScraperError>;

    /// 求人レコードを抽出
    async fn extract(&mut self) -> Result<Vec<JobRecord>, ScraperError>;

    /// リソース解放（何度呼んでもよい）
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// 一括実行（initialize → navigate → extract → close）
    ///
    /// 途中で失敗しても必ず close を呼ぶ。close のエラーはログのみで、
    /// 処理結果を上書きしない。
    async fn execute(&mut self) -> Result<Vec<JobRecord>, ScraperError> {
        let result = async {
            self.initialize().await?;
            self.navigate().await?;
            self.extract().await
        }
        .await;

        if let Err(e) = self.close().await {
            warn!("Failed to close browser: {}", e);
        }

        result
    }
}
