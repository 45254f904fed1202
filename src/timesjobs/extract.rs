//! 求人カードからのフィールド抽出
//!
//! フィールドごとに独立した抽出器を持ち、要素が無い・空の場合はそのフィールドだけ
//! `N/A` になる。

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

use super::types::{JobField, JobRecord, NOT_AVAILABLE};

/// 1フィールド分の抽出器
#[derive(Debug)]
pub struct FieldExtractor {
    field: JobField,
    selector: Selector,
}

impl FieldExtractor {
    pub fn new(field: JobField) -> Result<Self, ScraperError> {
        Ok(Self {
            field,
            selector: parse_selector(field.selector())?,
        })
    }

    pub fn field(&self) -> JobField {
        self.field
    }

    /// カード内の最初の一致要素のテキスト（なければ N/A）
    pub fn extract(&self, card: ElementRef<'_>) -> String {
        card.select(&self.selector)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// ページ全体から求人レコードを抽出する
#[derive(Debug)]
pub struct JobExtractor {
    card: Selector,
    fields: Vec<FieldExtractor>,
}

impl JobExtractor {
    pub fn new(card_selector: &str) -> Result<Self, ScraperError> {
        let fields = JobField::ALL
            .into_iter()
            .map(FieldExtractor::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            card: parse_selector(card_selector)?,
            fields,
        })
    }

    /// 文書順にカードを走査してレコードを返す
    pub fn extract(&self, html: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(html);

        document
            .select(&self.card)
            .map(|card| {
                let mut record = JobRecord::default();
                for extractor in &self.fields {
                    *record.field_mut(extractor.field()) = extractor.extract(card);
                }
                record
            })
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector(format!("{}: {:?}", selector, e)))
}

/// テキストノードを空白で区切って連結する
///
/// `<br>` やブロック要素の境界で単語がつながらないようにする。
fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// 前後の空白を除去し、連続する空白を1つにまとめる
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
