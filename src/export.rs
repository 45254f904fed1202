//! 求人データの Excel 出力

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};
use tracing::info;

use crate::error::ScraperError;
use crate::timesjobs::JobRecord;

pub const SHEET_NAME: &str = "Tech Jobs";

/// ヘッダー行の背景色（ライトグレー）
const HEADER_FILL: u32 = 0xD3D3D3;

/// 列定義
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

/// 列順は固定
pub const COLUMNS: [Column; 6] = [
    Column { header: "Job Title", width: 30.0 },
    Column { header: "Company", width: 25.0 },
    Column { header: "Location", width: 20.0 },
    Column { header: "Job Type", width: 15.0 },
    Column { header: "Posted Date", width: 15.0 },
    Column { header: "Description", width: 50.0 },
];

/// 日付ごとの出力ファイル名（同日の再実行は上書き）
pub fn file_name_for(date: NaiveDate) -> String {
    format!("jobs_{}.xlsx", date.format("%Y-%m-%d"))
}

/// ワークブックを作成して `dir` に保存し、保存先パスを返す
pub fn export_jobs(
    jobs: &[JobRecord],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ScraperError> {
    info!("Creating Excel workbook...");

    let mut workbook = build_workbook(jobs)?;

    let path = dir.join(file_name_for(date));
    workbook.save(&path)?;

    info!("Excel file saved to: {:?} ({} rows)", path, jobs.len());
    Ok(path)
}

fn build_workbook(jobs: &[JobRecord]) -> Result<Workbook, ScraperError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(HEADER_FILL));

    worksheet.set_row_format(0, &header_format)?;
    for (col, column) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.width)?;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
    }

    for (index, job) in jobs.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in job.values().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    // ヘッダー + データ行全体にオートフィルタ
    let last_row = jobs.len() as u32;
    let last_col = COLUMNS.len() as u16 - 1;
    worksheet.autofilter(0, 0, last_row, last_col)?;

    Ok(workbook)
}
