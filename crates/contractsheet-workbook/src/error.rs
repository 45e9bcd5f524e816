use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("workbook not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to open workbook: {0}")]
    Open(#[source] umya_spreadsheet::XlsxError),
    #[error("failed to save workbook: {0}")]
    Save(#[source] umya_spreadsheet::XlsxError),
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
}
