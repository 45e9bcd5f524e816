use std::path::PathBuf;
use std::sync::Arc;

use contractsheet_workbook::{SheetMetadata, TemplateWorkbook, WorkbookError};
use serde::Serialize;

use crate::error::ContractError;
use crate::goods::{GOODS_FIRST_ROW, GOODS_LAST_ROW, MAX_GOODS_LINES};
use crate::mapping::{CONTRACT_FIELDS, FieldBinding, GOODS_COLUMNS, GoodsColumn};

/// Where the contract template comes from.
///
/// Both variants are read-only: every request opens its own workbook.
#[derive(Clone, Debug)]
pub enum TemplateSource {
    /// Read from disk on every open.
    Path(PathBuf),
    /// Preloaded once and shared.
    Bytes(Arc<[u8]>),
}

impl TemplateSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        TemplateSource::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        TemplateSource::Bytes(bytes.into())
    }

    /// Read a file once and keep its bytes.
    pub fn preload(path: impl Into<PathBuf>) -> Result<Self, ContractError> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|e| ContractError::TemplateNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(TemplateSource::Bytes(bytes.into()))
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Path(p) => p.display().to_string(),
            TemplateSource::Bytes(b) => format!("<in-memory template, {} bytes>", b.len()),
        }
    }

    /// A fresh workbook. Missing or unreadable templates are `TemplateNotFound`.
    pub fn open(&self) -> Result<TemplateWorkbook, ContractError> {
        let opened = match self {
            TemplateSource::Path(p) => TemplateWorkbook::open_path(p),
            TemplateSource::Bytes(b) => TemplateWorkbook::open_bytes(&b[..]),
        };
        opened.map_err(|e| {
            let reason = match &e {
                WorkbookError::NotFound(_) => "file does not exist".to_string(),
                other => other.to_string(),
            };
            ContractError::TemplateNotFound {
                path: self.describe(),
                reason,
            }
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GoodsBand {
    pub first_row: u32,
    pub last_row: u32,
    pub max_lines: usize,
    pub columns: &'static [GoodsColumn],
}

/// Template introspection payload.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateInfo {
    pub template: String,
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetMetadata>,
    pub fields: &'static [FieldBinding],
    pub goods: GoodsBand,
}

pub fn template_info(source: &TemplateSource) -> Result<TemplateInfo, ContractError> {
    let workbook = source.open()?;
    let metadata = workbook.metadata();
    Ok(TemplateInfo {
        template: source.describe(),
        sheet_names: workbook.sheet_names(),
        sheets: metadata.sheets,
        fields: CONTRACT_FIELDS,
        goods: GoodsBand {
            first_row: GOODS_FIRST_ROW,
            last_row: GOODS_LAST_ROW,
            max_lines: MAX_GOODS_LINES,
            columns: GOODS_COLUMNS,
        },
    })
}
