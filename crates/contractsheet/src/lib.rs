//! Contract spreadsheet generation.
//!
//! A [`ContractAssembler`] opens a fresh copy of the SC/PI contract template
//! per request, writes the payload through the merge-aware
//! [`TemplateFiller`], sizes the goods band, and returns the saved bytes.

pub mod assembler;
pub mod config;
pub mod error;
pub mod filler;
pub mod goods;
pub mod mapping;
pub mod request;
pub mod template;
pub mod transform;

pub use assembler::{
    ContractAssembler, GeneratedContract, XLSX_CONTENT_TYPE, content_disposition, derive_filename,
};
pub use config::{EmptyValues, GeneratorConfig, PiFill};
pub use error::{CellWriteCause, CellWriteError, ContractError};
pub use filler::{CellMapping, FillOptions, FillReport, TemplateFiller};
pub use goods::{
    GOODS_FIRST_ROW, GOODS_LAST_ROW, GoodsTargets, MAX_GOODS_LINES, apply_goods_rows, row_visible,
};
pub use mapping::{
    CONTRACT_FIELDS, ContractField, FieldBinding, FillStage, GOODS_COLUMNS, GoodsColumn,
    GoodsField,
};
pub use request::{ContractRequest, FieldValue, GoodsLine};
pub use template::{TemplateInfo, TemplateSource, template_info};

pub use contractsheet_common::{CellAddress, CellRange, CellValue};
pub use contractsheet_workbook::{TemplateWorkbook, WorkbookError};
