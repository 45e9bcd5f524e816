//! Template workbook access for the contract generator.
//!
//! Wraps `umya_spreadsheet` with the handful of operations template filling
//! needs: merge-anchored cell writes, row visibility, and byte round-trips.

pub mod error;
pub mod metadata;
pub mod template;

pub use error::WorkbookError;
pub use metadata::{SheetMetadata, WorkbookMetadata};
pub use template::{TemplateWorkbook, WriteOptions, resolve_anchor_in};
