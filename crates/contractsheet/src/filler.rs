//! Template Filler: merge-safe cell writes that never abort a run.

use contractsheet_common::{CellAddress, CellValue};
use contractsheet_workbook::{TemplateWorkbook, WorkbookError, WriteOptions};
use serde::Serialize;

use crate::error::{CellWriteCause, CellWriteError};

/// An address on a sheet paired with the value destined for it.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMapping {
    pub address: String,
    pub value: CellValue,
}

impl CellMapping {
    pub fn new(address: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            address: address.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillOptions {
    /// Remove bold from every written cell.
    pub clear_bold: bool,
    /// Treat empty strings and zeros like absent values.
    pub skip_falsy: bool,
}

/// Counters accumulated over one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub cells_written: usize,
    pub cells_skipped: usize,
    pub cells_failed: usize,
    pub goods_rows_visible: u32,
}

pub struct TemplateFiller<'wb> {
    workbook: &'wb mut TemplateWorkbook,
    options: FillOptions,
    report: FillReport,
}

impl<'wb> TemplateFiller<'wb> {
    pub fn new(workbook: &'wb mut TemplateWorkbook, options: FillOptions) -> Self {
        Self {
            workbook,
            options,
            report: FillReport::default(),
        }
    }

    pub fn workbook(&self) -> &TemplateWorkbook {
        &*self.workbook
    }

    pub fn workbook_mut(&mut self) -> &mut TemplateWorkbook {
        &mut *self.workbook
    }

    pub fn report(&self) -> FillReport {
        self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut FillReport {
        &mut self.report
    }

    /// Where a write to `address` would land.
    pub fn resolve_anchor(&self, sheet: &str, address: &str) -> Result<CellAddress, CellWriteError> {
        let addr = parse_address(sheet, address)?;
        self.workbook
            .resolve_anchor(sheet, &addr)
            .map_err(|e| workbook_failure(sheet, address, e))
    }

    /// Write one value, surfacing the failure instead of logging it.
    pub fn try_set_cell(
        &mut self,
        sheet: &str,
        address: &str,
        value: &CellValue,
    ) -> Result<CellAddress, CellWriteError> {
        let addr = parse_address(sheet, address)?;
        let opts = WriteOptions {
            clear_bold: self.options.clear_bold,
        };
        self.workbook
            .write_cell(sheet, &addr, value, &opts)
            .map_err(|e| workbook_failure(sheet, address, e))
    }

    /// Write one value. A failure is logged and counted, then reported as `false`.
    pub fn set_cell(&mut self, sheet: &str, address: &str, value: &CellValue) -> bool {
        match self.try_set_cell(sheet, address, value) {
            Ok(target) => {
                self.report.cells_written += 1;
                tracing::trace!(sheet, address, target = %target, "cell written");
                true
            }
            Err(err) => {
                self.report.cells_failed += 1;
                tracing::warn!(
                    sheet = %err.sheet,
                    address = %err.address,
                    error = %err.cause,
                    "cell write failed; continuing"
                );
                false
            }
        }
    }

    /// Apply the write policy to an optional payload value. Absent values,
    /// and falsy ones under `skip_falsy`, leave the cell untouched.
    pub fn set_field(&mut self, sheet: &str, address: &str, value: Option<CellValue>) -> bool {
        match value {
            Some(v) if !(self.options.skip_falsy && v.is_falsy()) => {
                self.set_cell(sheet, address, &v)
            }
            _ => {
                self.report.cells_skipped += 1;
                false
            }
        }
    }

    /// Each mapping is attempted independently; returns how many succeeded.
    pub fn batch_set_cells(&mut self, sheet: &str, mappings: &[CellMapping]) -> usize {
        mappings
            .iter()
            .filter(|m| self.set_cell(sheet, &m.address, &m.value))
            .count()
    }

    pub fn finish(self) -> FillReport {
        self.report
    }
}

fn parse_address(sheet: &str, address: &str) -> Result<CellAddress, CellWriteError> {
    CellAddress::parse(address).map_err(|e| CellWriteError {
        sheet: sheet.to_string(),
        address: address.to_string(),
        cause: CellWriteCause::Address(e),
    })
}

fn workbook_failure(sheet: &str, address: &str, err: WorkbookError) -> CellWriteError {
    CellWriteError {
        sheet: sheet.to_string(),
        address: address.to_string(),
        cause: CellWriteCause::Workbook(err),
    }
}
