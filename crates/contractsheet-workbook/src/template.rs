use crate::error::WorkbookError;
use crate::metadata::{SheetMetadata, WorkbookMetadata};
use contractsheet_common::{CellAddress, CellRange, CellValue};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{CellRawValue, Spreadsheet, Worksheet, reader::xlsx};

/// Knobs applied on every cell write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Strip bold from the written cell's existing font.
    pub clear_bold: bool,
}

/// An xlsx template opened for filling.
///
/// Each instance owns its own deserialised `Spreadsheet`; nothing is shared
/// between instances, so one per request is safe to use without locking.
pub struct TemplateWorkbook {
    book: Spreadsheet,
    origin: Option<PathBuf>,
}

impl TemplateWorkbook {
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(WorkbookError::NotFound(path.to_path_buf()));
        }
        // Full read (not lazy) so the writer never meets an undeserialised sheet
        let book = xlsx::read(path).map_err(WorkbookError::Open)?;
        Ok(Self {
            book,
            origin: Some(path.to_path_buf()),
        })
    }

    pub fn open_bytes(data: impl AsRef<[u8]>) -> Result<Self, WorkbookError> {
        let book =
            xlsx::read_reader(Cursor::new(data.as_ref()), true).map_err(WorkbookError::Open)?;
        Ok(Self { book, origin: None })
    }

    /// Path the workbook was read from, if it came from disk.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|ws| ws.get_name().to_string())
            .collect()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.book.get_sheet_by_name(name).is_some()
    }

    fn sheet(&self, name: &str) -> Result<&Worksheet, WorkbookError> {
        self.book
            .get_sheet_by_name(name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet, WorkbookError> {
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }

    pub fn merged_ranges(&self, sheet: &str) -> Result<Vec<CellRange>, WorkbookError> {
        Ok(merged_ranges_of(self.sheet(sheet)?))
    }

    /// Top-left cell of the merged region containing `addr`, or `addr` itself.
    pub fn resolve_anchor(
        &self,
        sheet: &str,
        addr: &CellAddress,
    ) -> Result<CellAddress, WorkbookError> {
        Ok(resolve_anchor_in(&merged_ranges_of(self.sheet(sheet)?), addr))
    }

    /// Write `value` at `addr`, redirected to the merge anchor when `addr` sits
    /// inside a merged region. Returns the cell that was actually written.
    ///
    /// The merge list is never touched, and the cell's style is only modified
    /// when `opts.clear_bold` asks for it.
    pub fn write_cell(
        &mut self,
        sheet: &str,
        addr: &CellAddress,
        value: &CellValue,
        opts: &WriteOptions,
    ) -> Result<CellAddress, WorkbookError> {
        let ws = self.sheet_mut(sheet)?;
        let target = resolve_anchor_in(&merged_ranges_of(ws), addr);
        // umya uses (col,row)
        let cell = ws.get_cell_mut(<(u32, u32)>::from(target));
        match value {
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
            CellValue::Text(s) if !s.is_empty() => {
                cell.set_value_string(s.as_str());
            }
            CellValue::Text(_) | CellValue::Empty => {
                cell.set_blank();
            }
        }
        if opts.clear_bold && cell.get_style().get_font().is_some() {
            cell.get_style_mut().get_font_mut().set_bold(false);
        }
        Ok(target)
    }

    /// Read the value at `addr`, following merges to the anchor.
    pub fn read_cell(&self, sheet: &str, addr: &CellAddress) -> Result<CellValue, WorkbookError> {
        let ws = self.sheet(sheet)?;
        let target = resolve_anchor_in(&merged_ranges_of(ws), addr);
        let Some(cell) = ws.get_cell(<(u32, u32)>::from(target)) else {
            return Ok(CellValue::Empty);
        };
        Ok(match cell.get_cell_value().get_raw_value() {
            CellRawValue::Numeric(n) => CellValue::Number(*n),
            CellRawValue::Empty => CellValue::Empty,
            _ => {
                let text = cell.get_value();
                if text.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(text.to_string())
                }
            }
        })
    }

    /// Whether the cell at `addr` (after anchor resolution) carries a bold font.
    pub fn is_bold(&self, sheet: &str, addr: &CellAddress) -> Result<bool, WorkbookError> {
        let ws = self.sheet(sheet)?;
        let target = resolve_anchor_in(&merged_ranges_of(ws), addr);
        Ok(ws
            .get_cell(<(u32, u32)>::from(target))
            .and_then(|cell| cell.get_style().get_font())
            .is_some_and(|font| matches!(font.get_bold(), true)))
    }

    pub fn set_row_hidden(
        &mut self,
        sheet: &str,
        row: u32,
        hidden: bool,
    ) -> Result<(), WorkbookError> {
        self.sheet_mut(sheet)?
            .get_row_dimension_mut(&row)
            .set_hidden(hidden);
        Ok(())
    }

    /// Inclusive on both ends.
    pub fn set_rows_hidden(
        &mut self,
        sheet: &str,
        start: u32,
        end: u32,
        hidden: bool,
    ) -> Result<(), WorkbookError> {
        let ws = self.sheet_mut(sheet)?;
        for row in start..=end {
            ws.get_row_dimension_mut(&row).set_hidden(hidden);
        }
        Ok(())
    }

    pub fn is_row_hidden(&self, sheet: &str, row: u32) -> Result<bool, WorkbookError> {
        Ok(self
            .sheet(sheet)?
            .get_row_dimension(&row)
            .is_some_and(|dim| matches!(dim.get_hidden(), true)))
    }

    pub fn metadata(&self) -> WorkbookMetadata {
        let sheets = self
            .book
            .get_sheet_collection()
            .iter()
            .map(|ws| SheetMetadata {
                name: ws.get_name().to_string(),
                max_row: ws.get_highest_row(),
                max_column: ws.get_highest_column(),
                merged_ranges: merged_ranges_of(ws).iter().map(CellRange::to_a1).collect(),
            })
            .collect();
        WorkbookMetadata { sheets }
    }

    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, WorkbookError> {
        // Force deserialize each sheet before handing the book to the writer
        let count = self.book.get_sheet_count();
        for i in 0..count {
            self.book.read_sheet(i);
        }
        let mut buf = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut buf)
            .map_err(WorkbookError::Save)?;
        Ok(buf.into_inner())
    }
}

fn merged_ranges_of(ws: &Worksheet) -> Vec<CellRange> {
    ws.get_merge_cells()
        .iter()
        .filter_map(|range| CellRange::parse(&range.get_range()).ok())
        .collect()
}

/// First merged range containing `addr` wins; merges never overlap in a valid sheet.
pub fn resolve_anchor_in(merged: &[CellRange], addr: &CellAddress) -> CellAddress {
    merged
        .iter()
        .find(|range| range.contains(addr))
        .map(CellRange::anchor)
        .unwrap_or(*addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(specs: &[&str]) -> Vec<CellRange> {
        specs.iter().map(|s| CellRange::parse(s).unwrap()).collect()
    }

    #[test]
    fn anchor_resolution_is_pure() {
        let merged = ranges(&["C3:D3", "E7:G8"]);
        let at = |a1: &str| resolve_anchor_in(&merged, &CellAddress::parse(a1).unwrap()).to_a1();
        assert_eq!(at("C3"), "C3");
        assert_eq!(at("D3"), "C3");
        assert_eq!(at("G8"), "E7");
        assert_eq!(at("F7"), "E7");
        assert_eq!(at("H8"), "H8");
        assert_eq!(at("B3"), "B3");
    }

    #[test]
    fn no_merges_is_identity() {
        let addr = CellAddress::parse("Z99").unwrap();
        assert_eq!(resolve_anchor_in(&[], &addr), addr);
    }
}
