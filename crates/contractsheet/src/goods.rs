//! Goods-Row Visibility Controller.
//!
//! The template reserves rows 11..=20 for line items. Rows for supplied lines
//! are shown and filled; the rest of the band is hidden. Visibility is applied
//! to every listed sheet; values go only to the sheets that carry goods data.

use contractsheet_workbook::WorkbookError;

use crate::filler::TemplateFiller;
use crate::mapping::GOODS_COLUMNS;
use crate::request::GoodsLine;

pub const GOODS_FIRST_ROW: u32 = 11;
pub const GOODS_LAST_ROW: u32 = 20;
pub const MAX_GOODS_LINES: usize = (GOODS_LAST_ROW - GOODS_FIRST_ROW + 1) as usize;

/// Sheets touched by [`apply_goods_rows`].
#[derive(Clone, Debug, Default)]
pub struct GoodsTargets<'a> {
    /// Sheets whose band visibility follows the line count.
    pub visibility: Vec<&'a str>,
    /// Sheets that receive the line values.
    pub fill: Vec<&'a str>,
}

/// Whether band row `row` is shown for `count` supplied lines.
pub fn row_visible(row: u32, count: usize) -> bool {
    (GOODS_FIRST_ROW..=GOODS_LAST_ROW).contains(&row)
        && ((row - GOODS_FIRST_ROW) as usize) < count.min(MAX_GOODS_LINES)
}

/// Show rows for the first ten lines, hide the rest of the band, and write
/// each line into columns B..G of its row. Lines past the tenth are dropped.
///
/// Returns the number of visible band rows. Only a missing sheet fails; cell
/// writes go through the filler and never abort.
pub fn apply_goods_rows(
    filler: &mut TemplateFiller<'_>,
    targets: &GoodsTargets<'_>,
    lines: &[GoodsLine],
) -> Result<u32, WorkbookError> {
    let count = lines.len().min(MAX_GOODS_LINES);
    if lines.len() > MAX_GOODS_LINES {
        tracing::warn!(
            supplied = lines.len(),
            kept = MAX_GOODS_LINES,
            "goods lines beyond the band are dropped"
        );
    }

    for sheet in &targets.visibility {
        let wb = filler.workbook_mut();
        for row in GOODS_FIRST_ROW..=GOODS_LAST_ROW {
            wb.set_row_hidden(sheet, row, !row_visible(row, count))?;
        }
    }

    for sheet in &targets.fill {
        for (offset, line) in lines.iter().take(count).enumerate() {
            let row = GOODS_FIRST_ROW + offset as u32;
            for column in GOODS_COLUMNS {
                let address = format!("{}{row}", column.column);
                let value = line
                    .get(column.field)
                    .map(|v| v.to_cell_value(column.field.is_numeric()));
                filler.set_field(sheet, &address, value);
            }
        }
    }

    let visible = count as u32;
    filler.report_mut().goods_rows_visible = visible;
    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_rule() {
        assert!(!row_visible(11, 0));
        assert!(row_visible(11, 1));
        assert!(!row_visible(12, 1));
        assert!(row_visible(20, 10));
        assert!(row_visible(20, 15));
        assert!(!row_visible(21, 15));
        assert!(!row_visible(10, 15));
    }

    #[test]
    fn band_holds_ten_lines() {
        assert_eq!(MAX_GOODS_LINES, 10);
    }
}
