//! Fixture helpers shared by the contractsheet test suites.
//!
//! Everything here panics on failure; it is only ever linked into tests.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Merged regions present on both the SC and PI sheets of the fixture template.
pub const CONTRACT_MERGES: &[&str] = &[
    "C3:D3", "C4:D4", "C5:D5", "C6:D6", "C7:D7", "C8:D8", "E7:G8", "D21:E21", "D22:E22",
    "B23:G23", "D24:G24", "D25:G25", "D26:G26",
];

/// Cells that start out bold in the fixture template.
pub const BOLD_CELLS: &[&str] = &["C3", "G3", "G21", "B23"];

const LABELS: &[(&str, &str)] = &[
    ("A1", "SALES CONTRACT"),
    ("B3", "Buyer:"),
    ("B4", "Address:"),
    ("B5", "Tel:"),
    ("B6", "Seller:"),
    ("B7", "Address:"),
    ("B8", "Tel:"),
    ("F3", "Contract No.:"),
    ("F4", "Date:"),
    ("F5", "Signed at:"),
    ("B10", "Model"),
    ("C10", "Description"),
    ("D10", "Color"),
    ("E10", "Qty"),
    ("F10", "Unit Price"),
    ("G10", "Amount"),
    ("B21", "Port of loading:"),
    ("B22", "Destination:"),
    ("F21", "Total:"),
    ("B24", "Payment:"),
    ("B25", "Route:"),
    ("B26", "Shipment:"),
];

fn dress_contract_sheet(ws: &mut Worksheet) {
    for (addr, text) in LABELS {
        ws.get_cell_mut(*addr).set_value_string(*text);
    }
    // Placeholder text the generator is expected to overwrite or clear
    ws.get_cell_mut("C3").set_value_string("BUYER NAME");
    ws.get_cell_mut("G3").set_value_string("CONTRACT NO");
    ws.get_cell_mut("G21").set_value_number(0.0);
    ws.get_cell_mut("B23").set_value_string("SAY TOTAL");
    for addr in BOLD_CELLS {
        ws.get_cell_mut(*addr)
            .get_style_mut()
            .get_font_mut()
            .set_bold(true);
    }
    for range in CONTRACT_MERGES {
        ws.add_merge_cells(*range);
    }
}

/// A two-sheet contract template (`SC` then `PI`) with the merged layout the
/// generator's field table expects.
pub fn contract_template_book() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    {
        let sc = book
            .get_sheet_by_name_mut("Sheet1")
            .expect("new_file has Sheet1");
        sc.set_name("SC");
        dress_contract_sheet(sc);
    }
    let pi = book.new_sheet("PI").expect("add PI sheet");
    dress_contract_sheet(pi);
    book
}

pub fn contract_template_bytes() -> Vec<u8> {
    to_bytes(&contract_template_book())
}

/// Same layout but with only the SC sheet.
pub fn sc_only_template_bytes() -> Vec<u8> {
    build_workbook_bytes(|book| {
        let sc = book.get_sheet_by_name_mut("Sheet1").expect("Sheet1");
        sc.set_name("SC");
        dress_contract_sheet(sc);
    })
}

/// Start from an empty `Sheet1` workbook, let `f` shape it, and serialise.
pub fn build_workbook_bytes<F: FnOnce(&mut Spreadsheet)>(f: F) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    to_bytes(&book)
}

pub fn to_bytes(book: &Spreadsheet) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut buf).expect("write xlsx");
    buf.into_inner()
}

pub fn read_bytes(bytes: &[u8]) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).expect("read xlsx")
}

/// Scratch directory holding a written fixture; removed on drop.
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn write_fixture(name: &str, bytes: &[u8]) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    Fixture { _dir: dir, path }
}

/// The standard contract template written to `contract_template.xlsx`.
pub fn contract_template_fixture() -> Fixture {
    write_fixture("contract_template.xlsx", &contract_template_bytes())
}
