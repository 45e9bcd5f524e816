use contractsheet_common::{CellAddress, CellValue};
use contractsheet_testkit::{
    BOLD_CELLS, CONTRACT_MERGES, build_workbook_bytes, contract_template_bytes,
    contract_template_fixture, read_bytes,
};
use contractsheet_workbook::{TemplateWorkbook, WorkbookError, WriteOptions};

fn a1(s: &str) -> CellAddress {
    CellAddress::parse(s).unwrap()
}

fn open_contract() -> TemplateWorkbook {
    TemplateWorkbook::open_bytes(contract_template_bytes()).expect("open template")
}

#[test]
fn lists_sheets_in_order() {
    let wb = open_contract();
    assert_eq!(wb.sheet_names(), vec!["SC".to_string(), "PI".to_string()]);
    assert!(wb.has_sheet("PI"));
    assert!(!wb.has_sheet("Invoice"));
}

#[test]
fn write_inside_merge_lands_on_anchor() {
    let mut wb = open_contract();
    let opts = WriteOptions::default();

    let written = wb
        .write_cell("SC", &a1("D3"), &"ACME Trading".into(), &opts)
        .unwrap();
    assert_eq!(written, a1("C3"));
    assert_eq!(wb.read_cell("SC", &a1("C3")).unwrap(), "ACME Trading".into());
    // Reads through any member of the merge see the anchor value
    assert_eq!(wb.read_cell("SC", &a1("D3")).unwrap(), "ACME Trading".into());

    let written = wb
        .write_cell("SC", &a1("G8"), &"BANK OF X".into(), &opts)
        .unwrap();
    assert_eq!(written, a1("E7"));
}

#[test]
fn writes_leave_merge_list_untouched() {
    let mut wb = open_contract();
    let before = wb.merged_ranges("SC").unwrap();
    assert_eq!(before.len(), CONTRACT_MERGES.len());

    let opts = WriteOptions { clear_bold: true };
    for addr in ["C3", "D3", "E7", "F8", "B23", "G26", "H40"] {
        wb.write_cell("SC", &a1(addr), &CellValue::Number(1.0), &opts)
            .unwrap();
    }
    assert_eq!(wb.merged_ranges("SC").unwrap(), before);

    let bytes = wb.save_to_bytes().unwrap();
    let reopened = TemplateWorkbook::open_bytes(&bytes).unwrap();
    assert_eq!(reopened.merged_ranges("SC").unwrap(), before);
}

#[test]
fn empty_value_clears_cell() {
    let mut wb = open_contract();
    assert_eq!(wb.read_cell("SC", &a1("G3")).unwrap(), "CONTRACT NO".into());
    wb.write_cell("SC", &a1("G3"), &CellValue::Empty, &WriteOptions::default())
        .unwrap();
    assert_eq!(wb.read_cell("SC", &a1("G3")).unwrap(), CellValue::Empty);

    wb.write_cell("SC", &a1("C3"), &"".into(), &WriteOptions::default())
        .unwrap();
    assert!(wb.read_cell("SC", &a1("C3")).unwrap().is_empty());
}

#[test]
fn clear_bold_only_when_asked() {
    let mut wb = open_contract();
    for addr in BOLD_CELLS {
        assert!(wb.is_bold("SC", &a1(addr)).unwrap(), "{addr}");
    }

    wb.write_cell("SC", &a1("C3"), &"X".into(), &WriteOptions::default())
        .unwrap();
    assert!(wb.is_bold("SC", &a1("C3")).unwrap());

    wb.write_cell("SC", &a1("D3"), &"Y".into(), &WriteOptions { clear_bold: true })
        .unwrap();
    assert!(!wb.is_bold("SC", &a1("C3")).unwrap());
    // Other sheet untouched
    assert!(wb.is_bold("PI", &a1("C3")).unwrap());
}

#[test]
fn row_visibility_survives_save() {
    let mut wb = open_contract();
    wb.set_rows_hidden("SC", 11, 20, true).unwrap();
    wb.set_rows_hidden("SC", 11, 13, false).unwrap();
    wb.set_row_hidden("PI", 15, true).unwrap();

    let bytes = wb.save_to_bytes().unwrap();
    let reopened = TemplateWorkbook::open_bytes(&bytes).unwrap();
    for row in 11..=13 {
        assert!(!reopened.is_row_hidden("SC", row).unwrap(), "row {row}");
    }
    for row in 14..=20 {
        assert!(reopened.is_row_hidden("SC", row).unwrap(), "row {row}");
    }
    assert!(reopened.is_row_hidden("PI", 15).unwrap());
    assert!(!reopened.is_row_hidden("PI", 14).unwrap());
    assert!(!reopened.is_row_hidden("SC", 21).unwrap());
}

#[test]
fn saved_bytes_are_a_readable_xlsx() {
    let mut wb = open_contract();
    wb.write_cell("PI", &a1("E11"), &CellValue::Number(100.0), &WriteOptions::default())
        .unwrap();
    let bytes = wb.save_to_bytes().unwrap();

    let book = read_bytes(&bytes);
    let pi = book.get_sheet_by_name("PI").unwrap();
    assert_eq!(pi.get_value("E11"), "100");
}

#[test]
fn open_path_reads_fixture_and_reports_missing() {
    let fixture = contract_template_fixture();
    let wb = TemplateWorkbook::open_path(fixture.path()).unwrap();
    assert_eq!(wb.origin(), Some(fixture.path()));
    assert!(wb.has_sheet("SC"));

    let missing = fixture.path().with_file_name("nope.xlsx");
    match TemplateWorkbook::open_path(&missing) {
        Err(WorkbookError::NotFound(p)) => assert_eq!(p, missing),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("missing file opened"),
    }
}

#[test]
fn garbage_bytes_fail_to_open() {
    let err = TemplateWorkbook::open_bytes(b"not a zip archive").err().unwrap();
    assert!(matches!(err, WorkbookError::Open(_)), "{err}");
}

#[test]
fn unknown_sheet_is_an_error() {
    let mut wb = open_contract();
    let err = wb
        .write_cell("Nope", &a1("A1"), &"x".into(), &WriteOptions::default())
        .unwrap_err();
    assert!(matches!(err, WorkbookError::SheetNotFound(ref s) if s == "Nope"));
    assert!(wb.is_row_hidden("Nope", 1).is_err());
}

#[test]
fn metadata_describes_each_sheet() {
    let wb = open_contract();
    let meta = wb.metadata();
    assert_eq!(meta.sheets.len(), 2);
    let sc = meta.sheet("SC").unwrap();
    assert!(sc.max_row >= 26);
    assert!(sc.max_column >= 7);
    assert!(sc.merged_ranges.iter().any(|r| r == "E7:G8"));
    assert_eq!(sc.merged_ranges.len(), CONTRACT_MERGES.len());
}

#[test]
fn plain_workbook_without_merges() {
    let bytes = build_workbook_bytes(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut((2, 2)).set_value_string("hello");
    });
    let wb = TemplateWorkbook::open_bytes(bytes).unwrap();
    assert!(wb.merged_ranges("Sheet1").unwrap().is_empty());
    assert_eq!(wb.resolve_anchor("Sheet1", &a1("B2")).unwrap(), a1("B2"));
    assert_eq!(wb.read_cell("Sheet1", &a1("B2")).unwrap(), "hello".into());
    assert_eq!(wb.read_cell("Sheet1", &a1("Z9")).unwrap(), CellValue::Empty);
}
