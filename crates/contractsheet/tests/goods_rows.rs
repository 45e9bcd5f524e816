use contractsheet::{
    CellAddress, CellValue, FieldValue, FillOptions, GOODS_FIRST_ROW, GOODS_LAST_ROW,
    GoodsLine, GoodsTargets, TemplateFiller, TemplateWorkbook, apply_goods_rows,
};
use contractsheet_testkit::contract_template_bytes;

fn line(i: usize) -> GoodsLine {
    GoodsLine {
        model: Some(format!("M{i}").as_str().into()),
        description: Some("steel pipe".into()),
        color: Some("black".into()),
        quantity: Some(FieldValue::Text(format!("{}", i + 1))),
        unit_price: Some(FieldValue::Number(2.5)),
        total_amount: Some(FieldValue::Number(2.5 * (i + 1) as f64)),
    }
}

fn both_sheets() -> GoodsTargets<'static> {
    GoodsTargets {
        visibility: vec!["SC", "PI"],
        fill: vec!["SC", "PI"],
    }
}

fn a1(s: &str) -> CellAddress {
    CellAddress::parse(s).unwrap()
}

#[test]
fn visible_rows_track_line_count_on_both_sheets() {
    for k in 0..=15 {
        let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
        let lines: Vec<GoodsLine> = (0..k).map(line).collect();
        let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
        let visible = apply_goods_rows(&mut filler, &both_sheets(), &lines).unwrap();
        assert_eq!(filler.report().goods_rows_visible, visible);
        drop(filler);

        let expected = k.min(10);
        assert_eq!(visible as usize, expected, "k={k}");

        // Round-trip through bytes so the check covers what gets saved
        let bytes = wb.save_to_bytes().unwrap();
        let saved = TemplateWorkbook::open_bytes(bytes).unwrap();
        for sheet in ["SC", "PI"] {
            let shown: Vec<u32> = (GOODS_FIRST_ROW..=GOODS_LAST_ROW)
                .filter(|r| !saved.is_row_hidden(sheet, *r).unwrap())
                .collect();
            let want: Vec<u32> = (GOODS_FIRST_ROW..GOODS_FIRST_ROW + expected as u32).collect();
            assert_eq!(shown, want, "sheet {sheet}, k={k}");
        }
    }
}

#[test]
fn lines_fill_columns_b_through_g() {
    let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
    let lines: Vec<GoodsLine> = (0..3).map(line).collect();
    let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
    apply_goods_rows(&mut filler, &both_sheets(), &lines).unwrap();
    assert_eq!(filler.report().cells_written, 3 * 6 * 2);
    drop(filler);

    for sheet in ["SC", "PI"] {
        assert_eq!(wb.read_cell(sheet, &a1("B13")).unwrap(), "M2".into());
        assert_eq!(wb.read_cell(sheet, &a1("C13")).unwrap(), "steel pipe".into());
        assert_eq!(wb.read_cell(sheet, &a1("D13")).unwrap(), "black".into());
        // Numeric strings land as numbers
        assert_eq!(wb.read_cell(sheet, &a1("E13")).unwrap(), CellValue::Number(3.0));
        assert_eq!(wb.read_cell(sheet, &a1("F13")).unwrap(), CellValue::Number(2.5));
        assert_eq!(wb.read_cell(sheet, &a1("G13")).unwrap(), CellValue::Number(7.5));
        assert_eq!(wb.read_cell(sheet, &a1("B14")).unwrap(), CellValue::Empty);
    }
}

#[test]
fn extra_lines_are_dropped() {
    let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
    let lines: Vec<GoodsLine> = (0..12).map(line).collect();
    let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
    apply_goods_rows(&mut filler, &both_sheets(), &lines).unwrap();
    drop(filler);

    assert_eq!(wb.read_cell("SC", &a1("B20")).unwrap(), "M9".into());
    // Row 21 belongs to the footer: untouched by goods
    assert_eq!(wb.read_cell("SC", &a1("B21")).unwrap(), "Port of loading:".into());
    assert_eq!(wb.read_cell("SC", &a1("G21")).unwrap(), CellValue::Number(0.0));
}

#[test]
fn visibility_without_fill_on_pi() {
    let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
    let targets = GoodsTargets {
        visibility: vec!["SC", "PI"],
        fill: vec!["SC"],
    };
    let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
    apply_goods_rows(&mut filler, &targets, &[line(0), line(1)]).unwrap();
    drop(filler);

    assert_eq!(wb.read_cell("SC", &a1("B11")).unwrap(), "M0".into());
    assert_eq!(wb.read_cell("PI", &a1("B11")).unwrap(), CellValue::Empty);
    assert!(!wb.is_row_hidden("PI", 12).unwrap());
    assert!(wb.is_row_hidden("PI", 13).unwrap());
}

#[test]
fn absent_line_fields_are_skipped() {
    let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
    let sparse = GoodsLine {
        model: Some("ONLY".into()),
        ..Default::default()
    };
    let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
    apply_goods_rows(&mut filler, &both_sheets(), &[sparse]).unwrap();
    let report = filler.report();
    assert_eq!(report.cells_written, 2);
    assert_eq!(report.cells_skipped, 10);
}

#[test]
fn missing_sheet_is_an_error() {
    let mut wb = TemplateWorkbook::open_bytes(contract_template_bytes()).unwrap();
    let targets = GoodsTargets {
        visibility: vec!["Nope"],
        fill: vec![],
    };
    let mut filler = TemplateFiller::new(&mut wb, FillOptions::default());
    assert!(apply_goods_rows(&mut filler, &targets, &[]).is_err());
}
