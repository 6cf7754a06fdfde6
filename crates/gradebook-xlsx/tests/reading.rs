//! End-to-end tests for reading XLSX packages built in memory

use std::io::{Cursor, Write};

use gradebook_core::{DateSystem, SheetAccessor};
use gradebook_xlsx::{XlsxError, XlsxReader};
use pretty_assertions::assert_eq;

const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/></Types>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3"><si><t>Период:</t></si><si><r><t xml:space="preserve">1 </t></r><r><t>четверть</t></r></si><si><t>Итог:</t></si></sst>"#;

const SHEET1: &str = r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c></row><row r="2"><c r="A2" t="s"><v>1</v></c></row><row r="10"><c r="C10"><v>45170</v></c><c r="D10" t="s"><v>2</v></c></row><row r="11"><c r="A11" t="inlineStr"><is><t>Математика</t></is></c><c r="C11"><v>54</v></c><c r="D11" t="b"><v>1</v></c><c r="E11" t="e"><v>#N/A</v></c><c r="F11"><f>1+1</f><v>2</v></c><c r="G11" s="3"/></row></sheetData></worksheet>"#;

const SHEET1_RELS: &str = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments" Target="../comments1.xml"/></Relationships>"#;

const COMMENTS1: &str = r#"<?xml version="1.0"?><comments xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><authors><author>Учитель</author></authors><commentList><comment ref="C11" authorId="0"><text><r><t xml:space="preserve">01.09 - Контрольная работа</t></r><r><t xml:space="preserve"> - Дроби;01.09 - Тест - Дроби</t></r></text></comment></commentList></comments>"#;

const SHEET2: &str = r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="str"><v>second</v></c></row></sheetData></worksheet>"#;

fn workbook_xml(active_tab: usize, date1904: bool) -> String {
    format!(
        r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr date1904="{}"/><bookViews><workbookView activeTab="{}"/></bookViews><sheets><sheet name="Отметки" sheetId="1" r:id="rId1"/><sheet name="Прочее" sheetId="2" r:id="rId2"/></sheets></workbook>"#,
        if date1904 { 1 } else { 0 },
        active_tab
    )
}

fn build_package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

fn grade_report_package(active_tab: usize, date1904: bool) -> Vec<u8> {
    let workbook = workbook_xml(active_tab, date1904);
    build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/sharedStrings.xml", SHARED_STRINGS),
        ("xl/worksheets/sheet1.xml", SHEET1),
        ("xl/worksheets/_rels/sheet1.xml.rels", SHEET1_RELS),
        ("xl/comments1.xml", COMMENTS1),
        ("xl/worksheets/sheet2.xml", SHEET2),
    ])
}

#[test]
fn test_read_values_of_every_type() {
    let workbook = XlsxReader::read(Cursor::new(grade_report_package(0, false))).unwrap();
    assert_eq!(workbook.sheet_count(), 2);

    let sheet = workbook.active_sheet().unwrap();
    assert_eq!(sheet.name(), "Отметки");
    assert_eq!(sheet.cell_value(0, 0).as_string(), Some("Период:"));
    assert_eq!(sheet.cell_value(1, 0).as_string(), Some("1 четверть"));
    assert_eq!(sheet.cell_value(9, 2).as_number(), Some(45170.0));
    assert_eq!(sheet.cell_value(9, 3).as_string(), Some("Итог:"));
    assert_eq!(sheet.cell_value(10, 0).as_string(), Some("Математика"));
    assert_eq!(sheet.cell_value(10, 2).display_text(), "54");
    assert_eq!(sheet.cell_value(10, 3).to_string(), "TRUE");
    assert_eq!(sheet.cell_value(10, 4).to_string(), "#N/A");
    assert_eq!(sheet.cell_value(10, 5).as_number(), Some(2.0));
    assert!(sheet.cell_value(10, 6).is_empty());
}

#[test]
fn test_read_comments_through_sheet_relationships() {
    let workbook = XlsxReader::read(Cursor::new(grade_report_package(0, false))).unwrap();
    let sheet = workbook.active_sheet().unwrap();

    assert_eq!(
        sheet.cell_annotation(10, 2),
        Some("01.09 - Контрольная работа - Дроби;01.09 - Тест - Дроби")
    );
    assert_eq!(sheet.comment_at(10, 2).unwrap().author, "Учитель");
    assert_eq!(sheet.comment_count(), 1);

    let other = workbook.worksheet(1).unwrap();
    assert_eq!(other.comment_count(), 0);
    assert_eq!(other.cell_value(0, 0).as_string(), Some("second"));
}

#[test]
fn test_active_tab_and_date_system() {
    let workbook = XlsxReader::read(Cursor::new(grade_report_package(1, true))).unwrap();
    assert_eq!(workbook.active_index(), 1);
    assert_eq!(workbook.active_sheet().unwrap().name(), "Прочее");
    assert_eq!(workbook.date_system(), DateSystem::Excel1904);
    assert_eq!(
        workbook.worksheet(0).unwrap().date_system(),
        DateSystem::Excel1904
    );
}

#[test]
fn test_out_of_range_active_tab_falls_back_to_first() {
    let workbook = XlsxReader::read(Cursor::new(grade_report_package(7, false))).unwrap();
    assert_eq!(workbook.active_sheet().unwrap().name(), "Отметки");
}

#[test]
fn test_missing_content_types_is_invalid() {
    let package = build_package(&[("xl/workbook.xml", &workbook_xml(0, false))]);
    let err = XlsxReader::read(Cursor::new(package)).unwrap_err();
    assert!(matches!(err, XlsxError::InvalidFormat(_)));
}

#[test]
fn test_missing_workbook_rels() {
    let package = build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", &workbook_xml(0, false)),
    ]);
    let err = XlsxReader::read(Cursor::new(package)).unwrap_err();
    assert!(matches!(err, XlsxError::MissingPart(_)));
}

#[test]
fn test_not_a_zip_file() {
    let err = XlsxReader::read(Cursor::new(b"plain text, not a workbook".to_vec())).unwrap_err();
    assert!(matches!(err, XlsxError::Zip(_)));
}

#[test]
fn test_dangling_shared_string_index() {
    let sheet = r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="s"><v>9</v></c></row></sheetData></worksheet>"#;
    let package = build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", &workbook_xml(0, false)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet),
        ("xl/worksheets/sheet2.xml", SHEET2),
    ]);
    let err = XlsxReader::read(Cursor::new(package)).unwrap_err();
    assert!(matches!(err, XlsxError::SharedString(ref idx) if idx == "9"));
}

#[test]
fn test_bad_cell_reference() {
    let sheet = r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="1A"><v>3</v></c></row></sheetData></worksheet>"#;
    let package = build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", &workbook_xml(0, false)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet),
        ("xl/worksheets/sheet2.xml", SHEET2),
    ]);
    let err = XlsxReader::read(Cursor::new(package)).unwrap_err();
    match err {
        XlsxError::BadReference { reference, .. } => assert_eq!(reference, "1A"),
        other => panic!("unexpected error: {other:?}"),
    }
}
