//! XLSX reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use gradebook_core::{CellAddress, CellComment, CellValue, DateSystem, Workbook, Worksheet};

const REL_WORKSHEET: &str = "/worksheet";
const REL_COMMENTS: &str = "/comments";

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Resolve a relationship target against the directory of the part that owns it.
///
/// `("xl/worksheets", "../comments1.xml")` becomes `xl/comments1.xml`;
/// absolute targets (`/xl/...`) are taken from the package root.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// `xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// One `<Relationship>` entry of a `.rels` part
#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    target: String,
    rel_type: String,
}

/// Sheet list and workbook-wide settings from `xl/workbook.xml`
#[derive(Debug, Default)]
struct WorkbookInfo {
    /// (sheet name, relationship id) in tab order
    sheets: Vec<(String, String)>,
    active_tab: usize,
    date1904: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat("no [Content_Types].xml".into()));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let info = Self::read_workbook_xml(&mut archive)?;
        let workbook_rels = Self::read_relationships(&mut archive, "xl/_rels/workbook.xml.rels")?
            .ok_or_else(|| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut workbook = Workbook::empty();
        if info.date1904 {
            workbook.set_date_system(DateSystem::Excel1904);
        }

        for (name, r_id) in &info.sheets {
            let rel = workbook_rels
                .iter()
                .find(|rel| &rel.id == r_id && rel.rel_type.ends_with(REL_WORKSHEET));
            let Some(rel) = rel else {
                log::warn!("sheet '{}' has no worksheet relationship ({}), skipped", name, r_id);
                continue;
            };

            let path = resolve_target("xl", &rel.target);
            let mut worksheet = Worksheet::new(name.clone());
            Self::read_worksheet(&mut archive, &path, &mut worksheet, &shared_strings)?;
            Self::read_worksheet_comments(&mut archive, &path, &mut worksheet)?;

            log::debug!(
                "read sheet '{}' from {}: {} cells, {} comments",
                name,
                path,
                worksheet.cell_count(),
                worksheet.comment_count()
            );
            workbook.push_worksheet(worksheet);
        }

        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat("workbook has no worksheets".into()));
        }

        if info.active_tab < workbook.sheet_count() {
            workbook.set_active(info.active_tab)?;
        } else {
            log::warn!(
                "active tab {} out of range ({} sheets), using the first sheet",
                info.active_tab,
                workbook.sheet_count()
            );
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names, rIds, the active tab and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookInfo> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut info = WorkbookInfo::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"sheet" => {
                        let name = attr_string(&e, b"name");
                        let r_id = attr_string(&e, b"r:id");
                        if let (Some(name), Some(r_id)) = (name, r_id) {
                            info.sheets.push((name, r_id));
                        }
                    }
                    b"workbookPr" => {
                        info.date1904 = attr_string(&e, b"date1904")
                            .map_or(false, |v| is_truthy(&v));
                    }
                    b"workbookView" => {
                        info.active_tab = attr_string(&e, b"activeTab")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// Read a `.rels` part. Returns `None` when the part does not exist.
    fn read_relationships<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
    ) -> XlsxResult<Option<Vec<Relationship>>> {
        let file = match archive.by_name(path) {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_string(&e, b"Id");
                    let target = attr_string(&e, b"Target");
                    let rel_type = attr_string(&e, b"Type");
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        rels.push(Relationship {
                            id,
                            target,
                            rel_type,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Some(rels))
    }

    /// Read a worksheet's cell values from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();

        // Current cell state
        let mut current_cell_ref: Option<String> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_value: Option<String> = None;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => {
                        in_cell = true;
                        current_cell_ref = attr_string(&e, b"r");
                        current_cell_type = attr_string(&e, b"t");
                        current_value = None;
                    }
                    b"v" if in_cell => in_value = true,
                    b"is" if in_cell => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        match current_cell_ref.as_deref() {
                            Some(cell_ref) => Self::process_cell(
                                worksheet,
                                cell_ref,
                                current_cell_type.as_deref(),
                                current_value.as_deref(),
                                shared_strings,
                            )?,
                            None => log::warn!("cell without a reference in {}, skipped", path),
                        }
                        in_cell = false;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    current_value
                        .get_or_insert_with(String::new)
                        .push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Process a cell and add it to the worksheet
    fn process_cell(
        worksheet: &mut Worksheet,
        cell_ref: &str,
        cell_type: Option<&str>,
        value: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let addr = CellAddress::parse(cell_ref).map_err(|source| XlsxError::BadReference {
            reference: cell_ref.to_string(),
            source,
        })?;

        let Some(value) = value else {
            return Ok(());
        };

        let cell_value = match cell_type {
            // Shared string
            Some("s") => {
                let s = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| shared_strings.get(idx))
                    .ok_or_else(|| XlsxError::SharedString(value.to_string()))?;
                CellValue::String(s.clone())
            }

            Some("b") => CellValue::Boolean(is_truthy(value.trim())),

            Some("e") => CellValue::Error(value.to_string()),

            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),

            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(value.to_string()),
            },

            // ISO 8601 dates ("d") and unknown types are kept as text
            Some(_) => CellValue::String(value.to_string()),
        };

        worksheet.set_cell_value_at(addr.row, addr.col, cell_value)?;
        Ok(())
    }

    /// Read the legacy comments part linked from a worksheet's relationships
    fn read_worksheet_comments<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        sheet_path: &str,
        worksheet: &mut Worksheet,
    ) -> XlsxResult<()> {
        let Some(rels) = Self::read_relationships(archive, &rels_path_for(sheet_path))? else {
            return Ok(()); // No relationships means no comments
        };
        let Some(rel) = rels.iter().find(|rel| rel.rel_type.ends_with(REL_COMMENTS)) else {
            return Ok(());
        };

        let base_dir = sheet_path.rsplit_once('/').map_or("", |(dir, _)| dir);
        let comments_path = resolve_target(base_dir, &rel.target);
        let file = archive
            .by_name(&comments_path)
            .map_err(|_| XlsxError::MissingPart(comments_path.clone()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut authors: Vec<String> = Vec::new();

        let mut in_author = false;
        let mut in_comment = false;
        let mut in_t = false;
        let mut in_phonetic = false;
        let mut current_author = String::new();
        let mut current_ref: Option<String> = None;
        let mut current_author_id: Option<usize> = None;
        let mut current_text = String::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"author" => {
                        in_author = true;
                        current_author.clear();
                    }
                    b"comment" => {
                        in_comment = true;
                        current_ref = attr_string(&e, b"ref");
                        current_author_id =
                            attr_string(&e, b"authorId").and_then(|s| s.parse().ok());
                        current_text.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_comment && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"author" => {
                    authors.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"author" => {
                        authors.push(std::mem::take(&mut current_author));
                        in_author = false;
                    }
                    b"comment" => {
                        match current_ref.as_deref().map(CellAddress::parse) {
                            Some(Ok(addr)) => {
                                let author = current_author_id
                                    .and_then(|id| authors.get(id))
                                    .cloned()
                                    .unwrap_or_default();
                                let text = decode_excel_escapes(&current_text);
                                worksheet.set_comment_at(
                                    addr.row,
                                    addr.col,
                                    CellComment::new(author, text),
                                );
                            }
                            Some(Err(e)) => log::warn!("comment on invalid address skipped: {}", e),
                            None => log::warn!("comment without a cell reference skipped"),
                        }
                        in_comment = false;
                        current_text.clear();
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_author {
                        current_author.push_str(&e.unescape()?);
                    } else if in_t {
                        // Rich text runs are concatenated as-is
                        current_text.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }
}
