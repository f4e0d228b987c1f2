//! X/Y section extraction from the input point-list workbook.

use std::path::Path;
use std::sync::LazyLock;

use calamine::{Data, Range, Reader, open_workbook_auto};
use regex::Regex;
use tracing::{debug, info};
use xyref_name::{EnumSection, SpecPointRow};

use crate::conf::{LAYOUT_SECTION_X, LAYOUT_SECTION_Y, PATTERN_CODE_X, PATTERN_CODE_Y};
use crate::spec::{
    EnumSheetSelector, ReportExtract, SpecPointSections, SpecSectionLayout, XyrefXlsxError,
};
use crate::util::derive_cell_text;

static RE_CODE_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_CODE_X).expect("X code pattern"));
static RE_CODE_Y: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_CODE_Y).expect("Y code pattern"));

/// Code pattern of `section`.
fn derive_code_regex(section: EnumSection) -> &'static Regex {
    match section {
        EnumSection::X => &RE_CODE_X,
        EnumSection::Y => &RE_CODE_Y,
    }
}

/// Read both fixed sections from one worksheet of `path_file_in`.
///
/// All cells are treated as text. A sheet that does not reach a section's
/// columns yields an empty section plus a warning in the report.
pub fn read_point_sections(
    path_file_in: &Path,
    sheet: &EnumSheetSelector,
) -> Result<(SpecPointSections, ReportExtract), XyrefXlsxError> {
    let mut workbook =
        open_workbook_auto(path_file_in).map_err(|err| XyrefXlsxError::WorkbookOpenFailed {
            path: path_file_in.to_path_buf(),
            message: err.to_string(),
        })?;

    let range = match sheet {
        EnumSheetSelector::Index(n_idx) => workbook
            .worksheet_range_at(*n_idx)
            .ok_or_else(|| XyrefXlsxError::SheetNotFound(sheet.clone()))?,
        EnumSheetSelector::Name(name) => {
            if !workbook.sheet_names().iter().any(|val| val == name) {
                return Err(XyrefXlsxError::SheetNotFound(sheet.clone()));
            }
            workbook.worksheet_range(name)
        }
    }
    .map_err(|err| XyrefXlsxError::SheetReadFailed {
        sheet: sheet.clone(),
        message: err.to_string(),
    })?;

    debug!(
        "sheet {sheet} spans {:?}..={:?} in {}",
        range.start(),
        range.end(),
        path_file_in.display()
    );

    let mut report = ReportExtract::default();
    let rows_x = extract_section(&range, &LAYOUT_SECTION_X, &mut report);
    let rows_y = extract_section(&range, &LAYOUT_SECTION_Y, &mut report);

    Ok((SpecPointSections { rows_x, rows_y }, report))
}

/// Collect the filtered `(code, label)` rows of one section.
///
/// Rows with a null/blank label are dropped first, then rows whose trimmed
/// code does not fully match the section's code pattern. Both cells are
/// trimmed.
pub fn extract_section(
    range: &Range<Data>,
    layout: &SpecSectionLayout,
    report: &mut ReportExtract,
) -> Vec<SpecPointRow> {
    let re_code = derive_code_regex(layout.section);

    let n_col_needed = u32::max(layout.col_code, layout.col_label);
    let Some((n_row_end, n_col_end)) = range.end().filter(|(_, c)| *c >= n_col_needed) else {
        let msg = format!(
            "Columns {}/{} ({} section) not found; section left empty.",
            derive_column_letter(layout.col_code),
            derive_column_letter(layout.col_label),
            layout.section
        );
        info!("{msg}");
        report.warn(msg);
        return vec![];
    };
    debug!("section {} reads rows up to {n_row_end} (last col {n_col_end})", layout.section);

    let mut l_rows = Vec::new();
    for n_row in layout.row_start..=n_row_end {
        report.cnt_scanned += 1;

        let Some(c_label) = range
            .get_value((n_row, layout.col_label))
            .and_then(derive_cell_text)
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
        else {
            report.cnt_skipped_blank += 1;
            continue;
        };

        let c_code = range
            .get_value((n_row, layout.col_code))
            .and_then(derive_cell_text)
            .map(|val| val.trim().to_string())
            .unwrap_or_default();
        if !re_code.is_match(&c_code) {
            report.cnt_skipped_code += 1;
            continue;
        }

        report.add_kept(layout.section);
        l_rows.push(SpecPointRow::new(c_code, c_label));
    }

    info!("section {}: {} rows", layout.section, l_rows.len());
    l_rows
}

fn derive_column_letter(col_idx: u32) -> String {
    let mut n_rest = col_idx + 1;
    let mut l_chars = Vec::new();
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push(char::from(b'A' + n_rem as u8));
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use rust_xlsxwriter::Workbook;

    use super::*;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("xyref_reader_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn build_range(cells: &[(u32, u32, &str)]) -> Range<Data> {
        let mut range = Range::new((0, 0), (30, 6));
        for (n_row, n_col, txt) in cells {
            range.set_value((*n_row, *n_col), Data::String(txt.to_string()));
        }
        range
    }

    #[test]
    fn test_code_patterns_are_per_section_full_matches() {
        let re_x = derive_code_regex(EnumSection::X);
        assert!(re_x.is_match("X001"));
        assert!(re_x.is_match("x7"));
        assert!(!re_x.is_match("X1a"));
        assert!(!re_x.is_match("AX1"));
        assert!(!re_x.is_match("Y001"));

        let re_y = derive_code_regex(EnumSection::Y);
        assert!(re_y.is_match("y12"));
        assert!(!re_y.is_match("X001"));
        assert!(!re_y.is_match("Y"));
    }

    #[test]
    fn test_derive_column_letter() {
        assert_eq!(derive_column_letter(0), "A");
        assert_eq!(derive_column_letter(6), "G");
        assert_eq!(derive_column_letter(25), "Z");
        assert_eq!(derive_column_letter(26), "AA");
    }

    #[test]
    fn test_extract_section_filters_blank_labels_and_foreign_codes() {
        let range = build_range(&[
            // above the data region: ignored
            (3, 0, "X000"),
            (3, 1, "進風機0"),
            (15, 0, " X001 "),
            (15, 1, " A16進風機1運轉訊號 "),
            (16, 0, "X002"),
            (16, 1, "   "),
            (17, 0, "備註"),
            (17, 1, "說明"),
            (18, 0, "x3"),
            (18, 1, "進氣機2故障訊號"),
            (19, 0, "Y001"),
            (19, 1, "電動風門5"),
        ]);
        let mut report = ReportExtract::default();

        let l_rows = extract_section(&range, &LAYOUT_SECTION_X, &mut report);
        assert_eq!(
            l_rows,
            vec![
                SpecPointRow::new("X001", "A16進風機1運轉訊號"),
                SpecPointRow::new("x3", "進氣機2故障訊號"),
            ]
        );
        assert_eq!(report.cnt_kept_x, 2);
        assert_eq!(report.cnt_skipped_blank, 12);
        assert_eq!(report.cnt_skipped_code, 2);
        assert_eq!(report.cnt_scanned, 16);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_extract_section_reads_y_columns() {
        let range = build_range(&[
            (15, 0, "X001"),
            (15, 1, "進風機1"),
            (15, 5, "Y001"),
            (15, 6, "CO-07"),
            (16, 5, "Y002"),
            (16, 6, "B2排風機3"),
        ]);
        let mut report = ReportExtract::default();

        let l_rows = extract_section(&range, &LAYOUT_SECTION_Y, &mut report);
        assert_eq!(
            l_rows,
            vec![
                SpecPointRow::new("Y001", "CO-07"),
                SpecPointRow::new("Y002", "B2排風機3"),
            ]
        );
        assert_eq!(report.cnt_kept_y, 2);
        assert_eq!(report.cnt_kept_x, 0);
    }

    #[test]
    fn test_extract_section_missing_columns_is_informational() {
        let mut range = Range::new((0, 0), (20, 1));
        range.set_value((15, 0), Data::String("X001".to_string()));
        range.set_value((15, 1), Data::String("進風機1".to_string()));
        let mut report = ReportExtract::default();

        let l_rows = extract_section(&range, &LAYOUT_SECTION_Y, &mut report);
        assert!(l_rows.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("F/G"));

        let l_rows = extract_section(&Range::empty(), &LAYOUT_SECTION_X, &mut report);
        assert!(l_rows.is_empty());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_extract_section_numeric_cells_are_text() {
        let mut range = Range::new((0, 0), (16, 6));
        range.set_value((15, 0), Data::String("X010".to_string()));
        range.set_value((15, 1), Data::Int(42));
        let mut report = ReportExtract::default();

        let l_rows = extract_section(&range, &LAYOUT_SECTION_X, &mut report);
        assert_eq!(l_rows, vec![SpecPointRow::new("X010", "42")]);
    }

    #[test]
    fn test_read_point_sections_from_workbook_file() {
        let tmp = TestDir::new();
        let path_file_in = tmp.path().join("A.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("IO").expect("sheet name");
        worksheet.write_string(0, 0, "I/O LIST").expect("title");
        worksheet.write_string(15, 0, "X001").expect("cell");
        worksheet.write_string(15, 1, "A16進風機1運轉訊號").expect("cell");
        worksheet.write_string(16, 0, "X002").expect("cell");
        worksheet.write_string(16, 1, "進氣機2故障訊號").expect("cell");
        worksheet.write_string(15, 5, "Y001").expect("cell");
        worksheet.write_string(15, 6, "C1電動風門5").expect("cell");
        workbook.save(&path_file_in).expect("save workbook");

        let (sections, report) =
            read_point_sections(&path_file_in, &EnumSheetSelector::default()).expect("read");
        assert_eq!(sections.rows_x.len(), 2);
        assert_eq!(sections.rows_x[1], SpecPointRow::new("X002", "進氣機2故障訊號"));
        assert_eq!(sections.rows_y, vec![SpecPointRow::new("Y001", "C1電動風門5")]);
        assert_eq!(report.cnt_kept_x, 2);
        assert_eq!(report.cnt_kept_y, 1);

        let (sections_by_name, _) = read_point_sections(
            &path_file_in,
            &EnumSheetSelector::Name("IO".to_string()),
        )
        .expect("read by name");
        assert_eq!(sections_by_name, sections);
    }

    #[test]
    fn test_read_point_sections_unknown_sheet() {
        let tmp = TestDir::new();
        let path_file_in = tmp.path().join("A.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path_file_in).expect("save workbook");

        let err = read_point_sections(&path_file_in, &EnumSheetSelector::Index(3))
            .expect_err("missing index");
        assert!(matches!(err, XyrefXlsxError::SheetNotFound(_)));

        let err = read_point_sections(
            &path_file_in,
            &EnumSheetSelector::Name("nope".to_string()),
        )
        .expect_err("missing name");
        assert!(matches!(err, XyrefXlsxError::SheetNotFound(_)));
    }

    #[test]
    fn test_read_point_sections_missing_file() {
        let tmp = TestDir::new();
        let err = read_point_sections(&tmp.path().join("absent.xlsx"), &EnumSheetSelector::default())
            .expect_err("missing file");
        assert!(matches!(err, XyrefXlsxError::WorkbookOpenFailed { .. }));
    }
}
