use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use calamine::{Data, Reader, Xlsx, open_workbook};
use clap::Parser;
use rust_xlsxwriter::Workbook;
use xyref_cli::{Cli, run};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("xyref_pipeline_{tag}_{n}"));
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

fn write_point_list(path: &Path, with_y: bool) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "I/O 點表").expect("title");

    let l_x = [
        ("X001", "A16進風機1運轉訊號"),
        ("X002", "進氣機2故障訊號"),
        ("X003", ""),
        ("備註", "不是點位"),
        ("X004", "PB-01 (spare)"),
    ];
    for (n_off, (code, label)) in l_x.iter().enumerate() {
        let n_row = 15 + n_off as u32;
        worksheet.write_string(n_row, 0, *code).expect("code");
        if !label.is_empty() {
            worksheet.write_string(n_row, 1, *label).expect("label");
        }
    }

    if with_y {
        let l_y = [
            ("Y001", "CO-07"),
            ("Y002", "B2排風機3"),
            ("Y003", "電動風門5"),
            ("Y004", "C1電動風門5"),
            ("Y005", "照明 回路/3"),
        ];
        for (n_off, (code, label)) in l_y.iter().enumerate() {
            let n_row = 15 + n_off as u32;
            worksheet.write_string(n_row, 5, *code).expect("code");
            worksheet.write_string(n_row, 6, *label).expect("label");
        }
    }

    workbook.save(path).expect("save input");
}

fn read_table(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open output");
    let range = workbook.worksheet_range("Sheet1").expect("Sheet1");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    _ => cell.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn converts_both_sections_x_before_y() {
    let tmp = TestDir::new("xy");
    let path_in = tmp.path().join("A.xlsx");
    let path_out = tmp.path().join("T.xlsx");
    write_point_list(&path_in, true);

    let cli = Cli::parse_from([
        "xyref",
        "-i",
        path_in.to_str().expect("utf8 path"),
        "-o",
        path_out.to_str().expect("utf8 path"),
    ]);
    let report = run(&cli).expect("run");
    assert_eq!(report.path_written, path_out);
    assert_eq!(report.n_records, 8);
    assert_eq!(report.report_extract.cnt_kept_x, 3);
    assert_eq!(report.report_extract.cnt_kept_y, 5);
    assert!(report.report_extract.warnings.is_empty());

    let l_rows = read_table(&path_out);
    let l_pairs: Vec<(String, String)> = l_rows
        .iter()
        .map(|row| (row[0].clone(), row.get(1).cloned().unwrap_or_default()))
        .collect();
    let l_expected = [
        ("REF", "COMMENT"),
        ("X001", "A16_IN_M1_STAT"),
        ("X002", "IN_M2_ALM"),
        ("X004", "PB-01spare"),
        ("Y001", "CO-07"),
        ("Y002", "B2 Out Motor3"),
        ("Y003", "DOOR5"),
        ("Y004", "C1_DOOR5"),
        ("Y005", "照明 回路/3"),
    ];
    assert_eq!(
        l_pairs,
        l_expected
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect::<Vec<_>>()
    );
    assert_eq!(l_rows[0][2], "DESCRIPTION");
}

#[test]
fn missing_y_columns_only_writes_x_section() {
    let tmp = TestDir::new("x_only");
    let path_in = tmp.path().join("A.xlsx");
    let path_out = tmp.path().join("T.xlsx");
    write_point_list(&path_in, false);

    let cli = Cli::parse_from([
        "xyref",
        "--input",
        path_in.to_str().expect("utf8 path"),
        "--output",
        path_out.to_str().expect("utf8 path"),
        "--sheet",
        "0",
    ]);
    let report = run(&cli).expect("run");
    assert_eq!(report.n_records, 3);
    assert_eq!(report.report_extract.warnings.len(), 1);

    let l_rows = read_table(&path_out);
    assert_eq!(l_rows.len(), 4);
    assert!(l_rows.iter().skip(1).all(|row| row[0].starts_with('X')));
}

#[test]
fn unreadable_input_is_an_error() {
    let tmp = TestDir::new("err");
    let cli = Cli::parse_from([
        "xyref",
        "-i",
        tmp.path().join("absent.xlsx").to_str().expect("utf8 path"),
        "-o",
        tmp.path().join("T.xlsx").to_str().expect("utf8 path"),
    ]);
    let err = run(&cli).expect_err("missing input");
    assert!(format!("{err:#}").contains("absent.xlsx"));
    assert!(!tmp.path().join("T.xlsx").exists());
}
