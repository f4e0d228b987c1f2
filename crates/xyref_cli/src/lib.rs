//! `xyref` command-line front end.
//!
//! Reads the X/Y sections of an I/O point-list workbook, normalizes every
//! label through `xyref_name`, and writes the `REF`/`COMMENT`/`DESCRIPTION`
//! reference table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use xyref_io_xlsx::{
    EnumSheetSelector, ReportExtract, SpecXlsxSheetWriteOptions, TXT_SHEET_NAME_DEFAULT,
    XlsxWriter, derive_dataframe_from_records, read_point_sections,
};
use xyref_name::convert_sections;

/// Convert an X/Y I/O point list into an English reference table.
#[derive(Parser, Debug, Clone)]
#[command(name = "xyref")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Input workbook (xlsx/xlsm/xls/ods)
    #[arg(short, long, default_value = "A.xlsx")]
    pub input: PathBuf,

    /// Output workbook
    #[arg(short, long, default_value = "T.xlsx")]
    pub output: PathBuf,

    /// Input sheet name or zero-based index (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Output sheet name
    #[arg(long, default_value = TXT_SHEET_NAME_DEFAULT)]
    pub output_sheet: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Input sheet selector derived from `--sheet`.
    pub fn sheet_selector(&self) -> EnumSheetSelector {
        self.sheet
            .as_deref()
            .map(EnumSheetSelector::from_arg)
            .unwrap_or_default()
    }

    /// Default log directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Outcome of one conversion run.
#[derive(Debug, Clone)]
pub struct ReportRun {
    /// Path the table was actually written to.
    pub path_written: PathBuf,
    /// Records written (X then Y).
    pub n_records: usize,
    /// Extraction counters and notes.
    pub report_extract: ReportExtract,
}

/// Run the whole pipeline for parsed arguments.
pub fn run(cli: &Cli) -> Result<ReportRun> {
    let sheet = cli.sheet_selector();
    info!("reading {} (sheet {sheet})", cli.input.display());

    let (sections, report_extract) = read_point_sections(&cli.input, &sheet)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let l_records = convert_sections(&sections.rows_x, &sections.rows_y);
    for rec in &l_records {
        debug!("{} -> {}", rec.reference, rec.comment);
    }

    let df = derive_dataframe_from_records(&l_records).context("building output table")?;
    let mut writer = XlsxWriter::with_default_formats(cli.output.clone());
    writer
        .write_sheet_from_dataframe(&df, &cli.output_sheet, &SpecXlsxSheetWriteOptions::default())
        .with_context(|| format!("writing sheet {:?}", cli.output_sheet))?;
    let path_written = writer
        .close()
        .with_context(|| format!("saving {}", writer.file_out()))?;

    info!(
        "wrote {} records ({} X, {} Y) to {}",
        l_records.len(),
        sections.rows_x.len(),
        sections.rows_y.len(),
        path_written.display()
    );

    Ok(ReportRun {
        path_written,
        n_records: l_records.len(),
        report_extract,
    })
}
