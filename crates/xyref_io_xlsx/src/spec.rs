//! Shared I/O specification models, reports and errors.

use std::fmt;
use std::path::PathBuf;

use xyref_name::{EnumSection, SpecPointRow};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReadSpecification

/// Worksheet selector for the input workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumSheetSelector {
    /// Zero-based sheet position.
    Index(usize),
    /// Sheet name.
    Name(String),
}

impl Default for EnumSheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl EnumSheetSelector {
    /// Interpret a command-line value: all ASCII digits means index.
    pub fn from_arg(value: &str) -> Self {
        if !value.is_empty()
            && value.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n_idx) = value.parse::<usize>()
        {
            return Self::Index(n_idx);
        }
        Self::Name(value.to_string())
    }
}

impl fmt::Display for EnumSheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n_idx) => write!(f, "#{n_idx}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Fixed cell region of one point-list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecSectionLayout {
    /// Section this region feeds.
    pub section: EnumSection,
    /// First data row (0-based, absolute).
    pub row_start: u32,
    /// Code column (0-based, absolute).
    pub col_code: u32,
    /// Label column (0-based, absolute).
    pub col_label: u32,
}

/// Filtered rows of both sections, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecPointSections {
    /// X-section rows.
    pub rows_x: Vec<SpecPointRow>,
    /// Y-section rows.
    pub rows_y: Vec<SpecPointRow>,
}

/// Counters and notes for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportExtract {
    /// Rows inspected across both sections.
    pub cnt_scanned: u64,
    /// Rows kept in the X section.
    pub cnt_kept_x: u64,
    /// Rows kept in the Y section.
    pub cnt_kept_y: u64,
    /// Rows dropped for a null/blank label.
    pub cnt_skipped_blank: u64,
    /// Rows dropped because the code did not match the section pattern.
    pub cnt_skipped_code: u64,
    /// Non-fatal notes (e.g. missing columns).
    pub warnings: Vec<String>,
}

impl ReportExtract {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Count one kept row for `section`.
    pub fn add_kept(&mut self, section: EnumSection) {
        match section {
            EnumSection::X => self.cnt_kept_x += 1,
            EnumSection::Y => self.cnt_kept_y += 1,
        }
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} kept_x={} kept_y={} skipped_blank={} skipped_code={} warnings={}",
            self.cnt_scanned,
            self.cnt_kept_x,
            self.cnt_kept_y,
            self.cnt_skipped_blank,
            self.cnt_skipped_code,
            self.warnings.len()
        )
    }
}

impl fmt::Display for ReportExtract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[EXTRACT]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit policy for per-sheet write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Infer widths from header and body cells.
    pub if_enabled: bool,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            if_enabled: true,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Per-sheet call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxSheetWriteOptions {
    /// Freeze the header row.
    pub if_freeze_header: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecXlsxSheetWriteOptions {
    fn default() -> Self {
        Self {
            if_freeze_header: true,
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual (unique, sanitized) sheet name.
    pub sheet_name: String,
    /// Body rows written.
    pub n_rows: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook read/write failures.
#[derive(Debug)]
pub enum XyrefXlsxError {
    /// Input workbook could not be opened.
    WorkbookOpenFailed {
        /// Input path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Requested sheet does not exist.
    SheetNotFound(EnumSheetSelector),
    /// Sheet exists but could not be read.
    SheetReadFailed {
        /// Selected sheet.
        sheet: EnumSheetSelector,
        /// Underlying error text.
        message: String,
    },
    /// Output table could not be built.
    TableBuildFailed(String),
    /// Output does not fit into one worksheet.
    TooManyRows(usize),
    /// Workbook serialization or sheet write failed.
    XlsxWriteFailed(String),
    /// Writer used after `close()`.
    WriterClosed,
    /// Output file could not be written.
    OutputWriteFailed {
        /// Output path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for XyrefXlsxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkbookOpenFailed { path, message } => {
                write!(f, "Failed to open workbook {}: {message}", path.display())
            }
            Self::SheetNotFound(sheet) => write!(f, "Sheet not found: {sheet}"),
            Self::SheetReadFailed { sheet, message } => {
                write!(f, "Failed to read sheet {sheet}: {message}")
            }
            Self::TableBuildFailed(msg) => write!(f, "Failed to build output table: {msg}"),
            Self::TooManyRows(n_rows) => write!(
                f,
                "Output has {n_rows} rows; a worksheet holds at most {} data rows.",
                crate::conf::N_NROWS_EXCEL_MAX - 1
            ),
            Self::XlsxWriteFailed(msg) => write!(f, "xlsx write error: {msg}"),
            Self::WriterClosed => write!(f, "Cannot write after close()."),
            Self::OutputWriteFailed { path, message } => {
                write!(f, "Failed to write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for XyrefXlsxError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_selector_from_arg() {
        assert_eq!(EnumSheetSelector::from_arg("0"), EnumSheetSelector::Index(0));
        assert_eq!(EnumSheetSelector::from_arg("12"), EnumSheetSelector::Index(12));
        assert_eq!(
            EnumSheetSelector::from_arg("IO List"),
            EnumSheetSelector::Name("IO List".to_string())
        );
        assert_eq!(
            EnumSheetSelector::from_arg("-1"),
            EnumSheetSelector::Name("-1".to_string())
        );
        assert_eq!(
            EnumSheetSelector::from_arg(""),
            EnumSheetSelector::Name(String::new())
        );
        assert_eq!(EnumSheetSelector::default(), EnumSheetSelector::Index(0));
    }

    #[test]
    fn test_report_extract_format_and_display() {
        let mut report = ReportExtract {
            cnt_scanned: 10,
            cnt_skipped_blank: 3,
            cnt_skipped_code: 2,
            ..Default::default()
        };
        report.add_kept(EnumSection::X);
        report.add_kept(EnumSection::X);
        report.add_kept(EnumSection::Y);
        report.warn("columns F/G not found");

        let txt = report.format("[EXTRACT]");
        assert_eq!(
            txt,
            "[EXTRACT] scanned=10 kept_x=2 kept_y=1 skipped_blank=3 skipped_code=2 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn test_cell_format_merge_prefers_right_side() {
        let fmt_base = SpecCellFormat {
            font_size: Some(11),
            bold: Some(false),
            ..Default::default()
        };
        let fmt = fmt_base.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            ..Default::default()
        });
        assert_eq!(fmt.font_size, Some(11));
        assert_eq!(fmt.bold, Some(true));
        assert_eq!(fmt.align.as_deref(), Some("center"));
    }
}
