//! `xyref_io_xlsx` v1:
//! Workbook I/O around the `xyref_name` engine.
//!
//! Module layout:
//! - `conf`   : layout constants and default presets
//! - `spec`   : specs/options/reports/errors
//! - `util`   : pure helper functions
//! - `reader` : X/Y section extraction from the input workbook
//! - `writer` : reference table writer
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    COLNAMES_OUTPUT, LAYOUT_SECTION_X, LAYOUT_SECTION_Y, N_LEN_EXCEL_SHEET_NAME_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, TXT_SHEET_NAME_DEFAULT,
};
pub use reader::{extract_section, read_point_sections};
pub use spec::{
    EnumSheetSelector, ReportExtract, SpecAutofitCellsPolicy, SpecCellFormat, SpecPointSections,
    SpecSectionLayout, SpecXlsxReport, SpecXlsxSheetWriteOptions, XyrefXlsxError,
};
pub use util::{derive_alternate_output_path, sanitize_sheet_name};
pub use writer::{XlsxWriter, derive_dataframe_from_records};
