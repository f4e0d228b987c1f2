//! Layout constants and default preset factories.

use std::collections::BTreeMap;

use xyref_name::EnumSection;

use crate::spec::{SpecCellFormat, SpecSectionLayout};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// First data row of both sections (0-based; spreadsheet row 16).
pub const N_ROW_DATA_START: u32 = 15;

/// X-section codes (full match after trimming).
pub const PATTERN_CODE_X: &str = r"^[Xx]\d+$";
/// Y-section codes (full match after trimming).
pub const PATTERN_CODE_Y: &str = r"^[Yy]\d+$";

/// X section: codes in column A, labels in column B.
pub const LAYOUT_SECTION_X: SpecSectionLayout = SpecSectionLayout {
    section: EnumSection::X,
    row_start: N_ROW_DATA_START,
    col_code: 0,
    col_label: 1,
};

/// Y section: codes in column F, labels in column G.
pub const LAYOUT_SECTION_Y: SpecSectionLayout = SpecSectionLayout {
    section: EnumSection::Y,
    row_start: N_ROW_DATA_START,
    col_code: 5,
    col_label: 6,
};

/// Output table header.
pub const COLNAMES_OUTPUT: [&str; 3] = ["REF", "COMMENT", "DESCRIPTION"];

/// Default output sheet name.
pub const TXT_SHEET_NAME_DEFAULT: &str = "Sheet1";

/// Timestamp appended to the output stem when the target is locked.
pub const TXT_FALLBACK_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Build default named format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_size: Some(11),
        valign: Some("vcenter".to_string()),
        num_format: Some("@".to_string()),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert("text".to_string(), cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        "header".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            border: Some(1),
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}
