//! Stateless helper utilities shared by the reader and writer.

use std::io;
use std::path::{Path, PathBuf};

use calamine::Data;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::XyrefXlsxError;

////////////////////////////////////////////////////////////////////////////////
// #region CellText

/// Render one input cell as text; `Empty` is null.
pub fn derive_cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(val) => Some(val.clone()),
        _ => Some(cell.to_string()),
    }
}

/// Estimated display width; non-ASCII (CJK) glyphs count as ~1.6 columns.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNaming

/// Replace illegal characters and truncate to the Excel name limit.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputPath

/// `<stem>_<timestamp><ext>` next to `path_file_out`.
pub fn derive_alternate_output_path(path_file_out: &Path, timestamp: &str) -> PathBuf {
    let c_stem = path_file_out
        .file_stem()
        .map(|val| val.to_string_lossy().to_string())
        .unwrap_or_default();
    let c_name = match path_file_out.extension() {
        Some(ext) => format!("{c_stem}_{timestamp}.{}", ext.to_string_lossy()),
        None => format!("{c_stem}_{timestamp}"),
    };
    path_file_out.with_file_name(c_name)
}

/// Windows `ERROR_SHARING_VIOLATION` / `ERROR_LOCK_VIOLATION`: the file is
/// open in another process (e.g. Excel).
#[cfg(windows)]
const TUP_WIN_LOCK_OS_ERRORS: [i32; 2] = [32, 33];

/// Whether an output write failed because the target is locked or protected.
pub fn is_write_conflict(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::ResourceBusy
    ) {
        return true;
    }
    #[cfg(windows)]
    if let Some(code) = err.raw_os_error()
        && TUP_WIN_LOCK_OS_ERRORS.contains(&code)
    {
        return true;
    }
    false
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XyrefXlsxError> {
    u32::try_from(value).map_err(|_| XyrefXlsxError::TooManyRows(value))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XyrefXlsxError> {
    u16::try_from(value)
        .map_err(|_| XyrefXlsxError::XlsxWriteFailed(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
