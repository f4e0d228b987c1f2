//! Reference table writer: `DataFrame` in, workbook out.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use polars::prelude::{AnyValue, Column, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{debug, warn};
use xyref_name::SpecOutputRecord;

use crate::conf::{
    COLNAMES_OUTPUT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NROWS_EXCEL_MAX,
    TXT_FALLBACK_TIMESTAMP_FORMAT, derive_default_xlsx_formats,
};
use crate::spec::{
    SpecAutofitCellsPolicy, SpecCellFormat, SpecXlsxReport, SpecXlsxSheetWriteOptions,
    XyrefXlsxError,
};
use crate::util::{
    cast_col_num, cast_row_num, derive_alternate_output_path, estimate_unicode_string_width,
    is_write_conflict, sanitize_sheet_name,
};

/// Collect output records into a `REF`/`COMMENT`/`DESCRIPTION` string table.
pub fn derive_dataframe_from_records(
    records: &[SpecOutputRecord],
) -> Result<DataFrame, XyrefXlsxError> {
    let l_reference: Vec<String> = records.iter().map(|rec| rec.reference.clone()).collect();
    let l_comment: Vec<String> = records.iter().map(|rec| rec.comment.clone()).collect();
    let l_description: Vec<String> = records.iter().map(|rec| rec.description.clone()).collect();

    DataFrame::new(vec![
        Column::new(COLNAMES_OUTPUT[0].into(), l_reference),
        Column::new(COLNAMES_OUTPUT[1].into(), l_comment),
        Column::new(COLNAMES_OUTPUT[2].into(), l_description),
    ])
    .map_err(|err| XyrefXlsxError::TableBuildFailed(err.to_string()))
}

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_header: SpecCellFormat,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    path_file_written: Option<PathBuf>,
}

impl XlsxWriter {
    /// Create writer bound to output path and format presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, fmt_text: SpecCellFormat, fmt_header: SpecCellFormat) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text,
            fmt_header,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            path_file_written: None,
        }
    }

    /// Create writer using [`derive_default_xlsx_formats`].
    pub fn with_default_formats(path_file_out: PathBuf) -> Self {
        let dict_fmt = derive_default_xlsx_formats();
        Self::new(
            path_file_out,
            dict_fmt.get("text").cloned().unwrap_or_default(),
            dict_fmt.get("header").cloned().unwrap_or_default(),
        )
    }

    /// Return requested output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk and return the path actually written. Idempotent.
    ///
    /// When the requested path is locked (permission denied / busy), the
    /// workbook goes to `<stem>_<YYYYmmdd_HHMMSS><ext>` instead.
    pub fn close(&mut self) -> Result<PathBuf, XyrefXlsxError> {
        if let Some(path_written) = &self.path_file_written {
            return Ok(path_written.clone());
        }

        let v_buffer = self
            .workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error)?;

        let path_written = write_bytes_with_fallback(
            &self.path_file_out,
            &v_buffer,
            |path, bytes| fs::write(path, bytes),
            || Local::now().format(TXT_FALLBACK_TIMESTAMP_FORMAT).to_string(),
        )?;

        self.path_file_written = Some(path_written.clone());
        Ok(path_written)
    }

    /// Write one sheet from an in-memory string table.
    pub fn write_sheet_from_dataframe(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<(), XyrefXlsxError> {
        if self.path_file_written.is_some() {
            return Err(XyrefXlsxError::WriterClosed);
        }
        self.write_sheet(df_data, sheet_name, options)
    }

    fn write_sheet(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<(), XyrefXlsxError> {
        let n_height_df = df_data.height();
        if n_height_df >= N_NROWS_EXCEL_MAX {
            return Err(XyrefXlsxError::TooManyRows(n_height_df));
        }

        let l_colnames: Vec<String> = df_data
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();

        let sheet_name_unique = self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        let mut report = SpecXlsxReport {
            sheet_name: sheet_name_unique.clone(),
            n_rows: n_height_df,
            warnings: vec![],
        };
        if sheet_name_unique != sheet_name {
            report.warn(format!(
                "Sheet name {sheet_name:?} written as {sheet_name_unique:?}."
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);
        let fmt_text = derive_rust_xlsx_format(&self.fmt_text);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error)?;

        let mut l_width_by_col = vec![0usize; l_colnames.len()];
        for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
            write_text_cell(worksheet, 0, n_idx_col, c_name, &fmt_header)?;
            l_width_by_col[n_idx_col] = estimate_unicode_string_width(c_name);
        }

        for (n_idx_col, col) in df_data.get_columns().iter().enumerate() {
            for n_row in 0..n_height_df {
                let value = col.get(n_row).map_err(|err| {
                    XyrefXlsxError::TableBuildFailed(format!("Failed to access cell value: {err}"))
                })?;
                let c_value = derive_text_from_any_value(value);
                l_width_by_col[n_idx_col] = usize::max(
                    l_width_by_col[n_idx_col],
                    estimate_unicode_string_width(&c_value),
                );
                write_text_cell(worksheet, n_row + 1, n_idx_col, &c_value, &fmt_text)?;
            }
        }

        if options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0).map_err(derive_xlsx_error)?;
        }

        if options.policy_autofit.if_enabled {
            apply_column_widths(worksheet, &l_width_by_col, &options.policy_autofit)?;
        }

        debug!(
            "wrote sheet {:?}: {} rows x {} cols",
            report.sheet_name,
            n_height_df,
            l_colnames.len()
        );
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn apply_column_widths(
    worksheet: &mut Worksheet,
    l_width_by_col: &[usize],
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Result<(), XyrefXlsxError> {
    let n_min = usize::max(1, policy_autofit.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy_autofit.width_cell_max));

    for (n_idx_col, n_width_recorded) in l_width_by_col.iter().enumerate() {
        let n_width_final = usize::min(
            n_max,
            usize::max(n_min, n_width_recorded + policy_autofit.width_cell_padding),
        );
        worksheet
            .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn derive_text_from_any_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(val) => val.to_string(),
        AnyValue::StringOwned(val) => val.to_string(),
        _ => value.to_string(),
    }
}

fn write_text_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &str,
    format: &Format,
) -> Result<(), XyrefXlsxError> {
    if value.is_empty() {
        worksheet
            .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
            .map_err(derive_xlsx_error)?;
    } else {
        worksheet
            .write_string_with_format(cast_row_num(row_idx)?, cast_col_num(col_idx)?, value, format)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

/// Write `bytes` to `path_file_out`; on a write conflict, retry once at the
/// timestamped alternate path. Returns the path actually written.
fn write_bytes_with_fallback<W, T>(
    path_file_out: &Path,
    bytes: &[u8],
    mut write_fn: W,
    derive_timestamp: T,
) -> Result<PathBuf, XyrefXlsxError>
where
    W: FnMut(&Path, &[u8]) -> io::Result<()>,
    T: FnOnce() -> String,
{
    match write_fn(path_file_out, bytes) {
        Ok(()) => Ok(path_file_out.to_path_buf()),
        Err(err) if is_write_conflict(&err) => {
            let path_alt = derive_alternate_output_path(path_file_out, &derive_timestamp());
            warn!(
                "{} is in use. Writing to {} instead.",
                path_file_out.display(),
                path_alt.display()
            );
            write_fn(&path_alt, bytes).map_err(|err| derive_output_error(&path_alt, err))?;
            Ok(path_alt)
        }
        Err(err) => Err(derive_output_error(path_file_out, err)),
    }
}

fn derive_xlsx_error(err: XlsxError) -> XyrefXlsxError {
    XyrefXlsxError::XlsxWriteFailed(err.to_string())
}

fn derive_output_error(path: &Path, err: io::Error) -> XyrefXlsxError {
    XyrefXlsxError::OutputWriteFailed {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
