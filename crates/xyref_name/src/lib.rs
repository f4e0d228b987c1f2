//! `xyref_name` v1:
//! Name-normalization engine for X/Y I/O point labels.
//!
//! Module layout:
//! - `conf`    : lexicons and pattern constants
//! - `spec`    : categories, parsed labels, output records
//! - `parse`   : label parser (area prefix, device, instance, signal kind)
//! - `convert` : X/Y tag formatters and section conversion
pub mod conf;
pub mod convert;
pub mod parse;
pub mod spec;

pub use conf::{LEXICON_DEVICE, LEXICON_SIGNAL_KIND, TypeLexicon};
pub use convert::{
    convert_name, convert_rows, convert_sections, convert_x_name, convert_y_name,
};
pub use parse::{
    extract_area_prefix, extract_device_and_no, extract_signal_kind, parse_label, sanitize_tag,
};
pub use spec::{
    EnumDeviceCategory, EnumSection, EnumSignalKind, SpecOutputRecord, SpecParsedLabel,
    SpecPointRow,
};
