//! X/Y tag formatters.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{PATTERN_Y_PASSTHROUGH, TXT_DOOR_LABEL};
use crate::parse::{parse_label, sanitize_tag};
use crate::spec::{EnumDeviceCategory, EnumSection, SpecOutputRecord, SpecPointRow};

static RE_Y_PASSTHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_Y_PASSTHROUGH).expect("Y pass-through pattern"));

////////////////////////////////////////////////////////////////////////////////
// #region Formatters

/// Convert an X-section (discrete input) label into its canonical tag.
///
/// Shape: `[<area>_]<code><no>[_<suffix>]`, e.g. `A16_IN_M1_STAT`.
/// Labels without a known device fall back to [`sanitize_tag`].
/// A missing label converts to an empty string.
pub fn convert_x_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };
    let s = name.trim();

    let parsed = parse_label(s);
    let Some(category) = parsed.device_category else {
        return sanitize_tag(s);
    };

    let mut base = format!("{}{}", category.tag_code(), parsed.instance_number);
    if let Some(area) = &parsed.area {
        base = format!("{area}_{base}");
    }
    if let Some(kind) = parsed.signal_kind {
        base = format!("{base}_{}", kind.suffix_code());
    }
    base
}

/// Convert a Y-section (output/actuator) label into its canonical tag.
///
/// `CO-<n>` codes and labels without a known device pass through trimmed
/// but otherwise untouched. Motors render as `[<area> ]<Label><no>` (space
/// separator), doors as `[<area>_]DOOR<no>`.
pub fn convert_y_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };
    let s = name.trim();

    if RE_Y_PASSTHROUGH.is_match(s) {
        return s.to_string();
    }

    let parsed = parse_label(s);
    let Some(category) = parsed.device_category else {
        return s.to_string();
    };
    let device_no = &parsed.instance_number;

    match category {
        EnumDeviceCategory::InMotor | EnumDeviceCategory::OutMotor | EnumDeviceCategory::Motor => {
            let label = category.motor_label().unwrap_or_default();
            match &parsed.area {
                Some(area) => format!("{area} {label}{device_no}"),
                None => format!("{label}{device_no}"),
            }
        }
        EnumDeviceCategory::Door => match &parsed.area {
            Some(area) => format!("{area}_{TXT_DOOR_LABEL}{device_no}"),
            None => format!("{TXT_DOOR_LABEL}{device_no}"),
        },
    }
}

/// Dispatch to the formatter of `section`.
pub fn convert_name(section: EnumSection, name: Option<&str>) -> String {
    match section {
        EnumSection::X => convert_x_name(name),
        EnumSection::Y => convert_y_name(name),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Sections

/// Convert one section's rows, preserving input order.
pub fn convert_rows(section: EnumSection, rows: &[SpecPointRow]) -> Vec<SpecOutputRecord> {
    rows.iter()
        .map(|row| SpecOutputRecord {
            reference: row.code.clone(),
            comment: convert_name(section, row.label.as_deref()),
            description: String::new(),
        })
        .collect()
}

/// Convert both sections; all X records precede all Y records.
pub fn convert_sections(
    rows_x: &[SpecPointRow],
    rows_y: &[SpecPointRow],
) -> Vec<SpecOutputRecord> {
    let mut l_records = convert_rows(EnumSection::X, rows_x);
    l_records.extend(convert_rows(EnumSection::Y, rows_y));
    l_records
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
