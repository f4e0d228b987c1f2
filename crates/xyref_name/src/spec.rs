//! Label and record models.

use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// #region Enums

/// Equipment classes recognized by the device lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumDeviceCategory {
    /// Supply/inbound fan.
    InMotor,
    /// Exhaust/outbound fan.
    OutMotor,
    /// Jet fan.
    Motor,
    /// Motorized damper.
    Door,
}

impl EnumDeviceCategory {
    /// Short tag code used in X-section comments.
    pub fn tag_code(self) -> &'static str {
        match self {
            Self::InMotor => "IN_M",
            Self::OutMotor => "OUT_M",
            Self::Motor => "M",
            Self::Door => "D",
        }
    }

    /// Display label for motor categories in Y-section comments.
    ///
    /// `None` for [`EnumDeviceCategory::Door`], which has its own stem.
    pub fn motor_label(self) -> Option<&'static str> {
        match self {
            Self::InMotor => Some("In Motor"),
            Self::OutMotor => Some("Out Motor"),
            Self::Motor => Some("Motor"),
            Self::Door => None,
        }
    }
}

/// Signal classification for X-section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSignalKind {
    /// Running/status feedback.
    Status,
    /// Fault/alarm feedback.
    Alarm,
}

impl EnumSignalKind {
    /// Suffix code appended to X-section comments.
    pub fn suffix_code(self) -> &'static str {
        match self {
            Self::Status => "STAT",
            Self::Alarm => "ALM",
        }
    }
}

/// Point-list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSection {
    /// Discrete inputs.
    X,
    /// Discrete outputs/actuators.
    Y,
}

impl fmt::Display for EnumSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Structs

/// Tokens extracted from one raw label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecParsedLabel {
    /// Leading area code, e.g. `A16`.
    pub area: Option<String>,
    /// First matching device category.
    pub device_category: Option<EnumDeviceCategory>,
    /// Digits after the device phrase; empty when absent.
    pub instance_number: String,
    /// First matching signal kind.
    pub signal_kind: Option<EnumSignalKind>,
}

/// One `(code, label)` pair supplied by the table extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPointRow {
    /// Point code, e.g. `X001`.
    pub code: String,
    /// Raw label text.
    pub label: Option<String>,
}

impl SpecPointRow {
    /// Build a row with a present label.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: Some(label.into()),
        }
    }
}

/// One row of the output reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutputRecord {
    /// Original point code.
    pub reference: String,
    /// Canonical English tag.
    pub comment: String,
    /// Reserved; always empty.
    pub description: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
