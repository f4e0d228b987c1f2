//! Lexicon tables and pattern constants.

use crate::spec::{EnumDeviceCategory, EnumSignalKind};

/// Ordered `(phrase, value)` lexicon. Declaration order is the tie-break.
pub type TypeLexicon<T> = [(&'static str, T)];

/// Device-name phrases, matched by substring containment in this order.
pub const LEXICON_DEVICE: &TypeLexicon<EnumDeviceCategory> = &[
    ("進風機", EnumDeviceCategory::InMotor),
    ("進氣機", EnumDeviceCategory::InMotor),
    ("排風機", EnumDeviceCategory::OutMotor),
    ("排氣機", EnumDeviceCategory::OutMotor),
    ("噴流風機", EnumDeviceCategory::Motor),
    ("電動風門", EnumDeviceCategory::Door),
];

/// Signal-description phrases for X-section labels.
pub const LEXICON_SIGNAL_KIND: &TypeLexicon<EnumSignalKind> = &[
    ("運轉訊號", EnumSignalKind::Status),
    ("故障訊號", EnumSignalKind::Alarm),
];

/// Area prefix: letters then digits, anchored at label start.
pub const PATTERN_AREA_PREFIX: &str = r"^[A-Za-z]+\d+";
/// Instance number: first run of digits.
pub const PATTERN_INSTANCE_NUMBER: &str = r"\d+";
/// Characters removed by the X-section fallback.
pub const PATTERN_TAG_ILLEGAL: &str = r"[^\w\-]";
/// Y-section pass-through codes (full match).
pub const PATTERN_Y_PASSTHROUGH: &str = r"^CO-\d+$";

/// Door tag stem used by the Y-section formatter.
pub const TXT_DOOR_LABEL: &str = "DOOR";
