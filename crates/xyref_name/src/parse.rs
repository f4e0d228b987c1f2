//! Label parser: area prefix, device category, instance number, signal kind.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{
    LEXICON_DEVICE, LEXICON_SIGNAL_KIND, PATTERN_AREA_PREFIX, PATTERN_INSTANCE_NUMBER,
    PATTERN_TAG_ILLEGAL, TypeLexicon,
};
use crate::spec::{EnumDeviceCategory, EnumSignalKind, SpecParsedLabel};

static RE_AREA_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_AREA_PREFIX).expect("area prefix pattern"));
static RE_INSTANCE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_INSTANCE_NUMBER).expect("instance number pattern"));
static RE_TAG_ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN_TAG_ILLEGAL).expect("tag illegal pattern"));

////////////////////////////////////////////////////////////////////////////////
// #region LexiconLookup

/// First lexicon entry (declared order) whose phrase occurs in `text`.
///
/// Returns the mapped value and the byte offset just past the phrase.
fn _find_first_phrase<T: Copy>(text: &str, lexicon: &TypeLexicon<T>) -> Option<(T, usize)> {
    lexicon.iter().find_map(|(phrase, value)| {
        text.find(*phrase)
            .map(|idx_start| (*value, idx_start + phrase.len()))
    })
}

/// Extract the leading area code (`[A-Za-z]+\d+`), if any.
pub fn extract_area_prefix(text: &str) -> Option<&str> {
    RE_AREA_PREFIX.find(text).map(|m| m.as_str())
}

/// Look up the device category and the instance number that follows it.
///
/// The instance number is the first digit run after the matched phrase and
/// is empty when there is none. No match yields `(None, "")`.
pub fn extract_device_and_no(
    text: &str,
    lexicon: &TypeLexicon<EnumDeviceCategory>,
) -> (Option<EnumDeviceCategory>, String) {
    let Some((category, idx_after)) = _find_first_phrase(text, lexicon) else {
        return (None, String::new());
    };
    let device_no = RE_INSTANCE_NUMBER
        .find(&text[idx_after..])
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    (Some(category), device_no)
}

/// Look up the first signal-kind phrase contained in `text`.
pub fn extract_signal_kind(
    text: &str,
    lexicon: &TypeLexicon<EnumSignalKind>,
) -> Option<EnumSignalKind> {
    _find_first_phrase(text, lexicon).map(|(kind, _)| kind)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Parse

/// Parse a raw label against the default lexicons.
///
/// `text` is trimmed first. Every field is optional; this never fails.
pub fn parse_label(text: &str) -> SpecParsedLabel {
    let s = text.trim();
    let (device_category, instance_number) = extract_device_and_no(s, LEXICON_DEVICE);
    SpecParsedLabel {
        area: extract_area_prefix(s).map(ToString::to_string),
        device_category,
        instance_number,
        signal_kind: extract_signal_kind(s, LEXICON_SIGNAL_KIND),
    }
}

/// Drop every character outside word characters and `-`.
pub fn sanitize_tag(text: &str) -> String {
    RE_TAG_ILLEGAL.replace_all(text, "").into_owned()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
