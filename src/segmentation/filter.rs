/*!
 * Export filtering of segments.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::Segment;

// @const: ASCII digits only
static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// True when the content is empty after trimming whitespace
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// True when the content is only ASCII digits once `,`, `.` and spaces are
/// removed. Decimal strings such as `12.5` therefore count as numeric.
pub fn is_numeric(content: &str) -> bool {
    let cleaned: String = content
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | ' '))
        .collect();
    DIGITS_REGEX.is_match(&cleaned)
}

/// Keep the segments that qualify for export, preserving their order
pub fn filter(segments: Vec<Segment>, export_numbers: bool, export_blanks: bool) -> Vec<Segment> {
    segments
        .into_iter()
        .filter(|segment| {
            let skip = (!export_blanks && is_blank(&segment.content))
                || (!export_numbers && is_numeric(&segment.content));
            if skip {
                debug!("Skipping segment {:?}", segment.content);
            }
            !skip
        })
        .collect()
}
