//! Chart report formatting.
//!
//! The chart collaborator prints a full report; only the part from the
//! `Date` header onward is of interest. Table borders drawn with `+` are
//! replaced with `-` and bordered lines are truncated so the chart fits a
//! narrow chat bubble.

use crate::error::ChartError;

/// Structural marker the raw report must contain. Everything before the
/// first occurrence is discarded.
pub const REPORT_MARKER: &str = "Date";

/// Separator banner prepended to the formatted chart.
const BANNER: &str = "----------------------------------------";

/// Format a raw chart report for delivery.
///
/// A report without the marker is a broken collaborator contract and is
/// surfaced as [`ChartError::MarkerNotFound`], never as an empty result.
pub fn format_report(raw: &str, width: usize) -> Result<String, ChartError> {
    let start = raw
        .find(REPORT_MARKER)
        .ok_or_else(|| ChartError::MarkerNotFound {
            marker: REPORT_MARKER.to_string(),
        })?;

    let mut formatted = String::with_capacity(raw.len() - start + BANNER.len() + 1);
    formatted.push_str(BANNER);
    for line in raw[start..].lines() {
        formatted.push('\n');
        let line = line.replace('+', "-");
        if line.contains('-') {
            formatted.extend(line.chars().take(width));
        } else {
            formatted.push_str(&line);
        }
    }
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: usize = 57;

    #[test]
    fn slices_from_first_marker() {
        let raw = "kerykeion preamble\njunk header\nDate 15/7/1990\nSun +Leo";
        let out = format_report(raw, WIDTH).unwrap();
        assert!(out.starts_with(BANNER));
        assert!(out.contains("Date 15/7/1990"));
        assert!(!out.contains("preamble"));
    }

    #[test]
    fn replaces_plus_with_dash() {
        let raw = "Date\n+---+---+";
        let out = format_report(raw, WIDTH).unwrap();
        assert!(!out.contains('+'));
        assert!(out.contains("---------"));
    }

    #[test]
    fn truncates_bordered_lines_to_width() {
        let long_border = format!("+{}+", "x".repeat(100));
        let raw = format!("Date\n{long_border}\nplain text line without borders");
        let out = format_report(&raw, WIDTH).unwrap();
        for line in out.lines().skip(1) {
            if line.contains('-') {
                assert!(line.chars().count() <= WIDTH, "line too wide: {line:?}");
            }
        }
        // Lines without the separator are left alone.
        assert!(out.contains("plain text line without borders"));
    }

    #[test]
    fn missing_marker_is_a_hard_failure() {
        let err = format_report("no header in here at all", WIDTH).unwrap_err();
        assert!(matches!(err, ChartError::MarkerNotFound { .. }));
    }

    #[test]
    fn width_variant_sixty() {
        let raw = format!("Date\n-{}", "y".repeat(100));
        let out = format_report(&raw, 60).unwrap();
        let widest = out.lines().map(|l| l.chars().count()).max().unwrap();
        assert!(widest <= 60);
    }
}
