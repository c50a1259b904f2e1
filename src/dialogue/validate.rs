//! Per-stage input validators.
//!
//! All numeric input is integer-only: anything that does not parse as a
//! plain integer is rejected and the stage re-prompts. Leading zeros are
//! stripped by the parse itself ("007" stores 7).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Maximum length of a subject name, in characters.
pub const MAX_NAME_LEN: usize = 40;

/// Maximum length of a location, in characters.
pub const MAX_LOCATION_LEN: usize = 50;

/// Validate a name: trimmed, 1–40 characters.
pub fn name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let len = trimmed.chars().count();
    (1..=MAX_NAME_LEN).contains(&len).then(|| trimmed.to_string())
}

/// Parse an integer within an inclusive range. Non-integer tokens (including
/// the empty string) are rejected, never coerced.
pub fn int_in_range(input: &str, low: i64, high: i64) -> Option<i64> {
    let value: i64 = input.trim().parse().ok()?;
    (low..=high).contains(&value).then_some(value)
}

pub fn year(input: &str) -> Option<i32> {
    int_in_range(input, 1900, 2027).map(|v| v as i32)
}

pub fn month(input: &str) -> Option<u32> {
    int_in_range(input, 1, 12).map(|v| v as u32)
}

/// Day of month, range-checked only (1–31). Deliberately not cross-checked
/// against the month's actual length or leap years.
pub fn day(input: &str) -> Option<u32> {
    int_in_range(input, 1, 31).map(|v| v as u32)
}

/// Parse `H:M` into (hour, minute). Exactly two `:`-separated integer
/// components; single digits are fine.
pub fn time(input: &str) -> Option<(u32, u32)> {
    let mut parts = input.splitn(3, ':');
    let hour = parts.next()?;
    let minute = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let hour = int_in_range(hour, 0, 23)?;
    let minute = int_in_range(minute, 0, 59)?;
    Some((hour as u32, minute as u32))
}

/// Normalize a location: trim, decompose (NFD), drop combining marks,
/// lower-case. Idempotent — normalizing an already-normalized string is a
/// no-op.
pub fn normalize_location(input: &str) -> String {
    input
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Validate a location: at most 50 characters after trimming, then
/// normalized.
pub fn location(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (trimmed.chars().count() <= MAX_LOCATION_LEN).then(|| normalize_location(trimmed))
}

/// Validate a country code: exactly two alphabetic characters after
/// trimming, stored upper-case.
pub fn country_code(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (trimmed.chars().count() == 2 && trimmed.chars().all(char::is_alphabetic))
        .then(|| trimmed.to_uppercase())
}

/// Whether a repeat-stage answer is affirmative: starts with "s" or "y",
/// case-insensitive ("Sí", "si", "yes", ...).
pub fn is_affirmative(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    lowered.starts_with('s') || lowered.starts_with('y')
}
