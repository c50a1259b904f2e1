//! Chart computation boundary: birth facts in, formatted report (and an
//! optional rendered image) out.

pub mod cities;
pub mod report;
pub mod source;

pub use source::{ChartCommand, ChartSource, RawChart};

/// A complete, validated set of birth facts for one chart.
///
/// Built only once every collection stage has passed; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Normalized location (diacritics stripped, lower-cased).
    pub location: String,
    /// Two-letter upper-case country code.
    pub country_code: String,
}
