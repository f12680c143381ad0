//! Error types for period validation.

use super::Granularity;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing period values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackingDomainError {
    /// The date text is not an ISO `YYYY-MM-DD` date.
    #[error("malformed period date: {0}")]
    MalformedDate(String),

    /// The date does not start a period of the granularity.
    #[error("{date} is not a canonical {granularity} anchor")]
    NonCanonicalAnchor {
        /// Requested granularity.
        granularity: Granularity,
        /// Offending date.
        date: NaiveDate,
    },

    /// The sub-unit lies outside the period.
    #[error("sub-unit {sub_unit} is outside {min}..={max} for a {granularity} period")]
    SubUnitOutOfRange {
        /// Period granularity.
        granularity: Granularity,
        /// Offending sub-unit.
        sub_unit: u32,
        /// Smallest valid sub-unit.
        min: u32,
        /// Largest valid sub-unit.
        max: u32,
    },

    /// More minutes were logged than the sub-unit lasts.
    #[error("{minutes} minutes exceed the {capacity}-minute capacity of sub-unit {sub_unit}")]
    MinutesExceedCapacity {
        /// Target sub-unit.
        sub_unit: u32,
        /// Requested minutes.
        minutes: u32,
        /// Length of the sub-unit in minutes.
        capacity: u32,
    },

    /// A stored entry must carry a positive number of minutes.
    #[error("time entries must carry at least one minute")]
    ZeroMinutes,

    /// The range end precedes its start.
    #[error("range end {to} precedes start {from}")]
    InvertedRange {
        /// Range start.
        from: NaiveDate,
        /// Range end.
        to: NaiveDate,
    },

    /// The period lies beyond the supported calendar.
    #[error("period starting {0} is outside the supported calendar")]
    OutOfCalendar(NaiveDate),
}

/// Error returned while parsing a granularity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown period granularity: {0}")]
pub struct ParseGranularityError(pub String);
