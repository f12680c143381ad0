//! Canonical period anchors and the sub-units inside them.

use super::{Granularity, TrackingDomainError};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 1_440;

/// Position of a slot inside a period.
///
/// Daily periods use hours `0..=23`, weekly periods use weekdays `0..=6`
/// starting on Monday, monthly periods use day-of-month starting at 1, and
/// yearly periods use months `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubUnit(u32);

impl SubUnit {
    /// Wraps a raw sub-unit index; range checks happen against an anchor.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SubUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The first date of a period at a given granularity.
///
/// Construction enforces canonical dates: any date for daily periods, a
/// Monday for weekly, the 1st for monthly, and 1 January for yearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodAnchor {
    granularity: Granularity,
    date: NaiveDate,
}

impl PeriodAnchor {
    /// Creates an anchor from a date that must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::NonCanonicalAnchor`] when the date does
    /// not start a period of the granularity.
    pub fn new(granularity: Granularity, date: NaiveDate) -> Result<Self, TrackingDomainError> {
        let anchor = Self::containing(granularity, date)?;
        if anchor.date != date {
            return Err(TrackingDomainError::NonCanonicalAnchor { granularity, date });
        }
        Ok(anchor)
    }

    /// Returns the anchor of the period that contains `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::OutOfCalendar`] when the period start
    /// falls before the earliest representable date.
    pub fn containing(
        granularity: Granularity,
        date: NaiveDate,
    ) -> Result<Self, TrackingDomainError> {
        let start = match granularity {
            Granularity::Daily => Some(date),
            Granularity::Weekly => date.checked_sub_days(Days::new(u64::from(
                date.weekday().num_days_from_monday(),
            ))),
            Granularity::Monthly => date.with_day(1),
            Granularity::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
        .ok_or(TrackingDomainError::OutOfCalendar(date))?;
        Ok(Self {
            granularity,
            date: start,
        })
    }

    /// Parses an ISO `YYYY-MM-DD` date and validates it as an anchor.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::MalformedDate`] for unparsable text or
    /// [`TrackingDomainError::NonCanonicalAnchor`] for a non-canonical date.
    pub fn parse(granularity: Granularity, text: &str) -> Result<Self, TrackingDomainError> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| TrackingDomainError::MalformedDate(text.to_owned()))?;
        Self::new(granularity, date)
    }

    /// Lists every anchor whose period starts between the period containing
    /// `from` and `to`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::InvertedRange`] when `to` precedes
    /// `from`.
    pub fn between(
        granularity: Granularity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Self>, TrackingDomainError> {
        if to < from {
            return Err(TrackingDomainError::InvertedRange { from, to });
        }
        let mut anchors = Vec::new();
        let mut cursor = Self::containing(granularity, from)?;
        while cursor.date <= to {
            anchors.push(cursor);
            cursor = cursor.next()?;
        }
        Ok(anchors)
    }

    /// Returns the period granularity.
    #[must_use]
    pub const fn granularity(self) -> Granularity {
        self.granularity
    }

    /// Returns the first date of the period.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.date
    }

    /// Returns the anchor of the following period.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::OutOfCalendar`] past the last
    /// representable date.
    pub fn next(self) -> Result<Self, TrackingDomainError> {
        let date = match self.granularity {
            Granularity::Daily => self.date.checked_add_days(Days::new(1)),
            Granularity::Weekly => self.date.checked_add_days(Days::new(7)),
            Granularity::Monthly => self.date.checked_add_months(Months::new(1)),
            Granularity::Yearly => self.date.checked_add_months(Months::new(12)),
        }
        .ok_or(TrackingDomainError::OutOfCalendar(self.date))?;
        Ok(Self {
            granularity: self.granularity,
            date,
        })
    }

    /// Returns the inclusive range of valid sub-unit indices.
    #[must_use]
    pub fn sub_unit_bounds(self) -> (u32, u32) {
        match self.granularity {
            Granularity::Daily => (0, 23),
            Granularity::Weekly => (0, 6),
            Granularity::Monthly => (1, days_in_month(self.date)),
            Granularity::Yearly => (1, 12),
        }
    }

    /// Returns the length in minutes of a sub-unit of this period.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::SubUnitOutOfRange`] when the sub-unit
    /// is not part of the period.
    pub fn capacity(self, sub_unit: SubUnit) -> Result<u32, TrackingDomainError> {
        let (min, max) = self.sub_unit_bounds();
        let value = sub_unit.value();
        if !(min..=max).contains(&value) {
            return Err(TrackingDomainError::SubUnitOutOfRange {
                granularity: self.granularity,
                sub_unit: value,
                min,
                max,
            });
        }
        Ok(match self.granularity {
            Granularity::Daily => MINUTES_PER_HOUR,
            Granularity::Weekly | Granularity::Monthly => MINUTES_PER_DAY,
            Granularity::Yearly => NaiveDate::from_ymd_opt(self.date.year(), value, 1)
                .map_or(31, days_in_month)
                .saturating_mul(MINUTES_PER_DAY),
        })
    }

    /// Checks that `minutes` fit inside the sub-unit.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingDomainError::SubUnitOutOfRange`] or
    /// [`TrackingDomainError::MinutesExceedCapacity`].
    pub fn check_minutes(self, sub_unit: SubUnit, minutes: u32) -> Result<(), TrackingDomainError> {
        let capacity = self.capacity(sub_unit)?;
        if minutes > capacity {
            return Err(TrackingDomainError::MinutesExceedCapacity {
                sub_unit: sub_unit.value(),
                minutes,
                capacity,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PeriodAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.granularity, self.date)
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}
