//! Date range filtering for tender lists.
//!
//! A [`DateRangeFilter`] combines a quick range ("last 7 days", "this
//! semester", ...) and a custom range picked by hand. Whichever was set last
//! is the one in effect: picking a quick range drops the custom range, and
//! applying a custom range resets the quick range to [`QuickRange::All`].
//!
//! Ranges are resolved against an explicit `today` so results do not depend
//! on the wall clock.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tenderboard::daterange::{parse_french_date, DateRangeFilter, QuickRange};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
//! let mut filter = DateRangeFilter::default();
//! filter.set_quick(QuickRange::Last7Days);
//!
//! assert!(filter.matches_text("06 nov. 2025", today));
//! assert!(!filter.matches_text("05 nov. 2025", today));
//! assert_eq!(parse_french_date("01 août 2025"), NaiveDate::from_ymd_opt(2025, 8, 1));
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

static FRENCH_MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("janv", 1),
        ("févr", 2),
        ("fevr", 2),
        ("mars", 3),
        ("avr", 4),
        ("mai", 5),
        ("juin", 6),
        ("juil", 7),
        ("août", 8),
        ("aout", 8),
        ("sept", 9),
        ("oct", 10),
        ("nov", 11),
        ("déc", 12),
        ("dec", 12),
    ])
});

/// Parses an abbreviated French date such as `"12 nov. 2025"` or `"3 mai 2024"`.
///
/// The first dot of the month is ignored and the month is matched
/// case-insensitively. Returns `None` for anything that is not a real date.
pub fn parse_french_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month_key = parts.next()?.replacen('.', "", 1).to_lowercase();
    let year: i32 = parts.next()?.parse().ok()?;
    let month = *FRENCH_MONTHS.get(month_key.as_str())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// An inclusive range of days; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both ends set.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Reports whether neither end is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Reports whether `date` falls inside the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map_or("…".to_string(), |d| d.format("%d/%m/%Y").to_string());
        write!(f, "{} → {}", show(self.start), show(self.end))
    }
}

/// Predefined ranges relative to today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuickRange {
    /// No quick range.
    #[default]
    All,
    /// Today only.
    Today,
    /// The six previous days and today.
    Last7Days,
    /// The calendar month containing today.
    ThisMonth,
    /// January to June, or July to December.
    ThisSemester,
}

impl QuickRange {
    /// Every quick range in menu order.
    pub const ALL: [QuickRange; 5] = [
        QuickRange::All,
        QuickRange::Today,
        QuickRange::Last7Days,
        QuickRange::ThisMonth,
        QuickRange::ThisSemester,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            QuickRange::All => "All dates",
            QuickRange::Today => "Today",
            QuickRange::Last7Days => "Last 7 days",
            QuickRange::ThisMonth => "This month",
            QuickRange::ThisSemester => "This semester",
        }
    }

    /// The next entry of [`QuickRange::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&q| q == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The concrete range for `today`; `None` for [`QuickRange::All`].
    pub fn resolve(self, today: NaiveDate) -> Option<DateRange> {
        match self {
            QuickRange::All => None,
            QuickRange::Today => Some(DateRange::between(today, today)),
            QuickRange::Last7Days => Some(DateRange::between(today - Duration::days(6), today)),
            QuickRange::ThisMonth => {
                let start = today.with_day(1)?;
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
                };
                Some(DateRange::between(start, next_month.pred_opt()?))
            }
            QuickRange::ThisSemester => {
                let year = today.year();
                let (start, end) = if today.month() <= 6 {
                    ((1, 1), (6, 30))
                } else {
                    ((7, 1), (12, 31))
                };
                Some(DateRange::between(
                    NaiveDate::from_ymd_opt(year, start.0, start.1)?,
                    NaiveDate::from_ymd_opt(year, end.0, end.1)?,
                ))
            }
        }
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quick range plus custom range; the one set last wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    quick: QuickRange,
    custom: DateRange,
}

impl DateRangeFilter {
    /// The selected quick range.
    pub fn quick(&self) -> QuickRange {
        self.quick
    }

    /// The custom range; empty when none is applied.
    pub fn custom(&self) -> DateRange {
        self.custom
    }

    /// Selects a quick range and drops the custom range. Selecting
    /// [`QuickRange::All`] keeps the custom range.
    pub fn set_quick(&mut self, quick: QuickRange) {
        debug!(range = %quick, "quick date range selected");
        if quick != QuickRange::All {
            self.custom = DateRange::default();
        }
        self.quick = quick;
    }

    /// Applies a custom range and resets the quick range.
    pub fn apply_custom(&mut self, range: DateRange) {
        debug!(range = %range, "custom date range applied");
        self.custom = range;
        self.quick = QuickRange::All;
    }

    /// Removes every date restriction.
    pub fn clear_all(&mut self) {
        self.custom = DateRange::default();
        self.quick = QuickRange::All;
    }

    /// The range in effect for `today`, or `None` when dates are unrestricted.
    pub fn active_range(&self, today: NaiveDate) -> Option<DateRange> {
        self.quick
            .resolve(today)
            .or_else(|| (!self.custom.is_empty()).then_some(self.custom))
    }

    /// Reports whether a date passes the filter.
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.active_range(today).map_or(true, |r| r.contains(date))
    }

    /// Reports whether a French date string passes the filter. Unparseable
    /// dates pass only while no range is active.
    pub fn matches_text(&self, value: &str, today: NaiveDate) -> bool {
        match self.active_range(today) {
            None => true,
            Some(range) => parse_french_date(value).is_some_and(|d| range.contains(d)),
        }
    }
}
