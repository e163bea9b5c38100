//! Monthly periods as found in the market dataset
//!
//! Periods are stored as "YYYY-MM" text. Consumers group and filter on the
//! short month label ("Jan", "Feb", ...), so conversions are memoized in a
//! [`PeriodLabels`] cache owned by a single selection call.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;

/// Short month labels in calendar order
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Parse a "YYYY-MM" period, returning `None` for anything else
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (year, month) = text.trim().split_once('-')?;
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
        Some(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Short English month label, e.g. "Jan"
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        MONTH_LABELS[(self.month - 1) as usize]
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid period '{s}', expected YYYY-MM"))
    }
}

/// Memoized period-to-label conversions for one invocation
#[derive(Debug, Default)]
pub struct PeriodLabels {
    cache: FxHashMap<String, Option<Period>>,
}

impl PeriodLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a period, consulting the cache first
    pub fn period(&mut self, text: &str) -> Option<Period> {
        if let Some(cached) = self.cache.get(text) {
            return *cached;
        }
        let parsed = Period::parse(text);
        self.cache.insert(text.to_string(), parsed);
        parsed
    }

    /// Short month label for a period, `None` when unparsable
    pub fn label(&mut self, text: &str) -> Option<&'static str> {
        self.period(text).map(|p| p.short_label())
    }

    /// Number of distinct period strings seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
