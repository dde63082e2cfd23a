//! Release calendar for the World Economic Outlook database.
//!
//! The dataset is published twice a year, in April and in October (the
//! second 2011 issue came out in September). The first release with a
//! downloadable country table is October 2007.
//!
//! ```
//! use weo_rs::release::{Half, Release};
//!
//! let r: Release = "2019-Oct".parse()?;
//! assert_eq!(r, Release::new(2019, Half::Second));
//! assert_eq!(Release::from_tag(2019, 2)?, r);
//! assert_eq!(r.successor(), Release::new(2020, Half::First));
//! # Ok::<(), weo_rs::DateError>(())
//! ```
use crate::error::DateError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two yearly publications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Half {
    /// April release
    First,
    /// October (September in 2011) release
    Second,
}

impl Half {
    /// Release number as used by the provider: 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Half::First => 1,
            Half::Second => 2,
        }
    }
}

/// One publication instance. Ordered by `(year, half)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Release {
    pub year: i32,
    pub half: Half,
}

/// Earliest release with a downloadable country table.
pub const FLOOR: Release = Release {
    year: 2007,
    half: Half::Second,
};

/// Publications that did not come out in the usual month.
const MONTH_OVERRIDES: &[(Release, &str)] = &[(
    Release {
        year: 2011,
        half: Half::Second,
    },
    "Sep",
)];

/// Release tag accepted by [`Release::from_tag`]: a number (1 or 2) or a
/// month label such as `"Apr"` or `"oct"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    Number(i64),
    Label(&'a str),
}

impl From<i32> for Tag<'_> {
    fn from(n: i32) -> Self {
        Tag::Number(n.into())
    }
}

impl From<u32> for Tag<'_> {
    fn from(n: u32) -> Self {
        Tag::Number(n.into())
    }
}

impl From<u8> for Tag<'_> {
    fn from(n: u8) -> Self {
        Tag::Number(n.into())
    }
}

impl<'a> From<&'a str> for Tag<'a> {
    fn from(s: &'a str) -> Self {
        Tag::Label(s)
    }
}

impl Release {
    pub const fn new(year: i32, half: Half) -> Self {
        Self { year, half }
    }

    /// Build a release from a year and a tag (`1`, `2`, `"apr"`, `"oct"`, `"sep"`).
    ///
    /// Labels are case-insensitive and full month names are accepted as well.
    /// The result is not validated against the calendar; see [`Release::validate`].
    pub fn from_tag<'a>(year: i32, tag: impl Into<Tag<'a>>) -> Result<Self, DateError> {
        let half = match tag.into() {
            Tag::Number(1) => Half::First,
            Tag::Number(2) => Half::Second,
            Tag::Number(n) => return Err(DateError::Tag(n.to_string())),
            Tag::Label(s) => match s.trim().to_ascii_lowercase().as_str() {
                "apr" | "april" => Half::First,
                "oct" | "october" | "sep" | "september" => Half::Second,
                _ => return Err(DateError::Tag(s.to_string())),
            },
        };
        Ok(Self::new(year, half))
    }

    /// Parse `"YYYY-MM"`, `"YYYY-Mon"` or `"YYYY-Month"`.
    ///
    /// April maps to the first release, September and October to the second.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let padded = format!("{}-01", s.trim());
        let date = ["%Y-%m-%d", "%Y-%b-%d", "%Y-%B-%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&padded, fmt).ok())
            .ok_or_else(|| DateError::Unparsable(s.to_string()))?;
        let half = match date.month() {
            4 => Half::First,
            9 | 10 => Half::Second,
            month => {
                return Err(DateError::Month {
                    input: s.to_string(),
                    month,
                });
            }
        };
        Ok(Self::new(date.year(), half))
    }

    /// Three-letter month of the publication, honouring historical exceptions.
    pub fn month_abbr(&self) -> &'static str {
        if let Some((_, m)) = MONTH_OVERRIDES.iter().find(|(r, _)| r == self) {
            return *m;
        }
        match self.half {
            Half::First => "Apr",
            Half::Second => "Oct",
        }
    }

    /// Zero-padded period marker used in retrieval addresses.
    pub fn period_marker(&self) -> &'static str {
        match self.half {
            Half::First => "01",
            Half::Second => "02",
        }
    }

    /// The next publication.
    pub fn successor(&self) -> Self {
        match self.half {
            Half::First => Self::new(self.year, Half::Second),
            Half::Second => Self::new(self.year + 1, Half::First),
        }
    }

    /// Check the release is between [`FLOOR`] and [`current`], both inclusive.
    pub fn validate(&self) -> Result<(), DateError> {
        self.validate_at(today())
    }

    /// Same as [`Release::validate`] with an explicit calendar date.
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), DateError> {
        if *self < FLOOR {
            return Err(DateError::TooEarly {
                got: *self,
                floor: FLOOR,
            });
        }
        let current = current_at(today);
        if *self > current {
            return Err(DateError::Future { got: *self, current });
        }
        Ok(())
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month_abbr())
    }
}

impl FromStr for Release {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Release::parse(s)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Most recent release that should exist today.
pub fn current() -> Release {
    current_at(today())
}

/// Most recent release that should exist on `today`.
pub fn current_at(today: NaiveDate) -> Release {
    let year = today.year();
    match today.month() {
        10.. => Release::new(year, Half::Second),
        4..=9 => Release::new(year, Half::First),
        _ => Release::new(year - 1, Half::Second),
    }
}

/// All releases from [`FLOOR`] to [`current`], in chronological order.
pub fn all_releases() -> Vec<Release> {
    all_releases_at(today())
}

pub fn all_releases_at(today: NaiveDate) -> Vec<Release> {
    let last = current_at(today);
    std::iter::successors(Some(FLOOR), |r| Some(r.successor()))
        .take_while(|r| *r <= last)
        .collect()
}

/// Valid releases published in `year`.
pub fn releases_in(year: i32) -> Vec<Release> {
    releases_in_at(year, today())
}

pub fn releases_in_at(year: i32, today: NaiveDate) -> Vec<Release> {
    all_releases_at(today)
        .into_iter()
        .filter(|r| r.year == year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_follows_publication_months() {
        assert_eq!(current_at(day(2020, 3, 31)), Release::new(2019, Half::Second));
        assert_eq!(current_at(day(2020, 4, 1)), Release::new(2020, Half::First));
        assert_eq!(current_at(day(2020, 9, 30)), Release::new(2020, Half::First));
        assert_eq!(current_at(day(2020, 10, 1)), Release::new(2020, Half::Second));
        assert_eq!(current_at(day(2021, 1, 15)), Release::new(2020, Half::Second));
    }

    #[test]
    fn ordering_is_year_then_half() {
        assert!(Release::new(2019, Half::First) < Release::new(2019, Half::Second));
        assert!(Release::new(2019, Half::Second) < Release::new(2020, Half::First));
    }

    #[test]
    fn september_override_only_changes_the_month_name() {
        let r = Release::new(2011, Half::Second);
        assert_eq!(r.month_abbr(), "Sep");
        assert_eq!(r.period_marker(), "02");
        assert_eq!(r.to_string(), "2011-Sep");
        assert_eq!(Release::new(2012, Half::Second).month_abbr(), "Oct");
    }

    #[test]
    fn releases_in_year() {
        let today = day(2020, 6, 1);
        assert_eq!(releases_in_at(2007, today), vec![FLOOR]);
        assert_eq!(
            releases_in_at(2011, today)
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>(),
            vec!["2011-Apr", "2011-Sep"]
        );
        assert_eq!(releases_in_at(2020, today), vec![Release::new(2020, Half::First)]);
    }
}
