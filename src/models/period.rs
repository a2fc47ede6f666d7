use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month bucket used as the monthly group key.
///
/// Orders chronologically and renders as `YYYY-MM` (`-YYYY-MM` before year 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month, returning `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Truncate a naive date to its calendar month
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is always in 1..=12 and day 1 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}", self.year.unsigned_abs(), self.month)
        } else {
            write!(f, "{:04}-{:02}", self.year, self.month)
        }
    }
}

/// Error returned when a `YYYY-MM` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid year-month '{0}', expected YYYY-MM")]
pub struct ParseYearMonthError(String);

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The month separator is the last '-', a leading one is the year's sign
        let (year, month) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseYearMonthError(s.to_string()))?;

        let year = year
            .parse::<i32>()
            .map_err(|_| ParseYearMonthError(s.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| ParseYearMonthError(s.to_string()))?;

        YearMonth::new(year, month).ok_or_else(|| ParseYearMonthError(s.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ParseYearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date_truncates_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let ym = YearMonth::from_date(date);

        assert_eq!(ym, YearMonth::new(2024, 2).unwrap());
        assert_eq!(ym.to_string(), "2024-02");
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_chronological_ordering() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();

        let mut months = vec![feb, dec, jan];
        months.sort();
        assert_eq!(months, vec![dec, jan, feb]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-07".parse::<YearMonth>().unwrap(), YearMonth::new(2024, 7).unwrap());
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let ym = YearMonth::new(2024, 1).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-01\"");

        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_negative_year_round_trips() {
        let ym = NaiveDate::from_ymd_opt(-1, 5, 10).map(YearMonth::from_date).unwrap();
        assert_eq!(ym.to_string(), "-0001-05");
        assert_eq!("-0001-05".parse::<YearMonth>().unwrap(), ym);

        let json = serde_json::to_string(&ym).unwrap();
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);

        assert!("-01".parse::<YearMonth>().is_err());
    }
}
