//! Holiday calendars and business day adjustment.
//!
//! A [`Calendar`] decides which dates are business days and applies a
//! [`BusinessDayConvention`] to roll dates that are not.
//!
//! ```
//! use pricer_core::types::{BusinessDayConvention, Calendar, Date};
//!
//! let cal = Calendar::Canada;
//! // Canada Day 2024 falls on a Monday.
//! let canada_day = Date::from_ymd(2024, 7, 1).unwrap();
//! assert!(!cal.is_business_day(canada_day));
//! assert_eq!(
//!     cal.adjust(canada_day, BusinessDayConvention::Following).unwrap(),
//!     Date::from_ymd(2024, 7, 2).unwrap()
//! );
//! ```

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use super::error::{ConventionError, DateError};
use super::time::{BusinessDayConvention, Date};

/// Business day calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Calendar {
    /// Every day is a business day.
    NullCalendar,
    /// Saturdays and Sundays are holidays.
    WeekendsOnly,
    /// Canadian settlement calendar.
    #[default]
    Canada,
}

impl Calendar {
    /// Returns the calendar name.
    pub fn name(&self) -> &'static str {
        match self {
            Calendar::NullCalendar => "Null",
            Calendar::WeekendsOnly => "Weekends Only",
            Calendar::Canada => "Canada",
        }
    }

    /// True when `date` is a good business day.
    pub fn is_business_day(&self, date: Date) -> bool {
        match self {
            Calendar::NullCalendar => true,
            Calendar::WeekendsOnly => !date.is_weekend(),
            Calendar::Canada => !date.is_weekend() && !is_canada_holiday(date),
        }
    }

    /// Rolls `date` onto a business day according to `convention`.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date, DateError> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.roll(date, 1),
            BusinessDayConvention::Preceding => self.roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let rolled = self.roll(date, 1)?;
                if rolled.month() != date.month() {
                    self.roll(date, -1)
                } else {
                    Ok(rolled)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let rolled = self.roll(date, -1)?;
                if rolled.month() != date.month() {
                    self.roll(date, 1)
                } else {
                    Ok(rolled)
                }
            }
        }
    }

    /// Moves `date` by `n` business days, then applies `convention`.
    ///
    /// With `n == 0` this is just [`Calendar::adjust`].
    pub fn advance_business_days(
        &self,
        date: Date,
        n: i32,
        convention: BusinessDayConvention,
    ) -> Result<Date, DateError> {
        if n == 0 {
            return self.adjust(date, convention);
        }
        let step: i64 = if n > 0 { 1 } else { -1 };
        let mut current = date;
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            current = current.add_days(step)?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    fn roll(&self, date: Date, step: i64) -> Result<Date, DateError> {
        let mut current = date;
        while !self.is_business_day(current) {
            current = current.add_days(step)?;
        }
        Ok(current)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Calendar {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "null" | "none" | "nullcalendar" => Ok(Calendar::NullCalendar),
            "weekendsonly" | "weekends" => Ok(Calendar::WeekendsOnly),
            "canada" | "ca" | "cad" | "toronto" => Ok(Calendar::Canada),
            _ => Err(ConventionError::Unknown {
                kind: "calendar",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Calendar;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Calendar {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for Calendar {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Calendar::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Easter Sunday, anonymous Gregorian algorithm.
fn easter_sunday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32).ok()
}

fn is_canada_holiday(date: Date) -> bool {
    let d = date.day();
    let m = date.month();
    let y = date.year();
    let w = date.weekday();
    let good_friday = easter_sunday(y).and_then(|e| e.add_days(-2).ok());
    let monday = w == Weekday::Mon;

    // New Year's Day (possibly moved to Monday)
    ((d == 1 || ((d == 2 || d == 3) && monday)) && m == 1)
        // Family Day (third Monday in February, since 2008)
        || ((15..=21).contains(&d) && monday && m == 2 && y >= 2008)
        // Good Friday
        || good_friday == Some(date)
        // Victoria Day (Monday on or preceding May 24th)
        || (d > 17 && d <= 24 && monday && m == 5)
        // Canada Day (possibly moved to Monday)
        || ((d == 1 || ((d == 2 || d == 3) && monday)) && m == 7)
        // Provincial Holiday (first Monday of August)
        || (d <= 7 && monday && m == 8)
        // Labour Day (first Monday of September)
        || (d <= 7 && monday && m == 9)
        // National Day for Truth and Reconciliation (possibly moved to Monday)
        || (((d == 30 && m == 9) || (d <= 2 && m == 10 && monday)) && y >= 2021)
        // Thanksgiving Day (second Monday of October)
        || (d > 7 && d <= 14 && monday && m == 10)
        // Remembrance Day (possibly moved to Monday)
        || ((d == 11 || ((d == 12 || d == 13) && monday)) && m == 11)
        // Christmas (possibly moved to Monday or Tuesday)
        || ((d == 25 || (d == 27 && (monday || w == Weekday::Tue))) && m == 12)
        // Boxing Day (possibly moved to Monday or Tuesday)
        || ((d == 26 || (d == 28 && (monday || w == Weekday::Tue))) && m == 12)
}
