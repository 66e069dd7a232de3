//! Payment frequency enumeration.

use super::error::ScheduleError;
use std::fmt;
use std::str::FromStr;

/// Coupon frequency of a fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    /// Once per year (12M)
    Annual,
    /// Twice per year (6M)
    #[default]
    SemiAnnual,
    /// Four times per year (3M)
    Quarterly,
    /// Twelve times per year (1M)
    Monthly,
}

impl Frequency {
    /// Number of coupon periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Tenor of one period in months.
    #[inline]
    pub fn months_between_payments(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "SemiAnnual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    /// Parses frequency names and tenor labels, case-insensitively
    /// (`"SemiAnnual"`, `"semi-annual"`, `"6M"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "yearly" | "1y" | "12m" => Ok(Frequency::Annual),
            "semiannual" | "6m" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            _ => Err(ScheduleError::UnknownFrequency {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Frequency;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Frequency {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for Frequency {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Frequency::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_months_between_payments() {
        assert_eq!(Frequency::Annual.months_between_payments(), 12);
        assert_eq!(Frequency::SemiAnnual.months_between_payments(), 6);
        assert_eq!(Frequency::Quarterly.months_between_payments(), 3);
        assert_eq!(Frequency::Monthly.months_between_payments(), 1);
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!("annual".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!("1Y".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!(
            "Semi-Annual".parse::<Frequency>().unwrap(),
            Frequency::SemiAnnual
        );
        assert_eq!(
            "SemiAnnual".parse::<Frequency>().unwrap(),
            Frequency::SemiAnnual
        );
        assert_eq!("6m".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("Quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!(
            "fortnightly".parse::<Frequency>(),
            Err(ScheduleError::UnknownFrequency { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for freq in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
    }
}
