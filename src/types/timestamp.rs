use crate::types::errors::TimestampError;
use crate::types::EpochSeconds;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction timestamp held as epoch seconds (UTC).
///
/// The input CSV carries timestamps in a single fixed format; anything else
/// is a parse failure, per the pipeline's precondition contract.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Timestamp(EpochSeconds);

impl Timestamp {
    pub fn epoch(&self) -> EpochSeconds {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0, 0) {
            Some(datetime) => write!(formatter, "{}", datetime.format(DATETIME_FORMAT)),
            None => write!(formatter, "{}", self.0)
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
            .map_err(|_| TimestampError::InvalidFormat {
                value: value.to_string(),
                format: DATETIME_FORMAT
            })?;

        Ok(Timestamp(parsed.and_utc().timestamp()))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Timestamp::from_str(&value).map_err(de::Error::custom)
    }
}

/// A date of birth held as epoch seconds (UTC midnight).
///
/// Dates before 1970 come out negative, which is exactly what the scaler
/// expects to see.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct DateOfBirth(EpochSeconds);

impl DateOfBirth {
    pub fn epoch(&self) -> EpochSeconds {
        self.0
    }
}

impl Display for DateOfBirth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0, 0) {
            Some(datetime) => write!(formatter, "{}", datetime.format(DATE_FORMAT)),
            None => write!(formatter, "{}", self.0)
        }
    }
}

impl FromStr for DateOfBirth {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map_err(|_| TimestampError::InvalidFormat {
                value: value.to_string(),
                format: DATE_FORMAT
            })?;

        let midnight = parsed.and_hms_opt(0, 0, 0)
            .ok_or_else(|| TimestampError::InvalidFormat {
                value: value.to_string(),
                format: DATE_FORMAT
            })?;

        Ok(DateOfBirth(midnight.and_utc().timestamp()))
    }
}

impl<'de> Deserialize<'de> for DateOfBirth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DateOfBirth::from_str(&value).map_err(de::Error::custom)
    }
}
