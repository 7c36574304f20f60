//! Canonical `YYYY-MM-DD` date keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlanError;

/// A calendar day identifying one plan bucket, serialized as `YYYY-MM-DD`.
///
/// Uses the local calendar: "today" is whatever day the local clock says
/// it is, with no timezone normalization beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    /// Today according to the local clock.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    /// Calendar-day addition, rolling over month and year boundaries.
    pub fn add_days(self, days: i64) -> Self {
        DateKey(self.0 + Duration::days(days))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateKey)
            .map_err(|_| PlanError::Validation(format!("Invalid date '{s}'. Expected YYYY-MM-DD")))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
