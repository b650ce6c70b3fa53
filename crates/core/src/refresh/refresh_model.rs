use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::utils::time_utils::local_date;

/// When a dataset counts as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum RefreshPolicy {
    /// Stale once the calendar date changes.
    Daily,
    /// Stale once `minutes` have elapsed.
    Interval { minutes: u32 },
}

impl RefreshPolicy {
    pub fn interval(minutes: u32) -> Self {
        Self::Interval { minutes }
    }

    /// Whether a dataset last refreshed at `last` is stale at `now`.
    ///
    /// No timestamp is always stale, and so is one later than `now` (the
    /// wall clock moved backwards). Calendar dates are taken at `offset`.
    pub fn is_stale(
        &self,
        last: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> bool {
        let Some(last) = last else {
            return true;
        };
        if last > now {
            return true;
        }

        match self {
            Self::Daily => local_date(last, offset) != local_date(now, offset),
            Self::Interval { minutes } => now - last >= Duration::minutes(i64::from(*minutes)),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Interval { minutes } => write!(f, "every {} min", minutes),
        }
    }
}

/// Parses `daily` or a number of minutes.
impl FromStr for RefreshPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("daily") {
            return Ok(Self::Daily);
        }
        match value.parse::<u32>() {
            Ok(minutes) if minutes > 0 => Ok(Self::Interval { minutes }),
            _ => Err(Error::InvalidConfigValue(format!(
                "refresh policy must be 'daily' or a positive number of minutes, got '{}'",
                s
            ))),
        }
    }
}
