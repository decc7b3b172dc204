//! Countdown value type
//!
//! `Time` wraps a whole number of seconds. It is signed so that a negative
//! request can be expressed and then rejected by whoever owns the countdown;
//! the timer engine never stores a negative value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// A countdown value in whole seconds. Zero means expired or unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time {
    seconds: i64,
}

impl Time {
    pub const ZERO: Time = Time { seconds: 0 };

    pub const fn from_secs(seconds: i64) -> Self {
        Self { seconds }
    }

    pub const fn from_mins(minutes: i64) -> Self {
        Self {
            seconds: minutes * 60,
        }
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "" };
        let total = self.seconds.unsigned_abs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            write!(f, "{}{}:{:02}:{:02}", sign, hours, minutes, seconds)
        } else {
            write!(f, "{}{:02}:{:02}", sign, minutes, seconds)
        }
    }
}

/// Errors from parsing a `Time` out of `SS`, `MM:SS` or `H:MM:SS`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("empty duration")]
    Empty,
    #[error("expected at most 3 ':'-separated fields, got {0}")]
    TooManyFields(usize),
    #[error("invalid number '{text}': {source}")]
    InvalidNumber {
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{field} must be below 60, got {value}")]
    FieldOutOfRange { field: &'static str, value: u32 },
}

impl FromStr for Time {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 {
            return Err(TimeParseError::TooManyFields(parts.len()));
        }

        let values = parts
            .iter()
            .map(|part| {
                let text = part.trim();
                text.parse::<u32>()
                    .map_err(|source| TimeParseError::InvalidNumber {
                        text: text.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        // Leading field is unbounded; the ones after it are clock fields
        let names = ["minutes", "seconds"];
        for (value, field) in values.iter().skip(1).rev().zip(names.iter().rev()) {
            if *value >= 60 {
                return Err(TimeParseError::FieldOutOfRange {
                    field: *field,
                    value: *value,
                });
            }
        }

        let seconds = values
            .iter()
            .fold(0i64, |total, value| total * 60 + i64::from(*value));
        Ok(Time::from_secs(seconds))
    }
}
