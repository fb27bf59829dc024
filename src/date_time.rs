use std::fmt;

use chrono::{FixedOffset, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::error::Error;

// Fallback order matters: offset layouts first, then Z-suffixed ones,
// each with and without seconds.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dt%H:%M:%S%.f%:z", "%Y-%m-%dt%H:%M%:z"];
const UTC_LAYOUTS: [&str; 2] = ["%Y-%m-%dt%H:%M:%S%.fz", "%Y-%m-%dt%H:%Mz"];

/// Timestamp keeping the source's UTC offset next to the UTC-normalized
/// instant. Seconds precision; fractional seconds are accepted on input
/// and truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    offset_minutes: i32,
    time: chrono::DateTime<Utc>,
}

impl DateTime {
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    pub fn time(&self) -> chrono::DateTime<Utc> {
        self.time
    }

    pub fn parse(input: &str) -> Result<DateTime, Error> {
        let lower = input.to_lowercase();

        for layout in &OFFSET_LAYOUTS {
            if let Ok(t) = chrono::DateTime::parse_from_str(&lower, layout) {
                return Ok(DateTime {
                    offset_minutes: t.offset().local_minus_utc() / 60,
                    time: t.with_timezone(&Utc).trunc_subsecs(0),
                });
            }
        }

        for layout in &UTC_LAYOUTS {
            if let Ok(t) = NaiveDateTime::parse_from_str(&lower, layout) {
                return Ok(DateTime {
                    offset_minutes: 0,
                    time: Utc.from_utc_datetime(&t).trunc_subsecs(0),
                });
            }
        }

        Err(Error::InvalidTimestamp(input.to_string()))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match FixedOffset::east_opt(self.offset_minutes * 60) {
            Some(offset) if self.offset_minutes != 0 => write!(
                f,
                "{}",
                self.time
                    .with_timezone(&offset)
                    .format("%Y-%m-%dT%H:%M:%S%:z")
            ),
            _ => write!(f, "{}", self.time.format("%Y-%m-%dT%H:%M:%SZ")),
        }
    }
}
