//! Server timezone handling.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::config::ConfigError;

/// The timezone the server stores naive datetimes in.
///
/// A named zone follows its daylight saving rules per instant; an offset is
/// applied as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTimezone {
    /// A fixed UTC offset.
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Madrid`.
    Named(Tz),
}

impl ServerTimezone {
    /// UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::Named(Tz::UTC)
    }

    /// Converts an instant into this zone.
    #[must_use]
    pub fn convert(self, at: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Self::Fixed(offset) => at.with_timezone(&offset),
            Self::Named(tz) => at.with_timezone(&tz).fixed_offset(),
        }
    }

    /// Reads a naive server value as local time in this zone.
    ///
    /// A time repeated by a backward transition resolves to its earlier
    /// instant. A time skipped by a forward transition takes the offset in
    /// force right after the transition.
    #[must_use]
    pub fn localize(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Fixed(offset) => naive.and_local_timezone(offset).single(),
            Self::Named(tz) => match naive.and_local_timezone(tz) {
                LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => {
                    Some(at.fixed_offset())
                }
                LocalResult::None => {
                    let after = tz.offset_from_utc_datetime(&naive).fix();
                    naive.and_local_timezone(after).single()
                }
            },
        }
    }
}

impl From<FixedOffset> for ServerTimezone {
    fn from(offset: FixedOffset) -> Self {
        Self::Fixed(offset)
    }
}

impl From<Tz> for ServerTimezone {
    fn from(tz: Tz) -> Self {
        Self::Named(tz)
    }
}

impl fmt::Display for ServerTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for ServerTimezone {
    type Err = ConfigError;

    /// Parses `UTC`, `Z`, `±hh`, `±hh:mm`, `±hhmm` or an IANA zone name.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::utc());
        }
        if trimmed.starts_with(['+', '-']) {
            return parse_offset(trimmed)
                .map(Self::Fixed)
                .ok_or_else(|| ConfigError::InvalidTimezone(String::from(text)));
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ConfigError::InvalidTimezone(String::from(text)))
    }
}

/// Parses `±hh`, `±hh:mm` or `±hhmm`, up to 14 hours.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, rest) = match text.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || minutes.is_empty() || minutes.len() > 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
