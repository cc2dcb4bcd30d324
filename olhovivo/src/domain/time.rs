//! Clock times reported by Olho Vivo.
//!
//! The API stamps every report and forecast with an "HH:MM" string. The
//! hour may be a single digit ("9:05"), so the accepted grammar is
//! `[0-2]?[0-9]:[0-5][0-9]`, matched against the whole string.

use std::fmt;

use chrono::NaiveTime;

use super::error::ValidationError;

/// A validated "HH:MM" clock time, kept exactly as the server sent it.
///
/// # Examples
///
/// ```
/// use olhovivo::domain::ClockTime;
///
/// let t = ClockTime::parse("9:05").unwrap();
/// assert_eq!(t.as_str(), "9:05");
/// assert_eq!((t.hour(), t.minute()), (9, 5));
///
/// // Minutes always take two digits
/// assert!(ClockTime::parse("9:5").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClockTime {
    raw: String,
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Parse and validate a clock time.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::new("time", format!("expected HH:MM, got {s:?}"));

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let h = hours.as_bytes();
        let m = minutes.as_bytes();

        let hour = match h {
            [d] if d.is_ascii_digit() => d - b'0',
            [t, d] if (b'0'..=b'2').contains(t) && d.is_ascii_digit() => {
                (t - b'0') * 10 + (d - b'0')
            }
            _ => return Err(invalid()),
        };

        let minute = match m {
            [t, d] if (b'0'..=b'5').contains(t) && d.is_ascii_digit() => {
                (t - b'0') * 10 + (d - b'0')
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            raw: s.to_string(),
            hour,
            minute,
        })
    }

    /// The time exactly as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Convert to a `NaiveTime`.
    ///
    /// Returns `None` for hours 24-29, which the wire grammar admits but
    /// no clock shows.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self.raw)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
