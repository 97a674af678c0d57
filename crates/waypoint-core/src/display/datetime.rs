//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A timestamp shown in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A calendar date in the card format, e.g. `Jun 15, 2024`.
pub struct ShortDate<'a>(pub &'a Date);

impl fmt::Display for ShortDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%b %-d, %Y"))
    }
}

/// The span of a trip. Open ends are shown as `?`.
pub struct DateSpan {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateSpan {
    pub fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.from, &self.to) {
            (None, None) => write!(f, "Not scheduled"),
            (Some(from), None) => write!(f, "{} - ?", ShortDate(from)),
            (None, Some(to)) => write!(f, "? - {}", ShortDate(to)),
            (Some(from), Some(to)) if from == to => write!(f, "{}", ShortDate(from)),
            (Some(from), Some(to)) => write!(f, "{} - {}", ShortDate(from), ShortDate(to)),
        }
    }
}
