//! Calendar helpers.
//!
//! A puzzle day is a local calendar date. Its key is `YYYY-MM-DD`, and
//! snapshots for the day are stored under `<prefix>-YYYY-MM-DD`.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;

/// Today's date on the local wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
}

/// Storage key of the snapshot for `date`, e.g. `chain-2025-06-01`.
pub fn storage_key(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}", date_key(date))
}

/// Short `M/D/YY` date used in share text.
pub fn share_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}/{}/{}", date.month(), date.day(), date.year() % 100)
}

/// Time left until the next puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown from `now` to the next local midnight.
///
/// Measured in elapsed time, so a daylight-saving change in between makes
/// the day an hour shorter or longer.
pub fn time_until_tomorrow<Tz: TimeZone>(now: DateTime<Tz>) -> Countdown {
    let total = next_midnight(&now).map_or(0, |midnight| {
        midnight.signed_duration_since(now).num_seconds().max(0)
    });

    Countdown {
        hours: total / 3600,
        minutes: (total % 3600) / 60,
        seconds: total % 60,
    }
}

/// First instant of the next local day. A zone that skips midnight starts
/// the day at the first local time that exists.
fn next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let start = now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?;
    (0..=2)
        .map(|hours| start + chrono::Duration::hours(hours))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
}
