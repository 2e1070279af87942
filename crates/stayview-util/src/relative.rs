//! Human relative-time phrasing
//!
//! Distances are bucketed the way people talk about dates on a booking card:
//! minutes under an hour, hours within a day, days within a month, then
//! months and years. The result reads "in 3 days" for the future and
//! "3 days ago" for the past.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Bucketed distance between two instants, without direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    LessThanAMinute,
    Minutes(i64),
    AboutHours(i64),
    Days(i64),
    AboutMonths(i64),
    Months(i64),
    AboutYears(i64),
    OverYears(i64),
    AlmostYears(i64),
}

impl Distance {
    /// Bucket the distance between two instants. Order does not matter.
    pub fn between<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> Self {
        let (earlier, later) = if a.timestamp() <= b.timestamp() {
            (a.naive_utc(), b.naive_utc())
        } else {
            (b.naive_utc(), a.naive_utc())
        };

        let seconds = (later - earlier).num_seconds();
        let minutes = (seconds as f64 / 60.0).round() as i64;

        if minutes < 2 {
            return if minutes == 0 {
                Distance::LessThanAMinute
            } else {
                Distance::Minutes(minutes)
            };
        }
        if minutes < 45 {
            return Distance::Minutes(minutes);
        }
        if minutes < 90 {
            return Distance::AboutHours(1);
        }
        if minutes < MINUTES_IN_DAY {
            let hours = (minutes as f64 / MINUTES_IN_HOUR as f64).round() as i64;
            return Distance::AboutHours(hours);
        }
        if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
            return Distance::Days(1);
        }
        if minutes < MINUTES_IN_MONTH {
            let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
            return Distance::Days(days);
        }
        if minutes < MINUTES_IN_TWO_MONTHS {
            let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
            return Distance::AboutMonths(months);
        }

        let months = whole_months_between(&earlier, &later);
        if months < 12 {
            let nearest = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
            return Distance::Months(if nearest == 0 { 1 } else { nearest });
        }

        let into_year = months % 12;
        let years = months / 12;
        if into_year < 3 {
            Distance::AboutYears(years)
        } else if into_year < 9 {
            Distance::OverYears(years)
        } else {
            Distance::AlmostYears(years + 1)
        }
    }

    /// English phrase for the distance, with hedging words such as "about".
    pub fn phrase(&self) -> String {
        match *self {
            Distance::LessThanAMinute => "less than a minute".to_string(),
            Distance::Minutes(n) => counted(n, "minute"),
            Distance::AboutHours(n) => format!("about {}", counted(n, "hour")),
            Distance::Days(n) => counted(n, "day"),
            Distance::AboutMonths(n) => format!("about {}", counted(n, "month")),
            Distance::Months(n) => counted(n, "month"),
            Distance::AboutYears(n) => format!("about {}", counted(n, "year")),
            Distance::OverYears(n) => format!("over {}", counted(n, "year")),
            Distance::AlmostYears(n) => format!("almost {}", counted(n, "year")),
        }
    }
}

fn counted(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Calendar months fully elapsed between two naive instants (`earlier <= later`).
fn whole_months_between(earlier: &chrono::NaiveDateTime, later: &chrono::NaiveDateTime) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);

    let later_key = (later.day(), later.num_seconds_from_midnight());
    let earlier_key = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_key < earlier_key {
        months -= 1;
    }
    months
}

/// Relative phrase for `date` as seen from `base`, with direction:
/// "in about 3 hours", "5 days ago".
pub fn format_distance<A: TimeZone, B: TimeZone>(date: &DateTime<A>, base: &DateTime<B>) -> String {
    let phrase = Distance::between(date, base).phrase();
    if date.timestamp() > base.timestamp() {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Like [`format_distance`] but without the "about " filler, for compact labels.
pub fn format_distance_concise<A: TimeZone, B: TimeZone>(
    date: &DateTime<A>,
    base: &DateTime<B>,
) -> String {
    format_distance(date, base).replace("about ", "")
}
