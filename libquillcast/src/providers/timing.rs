//! Publish-time heuristics shared by the providers
//!
//! Suggested times are computed against the local wall clock (posting-time
//! advice is a local-audience concern) and returned as UTC instants.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc, Weekday};

/// Next occurrence of `target` at the given local wall-clock time.
///
/// Always strictly in the future: when today already is the target weekday,
/// the following week's occurrence is returned.
pub(crate) fn next_weekday_at(
    now: DateTime<Local>,
    target: Weekday,
    hour: u32,
    minute: u32,
) -> DateTime<Utc> {
    let mut days_ahead = (target.num_days_from_sunday() as i64
        - now.weekday().num_days_from_sunday() as i64)
        .rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }

    at_local_time(now.date_naive() + Duration::days(days_ahead), hour, minute)
}

/// Tomorrow at the given local wall-clock time
pub(crate) fn tomorrow_at(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Utc> {
    at_local_time(now.date_naive() + Duration::days(1), hour, minute)
}

fn at_local_time(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| date.and_time(Default::default()));

    // earliest() covers both the unambiguous case and DST fold; a DST gap at
    // the chosen hour falls back to reading the naive time as UTC
    match naive.and_local_timezone(Local).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}
