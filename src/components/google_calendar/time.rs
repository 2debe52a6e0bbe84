use super::models::CalendarEvent;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Midnight of `date` in `tz`, as a UTC instant
pub fn local_midnight(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        // Midnight skipped by a DST jump; the day starts an hour later
        chrono::LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Parse an event boundary. The timed value wins; the all-day date falls back
/// to local midnight.
pub fn parse_boundary(date_time: Option<&str>, date: Option<&str>, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Some(dt) = date_time.and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
        return Some(dt.with_timezone(&Utc));
    }

    date.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .and_then(|d| local_midnight(d, tz))
}

/// Event start; unparseable boundaries count as the earliest possible instant
pub fn event_start(event: &CalendarEvent, tz: &Tz) -> DateTime<Utc> {
    parse_boundary(
        event.start_date_time.as_deref(),
        event.start_date.as_deref(),
        tz,
    )
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Event end; unparseable boundaries count as the earliest possible instant
pub fn event_end(event: &CalendarEvent, tz: &Tz) -> DateTime<Utc> {
    parse_boundary(event.end_date_time.as_deref(), event.end_date.as_deref(), tz)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The local day containing `now`: from midnight to the following midnight
pub fn day_window(now: DateTime<Utc>, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.with_timezone(tz).date_naive();
    let start = local_midnight(today, tz)?;
    let end = local_midnight(today.succ_opt()?, tz)?;
    Some((start, end))
}
