use super::models::{Meeting, MeetingResponse};
use crate::components::google_calendar::time::{event_end, event_start};
use crate::components::google_calendar::CalendarEvent;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Whether working location markers show up in the daily listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkingLocationPolicy {
    #[default]
    Exclude,
    Include,
}

/// Pick the current and next meeting from start-ordered `events`.
///
/// Single forward pass: events that already ended are skipped, the first
/// remaining one is current if it has started and next otherwise. Once a
/// current meeting is known the first later event starting at or after `now`
/// is next, and the scan stops there.
pub fn select_meetings(events: &[CalendarEvent], now: DateTime<Utc>, tz: &Tz) -> MeetingResponse {
    let mut current: Option<&CalendarEvent> = None;

    for event in events.iter().filter(|e| !e.is_working_location()) {
        if event_end(event, tz) <= now {
            continue;
        }

        let start = event_start(event, tz);
        match current {
            None if start <= now => current = Some(event),
            None => {
                return MeetingResponse {
                    current_meeting: None,
                    next_meeting: Some(Meeting::from(event)),
                }
            }
            Some(_) if start >= now => {
                return MeetingResponse {
                    current_meeting: current.map(Meeting::from),
                    next_meeting: Some(Meeting::from(event)),
                }
            }
            // Overlaps the current meeting and already started
            Some(_) => {}
        }
    }

    MeetingResponse {
        current_meeting: current.map(Meeting::from),
        next_meeting: None,
    }
}

/// Flat listing of a day's events in the order given
pub fn list_meetings(events: &[CalendarEvent], policy: WorkingLocationPolicy) -> Vec<Meeting> {
    events
        .iter()
        .filter(|e| policy == WorkingLocationPolicy::Include || !e.is_working_location())
        .map(Meeting::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, h, m, 0).unwrap()
    }

    fn timed(name: &str, start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        CalendarEvent {
            id: name.to_lowercase(),
            summary: Some(name.to_string()),
            start_date_time: Some(at(start.0, start.1).to_rfc3339()),
            end_date_time: Some(at(end.0, end.1).to_rfc3339()),
            ..Default::default()
        }
    }

    fn working_location(start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        CalendarEvent {
            event_type: Some("workingLocation".to_string()),
            ..timed("Office", start, end)
        }
    }

    fn name(meeting: &Option<Meeting>) -> Option<&str> {
        meeting.as_ref().map(|m| m.name.as_str())
    }

    #[test]
    fn test_current_and_next() {
        let events = vec![timed("Standup", (9, 0), (10, 0)), timed("Review", (11, 0), (12, 0))];
        let response = select_meetings(&events, at(9, 30), &Tz::UTC);

        assert_eq!(name(&response.current_meeting), Some("Standup"));
        assert_eq!(name(&response.next_meeting), Some("Review"));
    }

    #[test]
    fn test_only_next() {
        let events = vec![timed("Planning", (14, 0), (15, 0))];
        let response = select_meetings(&events, at(9, 0), &Tz::UTC);

        assert_eq!(response.current_meeting, None);
        assert_eq!(name(&response.next_meeting), Some("Planning"));
    }

    #[test]
    fn test_no_events() {
        assert_eq!(select_meetings(&[], at(9, 0), &Tz::UTC), MeetingResponse::default());
    }

    #[test]
    fn test_all_events_past() {
        let events = vec![timed("Standup", (9, 0), (10, 0))];
        assert_eq!(
            select_meetings(&events, at(10, 0), &Tz::UTC),
            MeetingResponse::default()
        );
    }

    #[test]
    fn test_stops_at_first_upcoming_without_current() {
        let events = vec![
            timed("Planning", (14, 0), (15, 0)),
            timed("Retro", (16, 0), (17, 0)),
        ];
        let response = select_meetings(&events, at(9, 0), &Tz::UTC);

        assert_eq!(response.current_meeting, None);
        assert_eq!(name(&response.next_meeting), Some("Planning"));
    }

    #[test]
    fn test_current_without_next() {
        let events = vec![timed("Workshop", (9, 0), (17, 0))];
        let response = select_meetings(&events, at(12, 0), &Tz::UTC);

        assert_eq!(name(&response.current_meeting), Some("Workshop"));
        assert_eq!(response.next_meeting, None);
    }

    #[test]
    fn test_overlapping_started_event_is_not_next() {
        let events = vec![
            timed("Workshop", (9, 0), (17, 0)),
            timed("Lunch", (11, 30), (12, 30)),
            timed("Review", (13, 0), (14, 0)),
        ];
        let response = select_meetings(&events, at(12, 0), &Tz::UTC);

        assert_eq!(name(&response.current_meeting), Some("Workshop"));
        assert_eq!(name(&response.next_meeting), Some("Review"));
    }

    #[test]
    fn test_meeting_starting_now_is_current() {
        let events = vec![timed("Standup", (9, 0), (9, 15)), timed("Sync", (9, 15), (9, 45))];
        let response = select_meetings(&events, at(9, 0), &Tz::UTC);

        assert_eq!(name(&response.current_meeting), Some("Standup"));
        assert_eq!(name(&response.next_meeting), Some("Sync"));
    }

    #[test]
    fn test_working_location_is_ignored() {
        let events = vec![
            working_location((0, 0), (23, 59)),
            timed("Standup", (9, 0), (10, 0)),
            working_location((10, 0), (11, 0)),
            timed("Review", (11, 0), (12, 0)),
        ];

        let response = select_meetings(&events, at(9, 30), &Tz::UTC);
        assert_eq!(name(&response.current_meeting), Some("Standup"));
        assert_eq!(name(&response.next_meeting), Some("Review"));

        let response = select_meetings(&events[..1], at(9, 30), &Tz::UTC);
        assert_eq!(response, MeetingResponse::default());
    }

    #[test]
    fn test_all_day_event_is_current_in_local_time() {
        // 2024-05-06 in Helsinki runs 05-05 21:00 .. 05-06 21:00 UTC
        let events = vec![
            CalendarEvent {
                summary: Some("Conference".to_string()),
                start_date: Some("2024-05-06".to_string()),
                end_date: Some("2024-05-07".to_string()),
                ..Default::default()
            },
            timed("Dinner", (18, 0), (20, 0)),
        ];

        let response = select_meetings(&events, at(8, 0), &Europe::Helsinki);
        assert_eq!(name(&response.current_meeting), Some("Conference"));
        assert_eq!(name(&response.next_meeting), Some("Dinner"));

        let response = select_meetings(&events, at(21, 30), &Europe::Helsinki);
        assert_eq!(response, MeetingResponse::default());
    }

    #[test]
    fn test_unparseable_end_counts_as_past() {
        let broken = CalendarEvent {
            summary: Some("Broken".to_string()),
            start_date_time: Some(at(9, 0).to_rfc3339()),
            end_date_time: Some("soon".to_string()),
            ..Default::default()
        };
        let events = vec![broken, timed("Review", (11, 0), (12, 0))];
        let response = select_meetings(&events, at(9, 30), &Tz::UTC);

        assert_eq!(response.current_meeting, None);
        assert_eq!(name(&response.next_meeting), Some("Review"));
    }

    #[test]
    fn test_list_meetings_policies() {
        let events = vec![
            working_location((0, 0), (23, 59)),
            timed("Standup", (9, 0), (10, 0)),
            timed("Review", (11, 0), (12, 0)),
        ];

        let excluded = list_meetings(&events, WorkingLocationPolicy::Exclude);
        let names: Vec<&str> = excluded.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Standup", "Review"]);

        let included = list_meetings(&events, WorkingLocationPolicy::Include);
        let names: Vec<&str> = included.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Office", "Standup", "Review"]);
    }
}
