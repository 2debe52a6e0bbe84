use chrono::{DateTime, Utc};

/// Event type Google uses for "working from ..." markers
pub const WORKING_LOCATION_EVENT_TYPE: &str = "workingLocation";

/// Simplified calendar event representation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
    pub event_type: Option<String>,
}

impl CalendarEvent {
    pub fn is_working_location(&self) -> bool {
        self.event_type.as_deref() == Some(WORKING_LOCATION_EVENT_TYPE)
    }
}

/// Time window and paging for an event listing.
///
/// Listings are always expanded into single events and ordered by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Events ending after this instant are included
    pub time_min: DateTime<Utc>,
    /// Events starting before this instant are included
    pub time_max: Option<DateTime<Utc>>,
    pub max_results: Option<u32>,
}

impl EventQuery {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            time_min: start,
            time_max: Some(end),
            max_results: None,
        }
    }

    pub fn upcoming(from: DateTime<Utc>, limit: u32) -> Self {
        Self {
            time_min: from,
            time_max: None,
            max_results: Some(limit),
        }
    }
}
