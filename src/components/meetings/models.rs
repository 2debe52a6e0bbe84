use crate::components::google_calendar::CalendarEvent;
use serde::{Deserialize, Serialize};

/// A meeting as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl From<&CalendarEvent> for Meeting {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            name: event.summary.clone().unwrap_or_default(),
            start: event
                .start_date_time
                .clone()
                .or_else(|| event.start_date.clone())
                .unwrap_or_default(),
            end: event
                .end_date_time
                .clone()
                .or_else(|| event.end_date.clone())
                .unwrap_or_default(),
        }
    }
}

/// Current and next meeting; absent fields are omitted from the JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_meeting: Option<Meeting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_meeting: Option<Meeting>,
}

impl MeetingResponse {
    /// One-line plain text rendering of the nearest meeting
    pub fn to_text(&self) -> String {
        match self.current_meeting.as_ref().or(self.next_meeting.as_ref()) {
            Some(meeting) => format!("Next meeting: {} ({})", meeting.name, meeting.start),
            None => "No upcoming meetings found.".to_string(),
        }
    }
}
