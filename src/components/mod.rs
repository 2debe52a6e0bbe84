use crate::error::AppResult;
use async_trait::async_trait;

// Export components
pub mod google_calendar;
pub mod meetings;
pub mod oauth;

pub use google_calendar::{CalendarEvent, EventQuery, GoogleCalendarClient};

/// Source of calendar events.
///
/// Google is the shipped implementation; anything that can list a calendar's
/// events in start order for a time window can stand in for it.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// List single (expanded) events of `calendar_id`, ordered by start time
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<CalendarEvent>>;
}
