use super::models::{CalendarEvent, EventQuery};
use crate::components::oauth::AuthorizedClient;
use crate::components::CalendarProvider;
use crate::error::{google_calendar_error, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Google Calendar v3 REST client
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    client: AuthorizedClient,
    api_base: Url,
}

impl GoogleCalendarClient {
    /// `api_base` is validated when configuration is loaded
    pub fn new(client: AuthorizedClient, api_base: Url) -> Self {
        Self { client, api_base }
    }

    fn events_url(&self, calendar_id: &str, query: &EventQuery) -> AppResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| google_calendar_error("Calendar API URL cannot be a base"))?
            .pop_if_empty()
            .extend(&["calendars", calendar_id, "events"]);

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("showDeleted", "false")
                .append_pair("singleEvents", "true")
                .append_pair("orderBy", "startTime")
                .append_pair("timeMin", &query.time_min.to_rfc3339());
            if let Some(time_max) = query.time_max {
                pairs.append_pair("timeMax", &time_max.to_rfc3339());
            }
            if let Some(max_results) = query.max_results {
                pairs.append_pair("maxResults", &max_results.to_string());
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<CalendarEvent>> {
        let url = self.events_url(calendar_id, query)?;
        debug!("Fetching events: {}", url);

        let response = self.client.get(url).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let list: EventList = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(list.items.into_iter().map(CalendarEvent::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    #[serde(default)]
    id: String,
    summary: Option<String>,
    #[serde(default)]
    start: ApiEventDateTime,
    #[serde(default)]
    end: ApiEventDateTime,
    event_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventDateTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl From<ApiEvent> for CalendarEvent {
    fn from(event: ApiEvent) -> Self {
        CalendarEvent {
            id: event.id,
            summary: event.summary,
            start_date_time: event.start.date_time,
            start_date: event.start.date,
            end_date_time: event.end.date_time,
            end_date: event.end.date,
            event_type: event.event_type,
        }
    }
}
