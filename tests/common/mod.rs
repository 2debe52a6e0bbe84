#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{DateTime, Utc};
use meetbeacon::components::meetings::WorkingLocationPolicy;
use meetbeacon::components::oauth::{
    OAuthManager, OAuthSettings, StateStore, TokenStore, CALENDAR_READONLY_SCOPE,
};
use meetbeacon::components::{CalendarEvent, CalendarProvider, EventQuery};
use meetbeacon::error::{google_calendar_error, AppResult};
use meetbeacon::web::{AppState, CalendarSettings, Session};
use std::path::Path;
use std::sync::{Arc, Mutex};
use url::Url;

pub const CLIENT_ID: &str = "client-123.apps.googleusercontent.com";
pub const REDIRECT_URL: &str = "http://localhost:8080/callback";

/// In-memory calendar that records the queries it receives
#[derive(Default)]
pub struct FakeCalendar {
    events: Vec<CalendarEvent>,
    fail: bool,
    pub queries: Mutex<Vec<(String, EventQuery)>>,
}

impl FakeCalendar {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recorded_queries(&self) -> Vec<(String, EventQuery)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<CalendarEvent>> {
        self.queries
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), query.clone()));

        if self.fail {
            return Err(google_calendar_error(
                "Failed to fetch events: HTTP 401 Unauthorized - invalid_grant",
            ));
        }
        Ok(self.events.clone())
    }
}

pub fn timed_event(name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id: name.to_lowercase().replace(' ', "-"),
        summary: Some(name.to_string()),
        start_date_time: Some(start.to_rfc3339()),
        end_date_time: Some(end.to_rfc3339()),
        event_type: Some("default".to_string()),
        ..Default::default()
    }
}

pub fn working_location_event(start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        event_type: Some("workingLocation".to_string()),
        ..timed_event("Home", start, end)
    }
}

pub fn oauth_manager(provider_base: &str, token_path: &Path) -> OAuthManager {
    OAuthManager::new(
        OAuthSettings {
            client_id: CLIENT_ID.to_string(),
            client_secret: "client-secret".to_string(),
            redirect_url: REDIRECT_URL.to_string(),
            auth_url: format!("{}/o/oauth2/auth", provider_base),
            token_url: format!("{}/token", provider_base),
            scopes: vec![CALENDAR_READONLY_SCOPE.to_string()],
        },
        TokenStore::new(token_path),
    )
    .unwrap()
}

pub fn app_state(
    provider_base: &str,
    token_path: &Path,
    session: Session,
    working_locations: WorkingLocationPolicy,
) -> AppState {
    AppState {
        oauth: oauth_manager(provider_base, token_path),
        states: Arc::new(StateStore::default()),
        session: Arc::new(session),
        calendar: Arc::new(CalendarSettings {
            calendar_id: "primary".to_string(),
            api_base: Url::parse(provider_base).unwrap(),
            timezone: chrono_tz::Tz::UTC,
            working_locations,
        }),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
