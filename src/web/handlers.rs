use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ApiError;
use super::AppState;
use crate::components::google_calendar::time::day_window;
use crate::components::meetings::{list_meetings, select_meetings, Meeting};
use crate::components::{CalendarProvider, EventQuery, GoogleCalendarClient};
use crate::error::other_error;

/// How many upcoming events `/next-meeting` looks at
pub const NEXT_MEETING_LOOKAHEAD: u32 = 10;

/// Query parameters sent back by the OAuth provider
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextMeetingParams {
    /// `text` selects the plain text rendering
    pub format: Option<String>,
}

/// Handler for the index page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

/// Redirect to the provider's consent page with a fresh state nonce
pub async fn login_handler(State(state): State<AppState>) -> Redirect {
    let nonce = state.states.issue();
    let url = state.oauth.authorization_url(&nonce);
    debug!("Redirecting to OAuth consent page");
    Redirect::temporary(url.as_str())
}

/// Complete the OAuth flow and sign the session in
pub async fn callback_handler(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError> {
    if let Some(reason) = params.error {
        return Err(ApiError::AccessDenied(reason));
    }

    if !state.states.consume(params.state.as_deref().unwrap_or_default()) {
        return Err(ApiError::InvalidState);
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(ApiError::MissingCode)?;

    let token = state
        .oauth
        .exchange_code(&code)
        .await
        .map_err(ApiError::Exchange)?;

    let client = state.oauth.client_from_token(token);
    let calendar = GoogleCalendarClient::new(client, state.calendar.api_base.clone());
    state.session.install(Arc::new(calendar)).await;
    info!("Signed in, calendar client installed");

    Ok(Redirect::temporary("/next-meeting"))
}

async fn signed_in_calendar(state: &AppState) -> Result<Arc<dyn CalendarProvider>, ApiError> {
    state
        .session
        .calendar()
        .await
        .ok_or(ApiError::NotAuthenticated)
}

/// Today's meetings as a JSON array
pub async fn meetings_handler(State(state): State<AppState>) -> Result<Json<Vec<Meeting>>, ApiError> {
    let calendar = signed_in_calendar(&state).await?;

    let (start, end) = day_window(Utc::now(), &state.calendar.timezone)
        .ok_or_else(|| ApiError::Calendar(other_error("Could not determine today's time window")))?;

    let events = calendar
        .list_events(&state.calendar.calendar_id, &EventQuery::between(start, end))
        .await
        .map_err(ApiError::Calendar)?;

    Ok(Json(list_meetings(&events, state.calendar.working_locations)))
}

/// Current and next meeting
pub async fn next_meeting_handler(
    State(state): State<AppState>,
    Query(params): Query<NextMeetingParams>,
) -> Result<Response, ApiError> {
    let calendar = signed_in_calendar(&state).await?;
    let now = Utc::now();

    let events = calendar
        .list_events(
            &state.calendar.calendar_id,
            &EventQuery::upcoming(now, NEXT_MEETING_LOOKAHEAD),
        )
        .await
        .map_err(ApiError::Calendar)?;

    let response = select_meetings(&events, now, &state.calendar.timezone);

    match params.format.as_deref() {
        Some("text") => Ok(response.to_text().into_response()),
        _ => Ok(Json(response).into_response()),
    }
}

/// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
