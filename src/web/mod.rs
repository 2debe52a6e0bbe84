mod error;
pub mod handlers;
mod session;

pub use error::ApiError;
pub use session::Session;

use crate::components::meetings::WorkingLocationPolicy;
use crate::components::oauth::{OAuthManager, StateStore};
use crate::config::Config;
use axum::{routing::get, Router};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use url::Url;

use handlers::{
    callback_handler, health_handler, index_handler, login_handler, meetings_handler,
    next_meeting_handler,
};

/// What to query and how to interpret it
#[derive(Debug, Clone)]
pub struct CalendarSettings {
    pub calendar_id: String,
    /// Base URL handed to the calendar client built after login
    pub api_base: Url,
    pub timezone: Tz,
    pub working_locations: WorkingLocationPolicy,
}

impl CalendarSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            calendar_id: config.calendar_id.clone(),
            api_base: config.calendar_api_base.clone(),
            timezone: config.timezone,
            working_locations: config.working_locations,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// OAuth client configuration and token lifecycle
    pub oauth: OAuthManager,
    /// Outstanding login attempts
    pub states: Arc<StateStore>,
    /// The signed-in calendar, injected into every handler
    pub session: Arc<Session>,
    pub calendar: Arc<CalendarSettings>,
}

/// Build the router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/meetings", get(meetings_handler))
        .route("/next-meeting", get(next_meeting_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
