use crate::components::CalendarProvider;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The signed-in calendar, if any.
///
/// Starts out empty (`NoSession`) unless a stored token could be restored,
/// and is replaced wholesale on every successful OAuth callback. Nothing ever
/// clears it.
#[derive(Default)]
pub struct Session {
    calendar: RwLock<Option<Arc<dyn CalendarProvider>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that is already signed in
    pub fn authenticated(calendar: Arc<dyn CalendarProvider>) -> Self {
        Self {
            calendar: RwLock::new(Some(calendar)),
        }
    }

    pub async fn install(&self, calendar: Arc<dyn CalendarProvider>) {
        *self.calendar.write().await = Some(calendar);
    }

    pub async fn calendar(&self) -> Option<Arc<dyn CalendarProvider>> {
        self.calendar.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.calendar.read().await.is_some()
    }
}
