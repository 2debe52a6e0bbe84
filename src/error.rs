use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(
        code(meetbeacon::environment),
        help("Set the variable in the environment or in a .env file")
    )]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(meetbeacon::config))]
    Config(String),

    #[error("OAuth error: {0}")]
    #[diagnostic(code(meetbeacon::oauth))]
    OAuth(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(meetbeacon::google_calendar))]
    GoogleCalendar(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(meetbeacon::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(meetbeacon::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(meetbeacon::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(meetbeacon::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create OAuth errors
pub fn oauth_error(message: &str) -> Error {
    Error::OAuth(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
