use crate::components::meetings::WorkingLocationPolicy;
use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use url::Url;

/// Google OAuth consent endpoint
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google OAuth token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Google Calendar v3 REST base
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

pub const DEFAULT_TOKEN_FILE: &str = "token.json";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const HTTP_PORT: u16 = 8080;
pub const HTTPS_PORT: u16 = 443;

/// Certificate and key used for TLS-terminated serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URL registered with the OAuth provider
    pub redirect_url: String,
    /// OAuth consent endpoint
    pub auth_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Calendar API base URL
    pub calendar_api_base: Url,
    /// Calendar to query
    pub calendar_id: String,
    /// Where the OAuth token is persisted
    pub token_file: PathBuf,
    /// Time zone that defines "today" and all-day boundaries
    pub timezone: Tz,
    /// Whether `/meetings` lists working location entries
    pub working_locations: WorkingLocationPolicy,
    /// TLS settings, when both certificate and key are configured
    pub tls: Option<TlsConfig>,
    pub bind_address: IpAddr,
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn load() -> AppResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| env_error(key));

        let redirect_url = required("REDIRECT_URL")?;
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;

        let tls = match (var("TLS_CERT_FILE"), var("TLS_KEY_FILE")) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_file: PathBuf::from(cert),
                key_file: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => {
                return Err(config_error(
                    "TLS_CERT_FILE and TLS_KEY_FILE must be set together",
                ))
            }
        };

        let timezone_name = var("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid TIMEZONE: {}", timezone_name)))?;

        let working_locations = match var("LIST_WORKING_LOCATIONS") {
            Some(value) if parse_flag(&value)? => WorkingLocationPolicy::Include,
            _ => WorkingLocationPolicy::Exclude,
        };

        let bind_address = match var("BIND_ADDRESS") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| config_error(&format!("Invalid BIND_ADDRESS: {}", value)))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let calendar_api_base = parse_base_url(
            "CALENDAR_API_BASE",
            &var("CALENDAR_API_BASE").unwrap_or_else(|| GOOGLE_CALENDAR_API.to_string()),
        )?;

        let default_port = if tls.is_some() { HTTPS_PORT } else { HTTP_PORT };
        let port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| config_error(&format!("Invalid PORT: {}", value)))?,
            None => default_port,
        };

        Ok(Config {
            client_id,
            client_secret,
            redirect_url,
            auth_url: var("OAUTH_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
            token_url: var("OAUTH_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            calendar_api_base,
            calendar_id: var("CALENDAR_ID").unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string()),
            token_file: var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
            timezone,
            working_locations,
            tls,
            bind_address,
            port,
        })
    }
}

/// Parse a URL that paths get appended to
fn parse_base_url(key: &str, value: &str) -> AppResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| config_error(&format!("Invalid {}: {} ({})", key, value, e)))?;
    if url.cannot_be_a_base() {
        return Err(config_error(&format!("{} cannot be a base URL: {}", key, value)));
    }
    Ok(url)
}

fn parse_flag(value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(config_error(&format!("Invalid boolean value: {}", other))),
    }
}
