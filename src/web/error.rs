use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

/// Errors a request handler can answer with
#[derive(Debug)]
pub enum ApiError {
    /// No authenticated calendar client yet
    NotAuthenticated,
    /// Callback arrived without an authorization code
    MissingCode,
    /// Callback state was unknown, reused or expired
    InvalidState,
    /// The user or provider refused authorization
    AccessDenied(String),
    /// Code exchange with the OAuth provider failed
    Exchange(Error),
    /// Listing events failed
    Calendar(Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                "Not logged in. Visit /login to connect your calendar.",
            )
                .into_response(),
            ApiError::MissingCode => {
                (StatusCode::BAD_REQUEST, "Missing authorization code").into_response()
            }
            ApiError::InvalidState => {
                warn!("OAuth callback with unknown or expired state");
                (
                    StatusCode::BAD_REQUEST,
                    Html(
                        "Invalid or expired login attempt. <a href=\"/login\">Log in again</a>"
                            .to_string(),
                    ),
                )
                    .into_response()
            }
            ApiError::AccessDenied(reason) => {
                warn!("Authorization denied: {}", reason);
                (
                    StatusCode::UNAUTHORIZED,
                    Html(format!(
                        "Authorization was denied: {}. <a href=\"/login\">Try again</a>",
                        escape_html(&reason)
                    )),
                )
                    .into_response()
            }
            ApiError::Exchange(err) => {
                error!("Failed to exchange token: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to exchange token: {}", err),
                )
                    .into_response()
            }
            ApiError::Calendar(err) => {
                error!("Unable to retrieve events: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!(
                        "Unable to retrieve events: {}. <a href=\"/login\">Log in again</a>",
                        escape_html(&err.to_string())
                    )),
                )
                    .into_response()
            }
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
