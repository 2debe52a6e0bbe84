use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Tokens are treated as expired this long before their actual expiry
const EXPIRY_LEEWAY_SECS: i64 = 10;

/// OAuth token as persisted on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absent means the token never expires
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_expiry"
    )]
    pub expiry: Option<DateTime<Utc>>,
}

/// Go's oauth2 package writes the zero time (`0001-01-01T00:00:00Z`) for
/// tokens without an expiry
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let expiry = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(expiry.filter(|expiry| expiry.year() > 1))
}

impl OAuthToken {
    /// Check whether the token must be refreshed before use at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry
                .checked_sub_signed(Duration::seconds(EXPIRY_LEEWAY_SECS))
                .map_or(true, |deadline| deadline <= now),
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let token_type = if self.token_type.is_empty() || self.token_type.eq_ignore_ascii_case("bearer") {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", token_type, self.access_token)
    }
}

/// Successful token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    pub(crate) fn into_token(self, issued_at: DateTime<Utc>) -> OAuthToken {
        OAuthToken {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: self.refresh_token,
            // Out-of-range lifetimes are treated as non-expiring
            expiry: self
                .expires_in
                .filter(|secs| *secs > 0)
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| issued_at.checked_add_signed(lifetime)),
        }
    }
}
