mod client;
mod manager;
pub mod state;
pub mod token;
pub mod token_store;

pub use client::AuthorizedClient;
pub use manager::{OAuthManager, OAuthSettings, CALENDAR_READONLY_SCOPE};
pub use state::StateStore;
pub use token::OAuthToken;
pub use token_store::TokenStore;
