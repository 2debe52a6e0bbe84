use crate::components::oauth::{OAuthManager, OAuthSettings, StateStore, TokenStore};
use crate::components::GoogleCalendarClient;
use crate::config::Config;
use crate::error::{config_error, AppResult, Error};
use crate::shutdown;
use crate::web::{self, AppState, CalendarSettings, Session};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config; missing required settings are fatal
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the shared handler state, restoring a stored session if there is one
pub async fn build_state(config: &Config) -> AppResult<AppState> {
    let store = TokenStore::new(&config.token_file);
    let oauth = OAuthManager::new(OAuthSettings::from_config(config), store)?;
    let session = Arc::new(Session::new());

    match oauth.restore().await {
        Ok(client) => {
            let calendar = GoogleCalendarClient::new(client, config.calendar_api_base.clone());
            session.install(Arc::new(calendar)).await;
            info!(
                "Restored session from {}",
                oauth.store().path().display()
            );
        }
        Err(e) => {
            warn!(
                "No usable token at {} ({}), visit /login to authenticate",
                oauth.store().path().display(),
                e
            );
        }
    }

    Ok(AppState {
        oauth,
        states: Arc::new(StateStore::default()),
        session,
        calendar: Arc::new(CalendarSettings::from_config(config)),
    })
}

/// Serve until a shutdown signal arrives
pub async fn start_server(config: Config) -> AppResult<()> {
    let state = build_state(&config).await?;
    let app = web::router(state);
    let addr = SocketAddr::new(config.bind_address, config.port);

    match &config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
                .await
                .map_err(|e| config_error(&format!("Failed to load TLS certificate: {}", e)))?;

            let handle = axum_server::Handle::new();
            tokio::spawn(shutdown::graceful_shutdown(handle.clone()));

            info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, rustls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown::wait_for_signal())
                .await?;
        }
    }

    info!("Server stopped");
    Ok(())
}
