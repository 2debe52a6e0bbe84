use super::token::OAuthToken;
use crate::error::AppResult;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// File-backed storage for the single OAuth token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the token, replacing any previous one.
    ///
    /// The JSON is written to a temp file of its own next to the target and
    /// renamed over it, so neither a crash nor a concurrent save can leave a
    /// half-written token behind.
    pub async fn save(&self, token: &OAuthToken) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(token)?;
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Saved OAuth token to {}", self.path.display());
        Ok(())
    }

    /// Read the token back; fails if the file is missing or malformed
    pub async fn load(&self) -> AppResult<OAuthToken> {
        let bytes = fs::read(&self.path).await?;
        let token = serde_json::from_slice(&bytes)?;
        debug!("Loaded OAuth token from {}", self.path.display());
        Ok(token)
    }

    /// Unique per call, in the target's directory so the rename stays atomic
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(
            self.path
                .file_name()
                .unwrap_or_else(|| OsStr::new("token")),
        );
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}
