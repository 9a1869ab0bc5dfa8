use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smartshop_core::{AuthConfig, BoxFuture, Session, SessionProvider, Token};
use snafu::ResultExt;

use super::state::{ParseSessionSnafu, ReadSessionSnafu, SettingsError, SettingsStore};

pub const SESSION_FILE_NAME: &str = "session.json";

/// On-disk shape written by the sign-in flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: Session,
    #[serde(default)]
    pub token: Option<Token>,
}

/// Reads the signed-in session from a JSON file, `None` when absent.
pub struct FileSessionProvider {
    path: PathBuf,
    auth: AuthConfig,
}

impl FileSessionProvider {
    pub fn new(path: PathBuf, auth: AuthConfig) -> Self {
        Self { path, auth }
    }

    pub fn load_default() -> Self {
        Self::new(
            SettingsStore::default_config_dir().join(SESSION_FILE_NAME),
            AuthConfig::from_env(),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<StoredSession>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).context(ReadSessionSnafu {
            stage: "read-session-file",
            path: self.path.clone(),
        })?;
        let stored = serde_json::from_str(&content).context(ParseSessionSnafu {
            stage: "parse-session-json",
            path: self.path.clone(),
        })?;
        Ok(Some(stored))
    }

    pub fn current(&self) -> Option<Session> {
        match self.read() {
            Ok(stored) => stored.map(|stored| {
                let token = stored
                    .token
                    .map(|token| self.auth.jwt_callback(token, stored.session.user.as_ref()));
                self.auth.session_callback(stored.session, token.as_ref())
            }),
            Err(error) => {
                tracing::warn!(error = %error, "ignoring unreadable session");
                None
            }
        }
    }
}

impl SessionProvider for FileSessionProvider {
    fn auth<'a>(&'a self) -> BoxFuture<'a, Option<Session>> {
        Box::pin(async move { self.current() })
    }
}
