use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// On-disk token file. Two keys survive from the original pages, which never
/// agreed on a single storage key: some wrote `jwt_token`, others
/// `auth_token`. Reads prefer `jwt_token`; writes fill both; eviction clears
/// both.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default)]
    jwt_token: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
}

/// File-backed bearer-token persistence — the local-storage analog.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted token, if any. A missing or unreadable file is
    /// treated the same as empty storage.
    pub fn load(&self) -> ClientResult<Option<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<TokenFile>(&raw) {
            Ok(file) => Ok(file.jwt_token.or(file.auth_token)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt token file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = TokenFile {
            jwt_token: Some(token.to_string()),
            auth_token: Some(token.to_string()),
        };
        let raw = serde_json::to_string_pretty(&file).map_err(anyhow::Error::from)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
