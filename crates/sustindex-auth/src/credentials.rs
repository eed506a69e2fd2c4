use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const FILE_NAME: &str = "credentials.json";

/// The token pair kept between runs, the way a browser keeps it in local
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub username: Option<String>,
    pub saved_at: jiff::Timestamp,
}

/// File-backed credential storage in a single directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The stored credential, or `None` when nothing has been saved.
    pub fn load(&self) -> Result<Option<StoredCredential>, AuthError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, credential: &StoredCredential) -> Result<(), AuthError> {
        std::fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(credential)?;
        let tmp_path = self.dir.join(format!("{FILE_NAME}.tmp"));
        std::fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let path = self.path();
        std::fs::rename(&tmp_path, &path)?;
        tracing::debug!(path = %path.display(), "credential saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::info!(path = %path.display(), "credential cleared");
        }
        Ok(())
    }
}
