use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Overrides the directory holding `config.json` and `credentials.json`.
pub const CONFIG_DIR_ENV: &str = "SUSTINDEX_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustindexConfig {
    /// Schema version. Missing means hand-written.
    #[serde(default = "current_version")]
    pub config_version: u32,
    /// Backend base URL, ending in `/api/`.
    pub api_url: String,
    /// Sent to the backend as `Accept-Language`.
    #[serde(default = "default_language")]
    pub language: String,
    pub created_at: jiff::Timestamp,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl SustindexConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_url: api_url.into(),
            language: default_language(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl Default for SustindexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// `$SUSTINDEX_CONFIG_DIR`, else `<platform config dir>/sustindex`.
pub fn config_dir() -> eyre::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("sustindex"))
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn has_config(dir: &Path) -> bool {
    config_path(dir).exists()
}

pub fn load_config(dir: &Path) -> eyre::Result<SustindexConfig> {
    let path = config_path(dir);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(CURRENT_VERSION, |v| v as u32);

    let migrated = migrate(json, on_disk_version)?;
    let config: SustindexConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config, writing a default one on first run.
pub fn load_or_init(dir: &Path) -> eyre::Result<SustindexConfig> {
    if has_config(dir) {
        return load_config(dir);
    }
    let config = SustindexConfig::default();
    save_config(dir, &config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Version 1 is the first shape, so there are no steps yet; a file without
/// `config_version` is read as v1 and restamped on the next save.
pub fn migrate(json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update sustindex."
        ));
    }
    Ok(json)
}

pub fn save_config(dir: &Path, config: &SustindexConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = config_path(dir);
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join(format!("{CONFIG_FILE}.tmp"));
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

/// The backend URL to use: an explicit override (flag or
/// `SUSTINDEX_API_URL`) wins over the stored one.
pub fn resolve_api_url(override_url: Option<&str>, config: &SustindexConfig) -> String {
    override_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(&config.api_url)
        .to_string()
}
