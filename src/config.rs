use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_PREFIX: &str = "sheet-uploader";

/// Settings loaded from `~/.config/sheet-uploader/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Endpoint receiving the spreadsheet and answering with the generated file.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Multipart field name carrying the file.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Prefix of the generated name when the response suggests none.
    #[serde(default = "default_fallback_prefix")]
    pub fallback_prefix: String,
    /// Where downloads are saved. Defaults to ~/Downloads, or the working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Whole-request timeout; 0 disables it. The free-tier endpoint can take a while to wake up.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    "https://feriasfacil-api.onrender.com/api/generate".to_string()
}

fn default_timeout_secs() -> Option<u64> {
    Some(180)
}

fn default_field_name() -> String {
    "file".to_string()
}

fn default_fallback_prefix() -> String {
    "ferias-facil".to_string()
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            field_name: default_field_name(),
            fallback_prefix: default_fallback_prefix(),
            download_dir: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl UploaderConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn resolve_download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| Path::new(&home).join("Downloads"))
            .filter(|dir| dir.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: UploaderConfig = toml::from_str(data).context("invalid config.toml")?;
        reqwest::Url::parse(&cfg.endpoint)
            .with_context(|| format!("invalid endpoint URL: {}", cfg.endpoint))?;
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Loads the configuration, writing the defaults to disk on first run.
pub fn load_or_init() -> Result<UploaderConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

pub fn load_or_init_at(path: &Path) -> Result<UploaderConfig> {
    if !path.exists() {
        let default_cfg = UploaderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    UploaderConfig::from_toml(&data)
}
