use std::path::{Path, PathBuf};

use crate::models::Settings;

pub const SETTINGS_ENV: &str = "DAILY_TODO_SETTINGS";

/// Failure to load the settings file; both variants keep the offending path.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read settings {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => write!(
                f,
                "invalid settings {} (line {}, column {}): {source}",
                path.display(),
                source.line(),
                source.column()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

pub fn settings_path_from_env() -> Option<PathBuf> {
    std::env::var_os(SETTINGS_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Loads settings from a JSON file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            log::info!("settings file not found path={}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let settings: Settings = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "settings loaded path={} language={} seed_sample_data={}",
        path.display(),
        settings.language,
        settings.seed_sample_data
    );
    Ok(settings)
}
