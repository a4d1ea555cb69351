use crate::error::{AppError, Result};
use crate::git::GitCache;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User-tunable settings. The file is optional and every field has a default,
/// so a missing or broken config never breaks rendering.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
  // Где лежит кеш git-статуса (общий для всех вызовов на хосте)
  pub cache_file: PathBuf,

  // Сколько секунд запись в кеше считается свежей
  pub cache_ttl_secs: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      cache_file: env::temp_dir().join("fast-statusline-git.cache"),
      cache_ttl_secs: 5,
    }
  }
}

impl Config {
  /// Resolve the config path: env override first, then the platform config dir.
  fn find_file() -> Option<PathBuf> {
    env::var("FAST_STATUSLINE_CONFIG")
      .ok()
      .map(PathBuf::from)
      .or_else(|| dirs::config_dir().map(|d| d.join("fast-statusline").join("config.toml")))
      .filter(|path| path.exists())
  }

  fn try_load(path: &PathBuf) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| AppError::ConfigInvalid {
      path: path.clone(),
      details: format!("Failed to read toml file: {}", e),
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| AppError::ConfigInvalid {
      path: path.clone(),
      details: format!("Invalid TOML: {}", e),
    })?;

    Ok(config)
  }

  /// Load the config, falling back to defaults on any failure.
  pub fn load() -> Config {
    match Self::find_file() {
      Some(path) => Self::try_load(&path).unwrap_or_default(),
      None => Config::default(),
    }
  }

  pub fn cache(&self) -> GitCache {
    GitCache::new(&self.cache_file, Duration::from_secs(self.cache_ttl_secs))
  }
}
