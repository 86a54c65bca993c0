//! Loads `MaskingConfig` from YAML or TOML files

use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use fieldmask_core::{Error, Result};

use crate::config::MaskingConfig;

/// Reads the masking configuration file once at startup
///
/// The format follows the file extension: `.toml` is parsed as TOML,
/// anything else as YAML.
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    /// Path to the configuration file
    config_path: PathBuf,
}

impl FileConfigLoader {
    /// Create a loader for an existing configuration file
    ///
    /// # Errors
    /// - `Error::ConfigNotFound` if the file doesn't exist
    /// - `Error::Config` if `~` cannot be expanded
    pub fn new(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = expand_tilde(config_path.into())?;

        if !config_path.exists() {
            return Err(Error::ConfigNotFound);
        }

        debug!("Initialized FileConfigLoader for {:?}", config_path);

        Ok(Self { config_path })
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Read, parse and validate the configuration file
    pub fn load(&self) -> Result<MaskingConfig> {
        let contents = std::fs::read_to_string(&self.config_path).map_err(|e| {
            error!("Failed to read config file: {}", e);
            Error::Io(e)
        })?;

        let config = if is_toml(&self.config_path) {
            toml::from_str::<MaskingConfig>(&contents).map_err(|e| {
                error!("Failed to parse TOML config: {}", e);
                Error::Config(format!("Invalid TOML: {}", e))
            })?
        } else {
            serde_yaml::from_str::<MaskingConfig>(&contents).map_err(|e| {
                error!("Failed to parse YAML config: {}", e);
                Error::Config(format!("Invalid YAML: {}", e))
            })?
        };

        config.validate()?;

        info!(
            "Loaded masking config from {:?} ({} path rules, {} sensitive keys)",
            self.config_path,
            config.masking.mappings.len(),
            config.legacy.sensitive_keys.len()
        );
        Ok(config)
    }

    /// Write `config` to a new file, in the format its extension selects
    pub fn create(config_path: impl Into<PathBuf>, config: &MaskingConfig) -> Result<Self> {
        let config_path = expand_tilde(config_path.into())?;

        let contents = if is_toml(&config_path) {
            toml::to_string_pretty(config).map_err(|e| {
                error!("Failed to serialize TOML: {}", e);
                Error::Config(format!("TOML serialization error: {}", e))
            })?
        } else {
            serde_yaml::to_string(config).map_err(|e| {
                error!("Failed to serialize YAML: {}", e);
                Error::Config(format!("YAML serialization error: {}", e))
            })?
        };

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, contents).map_err(|e| {
            error!("Failed to write config file: {}", e);
            Error::Io(e)
        })?;

        info!("Wrote masking config to {:?}", config_path);
        Ok(Self { config_path })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

fn expand_tilde(path: PathBuf) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path);
    };

    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(rest))
}
