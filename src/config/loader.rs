//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::cf_home::CfCliConfig;
use crate::config::schema::LookupConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    CfConfig(PathBuf, serde_json::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::CfConfig(path, e) => {
                write!(f, "invalid CF CLI config {}: {}", path.display(), e)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a TOML file, or defaults when no file is given.
///
/// The result is not validated yet: CLI flags and the CF CLI config are
/// merged first, see [`finalize_config`].
pub fn load_config(path: Option<&Path>) -> Result<LookupConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(LookupConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config: LookupConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Fill missing API settings from the CF CLI config, then validate.
pub fn finalize_config(mut config: LookupConfig) -> Result<LookupConfig, ConfigError> {
    if config.api.endpoint.is_none() || config.api.access_token.is_none() {
        if let Some(cf) = CfCliConfig::discover(config.api.cf_home.as_deref())? {
            cf.fill(&mut config.api);
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
