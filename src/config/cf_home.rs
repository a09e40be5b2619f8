//! CF CLI config (`.cf/config.json`) discovery.
//!
//! The CF CLI keeps the targeted API endpoint and the current access token
//! here; reading it lets the tool run without any config of its own.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::config::schema::ApiConfig;

/// The subset of the CF CLI config the lookup needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfCliConfig {
    #[serde(rename = "Target", default)]
    pub target: String,

    #[serde(rename = "AccessToken", default)]
    pub access_token: String,

    #[serde(rename = "SSLDisabled", default)]
    pub ssl_disabled: bool,
}

impl CfCliConfig {
    /// Locate and read the CF CLI config. `Ok(None)` if there is none.
    pub fn discover(cf_home: Option<&str>) -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path(cf_home) else {
            return Ok(None);
        };
        Self::read(&path)
    }

    /// Read a specific config file. A missing file is not an error.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No CF CLI config found");
                return Ok(None);
            }
            Err(e) => return Err(ConfigError::Io(path.to_path_buf(), e)),
        };

        let config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::CfConfig(path.to_path_buf(), e))?;
        tracing::debug!(path = %path.display(), "CF CLI config loaded");
        Ok(Some(config))
    }

    /// Fill fields the operator did not set explicitly.
    pub fn fill(&self, api: &mut ApiConfig) {
        if api.endpoint.is_none() && !self.target.is_empty() {
            api.endpoint = Some(self.target.clone());
        }
        if api.access_token.is_none() && !self.access_token.is_empty() {
            api.access_token = Some(self.access_token.clone());
        }
        api.skip_ssl_validation |= self.ssl_disabled;
    }
}

/// `<cf_home>/.cf/config.json`, with `$CF_HOME` then `$HOME` as fallbacks.
fn config_path(cf_home: Option<&str>) -> Option<PathBuf> {
    let home = cf_home
        .map(PathBuf::from)
        .or_else(|| env::var_os("CF_HOME").map(PathBuf::from))
        .or_else(|| env::var_os("HOME").map(PathBuf::from))?;
    Some(home.join(".cf").join("config.json"))
}
