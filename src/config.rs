//! Import-alias overrides.
//!
//! Some import paths do not end in their package name (`gopkg.in/yaml.v3`,
//! `github.com/acme/lib/v2`). The configuration lists extra short names for
//! such paths so annotation references like `[yaml.Node]` can be qualified.
//!
//! ```yaml
//! replace:
//!   gopkg.in/yaml.v3:
//!     - yaml
//! ```
//!
//! The file is read once by the entry point and passed down explicitly.
//! A missing or unreadable configuration is not an error for generation:
//! loading falls back to an empty mapping.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_DIR: &str = ".ann";
pub const CONFIG_FILE_NAME: &str = "ann.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to fetch remote config")]
    Http(#[from] reqwest::Error),

    #[error("config file error")]
    Io(#[from] io::Error),

    #[error("invalid config")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot write remote config '{0}'")]
    RemoteNotWritable(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Import path to extra alias names.
    #[serde(default)]
    pub replace: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Extra aliases configured for an import path.
    pub fn aliases_for(&self, import_path: &str) -> &[String] {
        self.replace
            .get(import_path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append aliases for an import path, skipping ones already present.
    pub fn add(&mut self, import_path: &str, aliases: &[String]) {
        let entry = self.replace.entry(import_path.to_string()).or_default();
        for alias in aliases {
            if !entry.contains(alias) {
                entry.push(alias.clone());
            }
        }
    }

    /// Remove aliases for an import path, or the whole entry when `aliases`
    /// is empty. An entry left without aliases is dropped.
    ///
    /// Returns true if anything changed.
    pub fn remove(&mut self, import_path: &str, aliases: &[String]) -> bool {
        if aliases.is_empty() {
            return self.replace.remove(import_path).is_some();
        }

        let Some(entry) = self.replace.get_mut(import_path) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|alias| !aliases.contains(alias));
        let changed = entry.len() != before;
        if entry.is_empty() {
            self.replace.remove(import_path);
        }
        changed
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Local(PathBuf),
    /// Fetched with a plain HTTP GET.
    Remote(String),
}

impl ConfigSource {
    /// Values starting with `http` are URLs, everything else is a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http") {
            Self::Remote(value.to_string())
        } else {
            Self::Local(PathBuf::from(value))
        }
    }

    /// Default location: `<root>/.ann/ann.yml`.
    pub fn default_in(root: &Path) -> Self {
        Self::Local(root.join(CONFIG_DIR).join(CONFIG_FILE_NAME))
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Read and parse the configuration, surfacing every failure.
pub fn fetch_config(source: &ConfigSource) -> Result<Config, ConfigError> {
    let content = match source {
        ConfigSource::Local(path) => fs::read_to_string(path)?,
        ConfigSource::Remote(url) => reqwest::blocking::get(url)?
            .error_for_status()?
            .text()?,
    };
    Config::from_yaml(&content)
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if the configuration was read from its source, false if using defaults.
    pub from_source: bool,
}

/// Load the configuration, falling back to an empty mapping on any failure.
pub fn load_config(source: &ConfigSource) -> ConfigLoadResult {
    match fetch_config(source) {
        Ok(config) => ConfigLoadResult {
            config,
            from_source: true,
        },
        Err(err) => {
            debug!(%source, error = ?err, "using empty alias configuration");
            ConfigLoadResult {
                config: Config::default(),
                from_source: false,
            }
        }
    }
}

/// Persist the configuration to a local source, creating its directory.
pub fn save_config(config: &Config, source: &ConfigSource) -> Result<(), ConfigError> {
    let path = match source {
        ConfigSource::Local(path) => path,
        ConfigSource::Remote(url) => return Err(ConfigError::RemoteNotWritable(url.clone())),
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, config.to_yaml()?)?;
    Ok(())
}
