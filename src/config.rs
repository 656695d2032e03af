use crate::controller::command::DEFAULT_CONTROLLER;
use crate::domain::ReleaseTagPattern;
use crate::error::{Result, SelectorError};
use crate::git::repository::DIRTY_SUFFIX;
use crate::registry::snap::{DEFAULT_REGISTRY, DEFAULT_STABLE_LABEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that may point at a configuration file
pub const CONFIG_ENV: &str = "RELEASE_SELECTOR_CONFIG";

/// Configuration file name searched in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "release-selector.toml";

/// Represents the complete configuration for release-selector.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Environment variable naming the package to look up in the registry
    #[serde(default = "default_package_name_env")]
    pub package_name_env: String,

    /// Regex a tag must match to count as a release
    #[serde(default = "default_release_tag_pattern")]
    pub release_tag_pattern: String,

    /// Label preceding the stable channel version in registry output
    #[serde(default = "default_stable_label")]
    pub stable_label: String,

    /// Appended to the describe string when the tree is modified
    #[serde(default = "default_dirty_suffix")]
    pub dirty_suffix: String,

    #[serde(default)]
    pub commands: CommandsConfig,
}

fn default_package_name_env() -> String {
    "SNAPCRAFT_PROJECT_NAME".to_string()
}

fn default_release_tag_pattern() -> String {
    ReleaseTagPattern::DEFAULT.to_string()
}

fn default_stable_label() -> String {
    DEFAULT_STABLE_LABEL.to_string()
}

fn default_dirty_suffix() -> String {
    DIRTY_SUFFIX.to_string()
}

/// External programs the selector invokes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_controller")]
    pub controller: String,

    #[serde(default = "default_registry")]
    pub registry: String,
}

fn default_controller() -> String {
    DEFAULT_CONTROLLER.to_string()
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            controller: default_controller(),
            registry: default_registry(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package_name_env: default_package_name_env(),
            release_tag_pattern: default_release_tag_pattern(),
            stable_label: default_stable_label(),
            dirty_suffix: default_dirty_suffix(),
            commands: CommandsConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later in the run
    pub fn validate(&self) -> Result<()> {
        if self.package_name_env.trim().is_empty() {
            return Err(SelectorError::config("package_name_env must not be empty"));
        }
        if self.stable_label.trim().is_empty() {
            return Err(SelectorError::config("stable_label must not be empty"));
        }
        if self.commands.controller.trim().is_empty() || self.commands.registry.trim().is_empty()
        {
            return Err(SelectorError::config("command names must not be empty"));
        }
        self.tag_pattern()?;
        Ok(())
    }

    pub fn tag_pattern(&self) -> Result<ReleaseTagPattern> {
        ReleaseTagPattern::new(&self.release_tag_pattern)
    }

    /// Read the package name from the configured environment variable
    ///
    /// Unset, empty, and non-unicode values all read as absent.
    pub fn package_name_from_env(&self) -> Option<String> {
        std::env::var(&self.package_name_env)
            .ok()
            .filter(|name| !name.is_empty())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Path named by `RELEASE_SELECTOR_CONFIG` (must exist)
/// 2. `release-selector.toml` in the current directory
/// 3. `release-selector.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config() -> Result<Config> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_config_from(explicit.as_deref(), dirs::config_dir().as_deref())
}

/// [load_config] with the search locations passed in
pub fn load_config_from(explicit: Option<&Path>, config_dir: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [Some(Path::new(".")), config_dir]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.exists()),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(&path).map_err(|e| {
                SelectorError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}
