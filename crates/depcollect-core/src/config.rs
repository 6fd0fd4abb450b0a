use crate::export::ExportFormat;
use depcollect_deps::{CollectOptions, DEFAULT_MANIFEST};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
///
/// Loaded from a TOML file, then overridden by CLI flags.
/// Priority: CLI > File > Defaults.
///
/// Every section is declared up front. Unknown sections or keys are a
/// configuration error instead of being silently carried along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub collect: CollectConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is no file
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("depcollect");

        Ok(config_dir.join("config.toml"))
    }

    /// Options handed to the collector
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            manifest_name: self.collect.manifest.clone(),
            skip_comments: self.collect.skip_comments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectConfig {
    /// Folder whose subdirectories are the projects
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Manifest file name inside each project
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Treat `#` lines as comments
    #[serde(default)]
    pub skip_comments: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("../components")
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest: default_manifest(),
            skip_comments: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: ExportFormat,
}
