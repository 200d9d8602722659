//! Layered application configuration.
//!
//! Values are resolved from built-in defaults, then an optional
//! `config.toml` inside the app config directory, then `DIAMONDS_*`
//! environment variables (`DIAMONDS_THEME__ACCENT` for nested keys).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name under the user's config directory.
pub const APP_DIR_NAME: &str = "diamonds";
/// File holding the persisted projects.
pub const DATA_FILE_NAME: &str = "data.json";
/// Optional user configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file written by the terminal UI.
pub const LOG_FILE_NAME: &str = "diamonds.log";

const ENV_PREFIX: &str = "DIAMONDS";

/// Failures while resolving or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no per-user config directory.
    #[error("could not get user config dir")]
    NoConfigDir,
    /// The app directory could not be created.
    #[error("could not create app config dir {}: {source}", path.display())]
    CreateDir {
        /// Directory that failed to be created.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// The default config file could not be written.
    #[error("could not write default config {}: {source}", path.display())]
    WriteDefault {
        /// Target config file.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// A layer held values of the wrong shape.
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Colors used by the terminal renderer, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Headers and the app title.
    pub accent: String,
    /// Regular text.
    pub text: String,
    /// Help lines and secondary text.
    pub muted: String,
    /// Highlighted list entries.
    pub selection: String,
    /// Border of the focused input box.
    pub border: String,
    /// Status message foreground.
    pub message_fg: String,
    /// Status message background.
    pub message_bg: String,
    /// Hex code foreground in the color list.
    pub code_fg: String,
    /// Hex code background in the color list.
    pub code_bg: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#F6FFFE".to_string(),
            text: "#E5E5E5".to_string(),
            muted: "#757575".to_string(),
            selection: "#BAF3EB".to_string(),
            border: "#FF59C8".to_string(),
            message_fg: "#F1F1F1".to_string(),
            message_bg: "#FF5F87".to_string(),
            code_fg: "#FF5F87".to_string(),
            code_bg: "#3A3A3A".to_string(),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON file holding all projects.
    pub data_file: PathBuf,
    /// File receiving tracing output.
    pub log_file: PathBuf,
    /// Renderer palette.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Load configuration rooted at the user's config directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_root()?)
    }

    /// Load configuration from an explicit app directory.
    pub fn load_from(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        let settings = config::Config::builder()
            .set_default(
                "data_file",
                root.join(DATA_FILE_NAME).to_string_lossy().into_owned(),
            )?
            .set_default(
                "log_file",
                root.join(LOG_FILE_NAME).to_string_lossy().into_owned(),
            )?
            .add_source(config::File::from(root.join(CONFIG_FILE_NAME)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Resolve `<config_dir>/diamonds` without touching the filesystem.
pub fn config_root() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Outcome of [`ensure_default_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    /// The app config directory.
    pub path: PathBuf,
    /// Whether a fresh `config.toml` was written on this run.
    pub created_default: bool,
}

/// Create the app directory and a commented `config.toml` if missing.
///
/// Runs before logging is installed, so nothing is logged here; callers
/// report `created_default` once a subscriber exists.
pub fn ensure_default_config() -> Result<ConfigRoot, ConfigError> {
    let path = config_root()?;
    let created_default = ensure_default_config_in(&path)?;
    Ok(ConfigRoot {
        path,
        created_default,
    })
}

/// Same as [`ensure_default_config`] for an explicit directory. Returns
/// `true` when the default file was written.
pub fn ensure_default_config_in(root: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let root = root.as_ref();
    fs::create_dir_all(root).map_err(|source| ConfigError::CreateDir {
        path: root.to_path_buf(),
        source,
    })?;

    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Ok(false);
    }

    fs::write(&path, default_config_contents())
        .map_err(|source| ConfigError::WriteDefault { path, source })?;
    Ok(true)
}

fn default_config_contents() -> String {
    let theme = ThemeConfig::default();
    format!(
        r##"# Diamonds configuration.
#
# data_file = "/path/to/data.json"
# log_file = "/path/to/diamonds.log"

[theme]
accent = "{}"
text = "{}"
muted = "{}"
selection = "{}"
border = "{}"
message_fg = "{}"
message_bg = "{}"
code_fg = "{}"
code_bg = "{}"
"##,
        theme.accent,
        theme.text,
        theme.muted,
        theme.selection,
        theme.border,
        theme.message_fg,
        theme.message_bg,
        theme.code_fg,
        theme.code_bg,
    )
}
