//! Configuration file handling.
//!
//! Lives at `$CUEMARK_CONFIG` or `<config dir>/cuemark/config.toml`. Every
//! field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};

use crate::document::RecordFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CUEMARK_CONFIG";

/// Marker labelling and document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Label prefix; also how records are recognised when reading, so
    /// changing it hides markers written with the old prefix
    pub prefix: String,
    /// Seconds each marker stays visible in a subtitle renderer
    pub display_duration: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            prefix: "Marker".to_string(),
            display_duration: 2.0,
        }
    }
}

/// Feedback message settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Seconds a feedback message stays on screen
    pub osd_duration: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { osd_duration: 2.0 }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markers: MarkerConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("cuemark").join("config.toml"))
    }

    /// Load the config from its default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load the config from `path`, falling back to defaults when it does
    /// not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Reject values that would corrupt documents or make no sense.
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.markers.prefix;
        if prefix.trim().is_empty() {
            bail!("markers.prefix must not be empty");
        }
        if prefix.contains([',', '\n', '\r']) {
            bail!("markers.prefix must not contain commas or line breaks");
        }
        check_duration("markers.display_duration", self.markers.display_duration)?;
        check_duration("display.osd_duration", self.display.osd_duration)?;
        Ok(())
    }

    /// Record layout used for the backing document.
    pub fn record_format(&self) -> RecordFormat {
        RecordFormat {
            prefix: self.markers.prefix.clone(),
            display_duration: self.markers.display_duration,
        }
    }
}

fn check_duration(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{} must be a non-negative number of seconds (got {})", name, value);
    }
    Ok(())
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, Default)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that were missing entirely
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add fields missing from `content` using the default config.
///
/// Existing values, comments and unknown keys are preserved.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Failed to parse config as TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Failed to build default config")?;

    let mut result = MigrateResult::default();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        match doc.get_mut(section) {
            None => {
                doc.insert(section, Item::Table(default_table.clone()));
                result.sections_added.push(section.to_string());
                for (key, _) in default_table.iter() {
                    result.added_fields.push(format!("{}.{}", section, key));
                }
            }
            Some(existing) => {
                let Some(table) = existing.as_table_like_mut() else {
                    bail!("Config entry '{}' must be a table", section);
                };
                for (key, value) in default_table.iter() {
                    if table.get(key).is_none() {
                        table.insert(key, value.clone());
                        result.added_fields.push(format!("{}.{}", section, key));
                    }
                }
            }
        }
    }

    result.content = doc.to_string();
    Ok(result)
}
