//! Config file loading (JSON / YAML)
//!
//! Tunables such as draw costs, pity thresholds and house edge live in
//! plain serde structs; this module reads and writes them and runs their
//! validation so bad files fail at startup rather than mid-draw.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{CoreError, CoreResult};

/// Supported config encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(CoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Config structs that can check their own invariants
pub trait Validate {
    fn validate(&self) -> CoreResult<()>;
}

/// Parse config text in the given format
pub fn parse_config<T: DeserializeOwned>(text: &str, format: ConfigFormat) -> CoreResult<T> {
    let value = match format {
        ConfigFormat::Json => serde_json::from_str(text)?,
        ConfigFormat::Yaml => serde_yml::from_str(text)?,
    };
    Ok(value)
}

/// Load a config file, format chosen by extension
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> CoreResult<T> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    log::debug!("Loading {:?} config from {}", format, path.display());
    parse_config(&text, format)
}

/// Load a config file and run its validation
pub fn load_validated<T: DeserializeOwned + Validate>(path: impl AsRef<Path>) -> CoreResult<T> {
    let config: T = load_config(path)?;
    config.validate()?;
    Ok(config)
}

/// Write a config file, format chosen by extension
pub fn save_config<T: Serialize>(value: &T, path: impl AsRef<Path>) -> CoreResult<()> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let text = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(value)?,
        ConfigFormat::Yaml => serde_yml::to_string(value)?,
    };
    fs::write(path, text)?;
    Ok(())
}
