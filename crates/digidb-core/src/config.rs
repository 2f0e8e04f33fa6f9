//! Generator configuration, loaded from a JSON file

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "docs/DIGIMON_STATS_DATABASE.md";
pub const DEFAULT_OUTPUT_DIR: &str = "resources/digimon";
pub const DEFAULT_EXTENSION: &str = "tres";
pub const DEFAULT_SCRIPT_PATH: &str = "res://scripts/data/digimon_data.gd";
pub const DEFAULT_SCRIPT_CLASS: &str = "DigimonData";

/// Name of the manifest written into the output root
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Where to read the database and how to write resources.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Stats database markdown document
    pub database: PathBuf,
    /// Root of the per-stage resource folders
    pub output_dir: PathBuf,
    pub extension: String,
    pub script_path: String,
    pub script_class: String,
    /// Write `manifest.json` after generating
    pub write_manifest: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            script_class: DEFAULT_SCRIPT_CLASS.to_string(),
            write_manifest: true,
        }
    }
}

impl GeneratorConfig {
    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate(path)?;
        Ok(config)
    }

    /// Save the config file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Path of the generation manifest under the output root
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: &str| Error::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(invalid("extension must be a bare file extension such as 'tres'"));
        }
        if self.script_class.trim().is_empty() {
            return Err(invalid("script_class must not be empty"));
        }
        Ok(())
    }
}
