//! Generation manifest recording what a run produced

use crate::error::{Error, Result};
use crate::record::{stage_counts, DigimonRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary of one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    /// When the resources were generated
    pub timestamp: DateTime<Utc>,
    /// Database document that was parsed
    pub database: PathBuf,
    /// Root the resources were written under
    pub output_dir: PathBuf,
    /// Records per stage folder name
    pub stage_counts: BTreeMap<String, usize>,
    /// Files that were written
    pub files: Vec<PathBuf>,
    /// Rows skipped because they could not be parsed
    pub skipped_rows: usize,
}

impl GenerationManifest {
    /// Build a manifest for records written just now
    pub fn new(
        database: PathBuf,
        output_dir: PathBuf,
        records: &[DigimonRecord],
        files: Vec<PathBuf>,
        skipped_rows: usize,
    ) -> Self {
        let stage_counts = stage_counts(records)
            .into_iter()
            .map(|(stage, count)| (stage.folder_name().to_string(), count))
            .collect();

        Self {
            timestamp: Utc::now(),
            database,
            output_dir,
            stage_counts,
            files,
            skipped_rows,
        }
    }

    /// Total number of records the run produced
    pub fn total_records(&self) -> usize {
        self.stage_counts.values().sum()
    }

    /// Load a manifest from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the manifest to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
