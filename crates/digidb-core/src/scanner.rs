//! Resource scanner for listing generated files per stage folder

use crate::error::Result;
use crate::record::Stage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Generated resources found in one stage folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFolder {
    pub stage: Stage,
    /// Folder path under the scanned root
    pub path: PathBuf,
    /// Resource files, sorted by file name
    pub files: Vec<PathBuf>,
}

/// Result of scanning an output root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceIndex {
    pub root: PathBuf,
    /// One entry per stage, in stage order, including empty and missing folders
    pub folders: Vec<StageFolder>,
}

impl ResourceIndex {
    /// Total number of resource files
    pub fn total_files(&self) -> usize {
        self.folders.iter().map(|f| f.files.len()).sum()
    }

    /// Folder entry for a stage
    pub fn folder(&self, stage: Stage) -> Option<&StageFolder> {
        self.folders.iter().find(|f| f.stage == stage)
    }
}

/// List resource files with the given extension under each stage folder.
///
/// Only direct children of a stage folder are listed; a missing folder
/// yields an empty list.
pub fn scan_resources<P: AsRef<Path>>(root: P, extension: &str) -> Result<ResourceIndex> {
    let root = root.as_ref();
    let mut folders = Vec::with_capacity(Stage::ALL.len());

    for stage in Stage::ALL {
        let path = root.join(stage.folder_name());
        let mut files = Vec::new();

        if path.is_dir() {
            for entry in WalkDir::new(&path).min_depth(1).max_depth(1) {
                let entry = entry?;
                let file_path = entry.path();
                if entry.file_type().is_file()
                    && file_path.extension().is_some_and(|ext| ext == extension)
                {
                    files.push(file_path.to_path_buf());
                }
            }
        }

        files.sort();
        folders.push(StageFolder { stage, path, files });
    }

    Ok(ResourceIndex {
        root: root.to_path_buf(),
        folders,
    })
}
