use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// One discovered candidate: the dotfile's name and its absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub label: String,
    pub path: PathBuf,
}

pub trait DotfileSource: Send + Sync {
    fn scan(&self) -> Result<Vec<ScannedFile>>;
}

/// Lists dotfiles directly under the home directory. Directories are
/// skipped, as are the target directory itself and names from the
/// configured exclude list.
#[derive(Debug, Clone)]
pub struct HomeDirSource {
    home_dir: PathBuf,
    target_name: String,
    exclude_names: Vec<String>,
}

impl HomeDirSource {
    pub fn new(home_dir: PathBuf, target_name: String, exclude_names: Vec<String>) -> Self {
        Self {
            home_dir,
            target_name,
            exclude_names,
        }
    }
}

impl DotfileSource for HomeDirSource {
    fn scan(&self) -> Result<Vec<ScannedFile>> {
        let read_dir = fs::read_dir(&self.home_dir)
            .with_context(|| format!("failed to read {}", self.home_dir.display()))?;

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry
                .with_context(|| format!("failed to read child in {}", self.home_dir.display()))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.starts_with('.') {
                continue;
            }
            // The target must never be offered as a candidate, even when it
            // does not exist as a directory yet.
            if name == self.target_name {
                continue;
            }
            if self.exclude_names.iter().any(|excluded| excluded == &name) {
                continue;
            }
            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to stat {name}"))?;
            if file_type.is_dir() {
                continue;
            }
            files.push(ScannedFile {
                path: self.home_dir.join(&name),
                label: name,
            });
        }

        // Name order is the discovery order everything downstream relies on.
        files.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(files)
    }
}
