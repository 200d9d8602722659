//! Whole-file JSON persistence for projects.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::models::Project;

/// Failures raised while reading or writing the data file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file exists but could not be read.
    #[error("could not read data file {}: {source}", path.display())]
    Read {
        /// Data file path.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// The data file is not a valid project list.
    #[error("could not parse data file {}: {source}", path.display())]
    Parse {
        /// Data file path.
        path: PathBuf,
        /// Decoder failure.
        source: serde_json::Error,
    },
    /// The in-memory projects could not be encoded.
    #[error("could not encode projects: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The data file could not be replaced.
    #[error("could not write data file {}: {source}", path.display())]
    Write {
        /// Data file path.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
}

/// Persistence seam used by the navigator.
pub trait ProjectStore {
    /// Read every project; an absent store yields an empty list.
    fn load(&self) -> Result<Vec<Project>, StoreError>;

    /// Replace the persisted list with `projects`.
    fn save(&self, projects: &[Project]) -> Result<(), StoreError>;
}

/// Stores all projects as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Project>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let projects: Vec<Project> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        info!(count = projects.len(), "loaded projects from {}", self.path.display());
        Ok(projects)
    }

    fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        let serialised = serde_json::to_vec_pretty(projects).map_err(StoreError::Serialize)?;
        atomic_write(&self.path, &serialised).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(count = projects.len(), "saved projects to {}", self.path.display());
        Ok(())
    }
}

// Temp file next to the real target, then rename over it. A symlinked data
// file keeps its link; the file it points at is replaced.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = resolve_link(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let permissions = match fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => new_file_permissions(),
        Err(err) => return Err(err),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

fn resolve_link(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            // Dangling link: write where it points.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            }
            Err(err) => Err(err),
        },
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
