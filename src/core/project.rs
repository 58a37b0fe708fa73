//! Project discovery and initialization
//!
//! A costbook project is a directory tree of YAML entity files with a
//! `.costbook/` marker directory at its root. Commands discover the project
//! by walking up from the current directory.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker directory identifying a project root
const MARKER_DIR: &str = ".costbook";

/// Collection directories created at init
const COLLECTION_DIRS: &[&str] = &[
    "materials",
    "vendors",
    "recipes",
    "recipes/items",
    "ledger/quotes",
    "ledger/price-changes",
    "history/changes",
    "history/snapshots",
];

/// Errors locating or creating a project
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not inside a costbook project (no {MARKER_DIR} directory found). Run 'cbk init' first")]
    NotFound,

    #[error("A costbook project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A located costbook project
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Discover the project containing the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Discover the project containing `start`, walking up parent directories
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = start;
        loop {
            if dir.join(MARKER_DIR).is_dir() {
                return Ok(Self {
                    root: dir.to_path_buf(),
                });
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Err(ProjectError::NotFound),
            }
        }
    }

    /// Initialize a new project at `root`, creating the collection directories
    pub fn init(root: &Path) -> Result<Self, ProjectError> {
        let marker = root.join(MARKER_DIR);
        if marker.exists() {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }

        fs::create_dir_all(&marker)?;
        for dir in COLLECTION_DIRS {
            fs::create_dir_all(root.join(dir))?;
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Open a project at a known root without discovery
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        if root.join(MARKER_DIR).is_dir() {
            Ok(Self {
                root: root.to_path_buf(),
            })
        } else {
            Err(ProjectError::NotFound)
        }
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}
