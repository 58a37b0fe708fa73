//! Project configuration
//!
//! Loaded from `.costbook/config.yaml` if present; every field has an
//! environment fallback so a bare project still works.

use serde::Deserialize;
use std::path::Path;

use crate::core::project::Project;

/// Config file location within a project
const CONFIG_FILE: &str = ".costbook/config.yaml";

/// User-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Author recorded on created entities
    pub author: Option<String>,
}

impl Config {
    /// Load config for a project, falling back to defaults on any problem
    pub fn load(project: &Project) -> Self {
        Self::load_from(&project.root().join(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_yml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Resolve the author: config, then $COSTBOOK_AUTHOR, then $USER
    pub fn author(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("COSTBOOK_AUTHOR").ok())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
