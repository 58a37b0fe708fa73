//! `cbk init` - create a costbook project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::Project;

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "Initialized costbook project at {}",
        style(project.root().display()).cyan()
    );
    Ok(())
}
