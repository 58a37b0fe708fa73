//! Shared CLI helpers

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityId;
use crate::core::project::Project;
use crate::engine::PropagationEngine;
use crate::ledger::PricingLedger;
use crate::store::Store;

/// Discover the enclosing project or fail with a diagnostic
pub fn discover_project() -> Result<Project> {
    Project::discover().map_err(|e| miette::miette!("{}", e))
}

/// Open the store and a ledger wired to a propagation engine
pub fn open_ledger(project: &Project) -> (Store, PricingLedger) {
    let store = Store::open(project);
    let engine = PropagationEngine::new(store.clone());
    let ledger = PricingLedger::new(store.clone(), engine);
    (store, ledger)
}

/// Parse an entity id argument
pub fn parse_id(arg: &str) -> Result<EntityId> {
    arg.parse()
        .map_err(|e| miette::miette!("Invalid entity id '{}': {}", arg, e))
}

/// Emit json/yaml/id output when requested; returns false for human formats
pub fn emit_serialized<T: Serialize>(
    value: &T,
    ids: &[EntityId],
    global: &GlobalOpts,
) -> Result<bool> {
    match global.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
            Ok(true)
        }
        OutputFormat::Id => {
            for id in ids {
                println!("{}", id);
            }
            Ok(true)
        }
        OutputFormat::Auto => Ok(false),
    }
}
