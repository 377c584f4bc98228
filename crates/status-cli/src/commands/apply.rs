//! Apply command implementation

use colored::Colorize;
use serde::Deserialize;
use std::path::Path;

use status_core::Agent;
use status_datastore::{Datastore, MemoryDatastore};
use status_fs::{ConfigStore, NormalizedPath};

use crate::context::Context;
use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct SetEdit {
    path: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct DeleteEdit {
    path: String,
}

/// Staged edits read from a file
#[derive(Debug, Default, Deserialize)]
struct EditsFile {
    #[serde(default)]
    set: Vec<SetEdit>,
    #[serde(default)]
    delete: Vec<DeleteEdit>,
}

/// Run the apply command
pub fn run_apply(ctx: &Context, edits_path: &Path, no_reload: bool) -> Result<()> {
    if !edits_path.exists() {
        return Err(CliError::user(format!(
            "Edits file not found: {}",
            edits_path.display()
        )));
    }
    let edits: EditsFile = ConfigStore::for_kind("edits file").load(&NormalizedPath::new(edits_path))?;
    if edits.set.is_empty() && edits.delete.is_empty() {
        println!("{}", "No edits to apply".dimmed());
        return Ok(());
    }

    let datastore = MemoryDatastore::new();
    let bus = ctx.bus();
    let mut agent = Agent::init(
        &datastore,
        &bus,
        ctx.native_store(),
        ctx.reloader(no_reload),
        &ctx.config,
    )?;

    let mut session = datastore.start_session()?;
    for edit in &edits.set {
        session.set_item(&edit.path, &edit.value)?;
    }
    for edit in &edits.delete {
        session.delete_item(&edit.path)?;
    }
    let result = session.commit();
    agent.cleanup();
    result?;

    println!(
        "{} {} set, {} delete",
        "Applied".green().bold(),
        edits.set.len(),
        edits.delete.len()
    );
    Ok(())
}
