//! Project command implementation

use colored::Colorize;
use std::path::Path;

use status_core::{Projector, collect};
use status_datastore::{Datastore, MemoryDatastore};
use status_fs::NormalizedPath;

use crate::context::Context;
use crate::error::Result;

/// Run the project command
pub fn run_project(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let bus = ctx.bus();
    let mut store = ctx.native_store();
    let (model, report) = collect(&bus, &mut store, &ctx.config);

    let datastore = MemoryDatastore::new();
    let mut session = datastore.start_session()?;
    let projected = Projector::new(ctx.config.module.as_str()).project(session.as_mut(), &model)?;
    let items = datastore.items(&format!("/{}:", ctx.config.module));

    match output {
        Some(path) => {
            let content = serde_json::to_string_pretty(&items)?;
            status_fs::io::write_text(&NormalizedPath::new(path), &content)?;
            println!(
                "{} {} items to {}",
                "Wrote".green(),
                projected.total(),
                path.display()
            );
        }
        None => {
            for item in &items {
                println!("{} = {}", item.path.cyan(), item.value.as_deref().unwrap_or(""));
            }
        }
    }

    if report.is_degraded() {
        eprintln!(
            "{} {} source(s) degraded",
            "warning:".yellow().bold(),
            report.warnings.len()
        );
    }

    Ok(())
}
