//! Show command implementation

use colored::Colorize;
use serde::Serialize;

use status_core::{CollectReport, StateModel, collect};

use crate::context::Context;
use crate::error::Result;

#[derive(Serialize)]
struct ShowOutput<'a> {
    state: &'a StateModel,
    report: &'a CollectReport,
}

/// Run the show command
pub fn run_show(ctx: &Context, json: bool) -> Result<()> {
    let bus = ctx.bus();
    let mut store = ctx.native_store();
    let (model, report) = collect(&bus, &mut store, &ctx.config);

    if json {
        let output = ShowOutput {
            state: &model,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Board".bold());
    match model.board() {
        Some(board) => {
            for (key, value) in board.fields() {
                print_field(key, value);
            }
            for (key, value) in board.release.fields() {
                print_field(key, value);
            }
        }
        None => println!("  {}", "unavailable".dimmed()),
    }
    println!();

    println!("{} ({})", "DHCP leases".bold(), model.leases().len());
    for lease in model.leases() {
        println!(
            "  {} {} {} {}",
            lease.ip.as_deref().unwrap_or("N/A").cyan(),
            lease.mac.as_deref().unwrap_or("N/A"),
            lease.hostname.as_deref().unwrap_or("N/A"),
            lease.id.as_deref().unwrap_or("N/A").dimmed()
        );
    }
    println!();

    println!("{} ({})", "WiFi devices".bold(), model.devices().len());
    for device in model.devices() {
        println!("  {}", device.key().unwrap_or("N/A").cyan());
        for (key, value) in device.fields().into_iter().skip(1) {
            print_field(key, value);
        }
    }
    println!();

    println!("{} ({})", "WiFi interfaces".bold(), model.interfaces().len());
    for iface in model.interfaces() {
        println!("  {}", iface.key().unwrap_or("N/A").cyan());
        for (key, value) in iface.fields().into_iter().skip(1) {
            print_field(key, value);
        }
    }

    if report.is_degraded() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    Ok(())
}

fn print_field(key: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("    {}: {}", key.dimmed(), value),
        None => println!("    {}: {}", key.dimmed(), "N/A".dimmed()),
    }
}
