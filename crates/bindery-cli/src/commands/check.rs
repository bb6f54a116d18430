//! Config check command

use super::report::BindingReport;
use anyhow::{Context, Result};
use bindery_runtime::{Assignment, BindingConfig, BindingSystem, KeyMapper};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Applied {
    target: String,
    result: String,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    applied: Vec<Applied>,
    #[serde(flatten)]
    bindings: BindingReport<'a>,
}

fn describe(result: &bindery_core::Result<Assignment>) -> String {
    match result {
        Ok(Assignment::Assigned) => "assigned".to_string(),
        Ok(Assignment::KeptExisting) => "kept existing binding".to_string(),
        Ok(Assignment::ProtectedDefault) => "refused: key has a default mapping".to_string(),
        Err(e) => format!("skipped: {}", e),
    }
}

pub fn run(config_path: &str, format: &str) -> Result<()> {
    let config = BindingConfig::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config {}", config_path))?;

    let mut system = BindingSystem::new(&KeyMapper::factory());
    let applied: Vec<Applied> = system
        .new_game(&config)
        .iter()
        .map(|entry| Applied {
            target: entry.target.clone(),
            result: describe(&entry.result),
        })
        .collect();

    let report = CheckReport {
        applied,
        bindings: BindingReport::new(system.registry(), system.live_table()),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => {
            println!(
                "Config: {} (overwrite defaults: {})",
                config_path, config.overwrite_default
            );
            for entry in &report.applied {
                println!("  {:<14} {}", entry.target, entry.result);
            }
            println!();
            report.bindings.print_text();
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
