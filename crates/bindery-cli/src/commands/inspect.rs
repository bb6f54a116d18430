//! Save inspection command

use super::report::BindingReport;
use anyhow::{Context, Result};
use bindery_runtime::{BindingSystem, KeyMapper, SaveContents};
use std::path::Path;

pub fn run(save_path: &str, format: &str) -> Result<()> {
    let contents = SaveContents::load_from_file(Path::new(save_path))
        .with_context(|| format!("Failed to load save {}", save_path))?;

    let mut system = BindingSystem::new(&KeyMapper::factory());
    system.load_game(&contents);
    let report = BindingReport::new(system.registry(), system.live_table());

    match format {
        "json" => println!("{}", report.to_json()?),
        "text" => {
            println!("Save: {}", save_path);
            if !contents.extra.is_empty() {
                let keys: Vec<&str> = contents.extra.keys().map(|k| k.as_str()).collect();
                println!("Host data: {}", keys.join(", "));
            }
            println!();
            report.print_text();
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
