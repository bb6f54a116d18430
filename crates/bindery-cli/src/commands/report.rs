//! Shared binding output for `check` and `inspect`

use anyhow::Result;
use bindery_core::KeyCodeTable;
use bindery_runtime::{BindingRegistry, KeyMapper};
use serde::Serialize;

#[derive(Serialize)]
pub struct LiveEntry {
    pub code: u32,
    pub key: Option<String>,
    pub name: String,
}

pub fn live_entries(live: &KeyMapper) -> Vec<LiveEntry> {
    let table = KeyCodeTable::standard();
    live.entries()
        .into_iter()
        .map(|(code, name)| LiveEntry {
            code: code.raw(),
            key: table.name_of(code).map(|k| k.to_string()),
            name: name.to_string(),
        })
        .collect()
}

/// Registry plus the live table derived from it
#[derive(Serialize)]
pub struct BindingReport<'a> {
    pub registry: &'a BindingRegistry,
    pub live_table: Vec<LiveEntry>,
}

impl<'a> BindingReport<'a> {
    pub fn new(registry: &'a BindingRegistry, live: &KeyMapper) -> Self {
        Self {
            registry,
            live_table: live_entries(live),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn print_text(&self) {
        println!("Key bindings:");
        let mut any = false;
        for (name, action) in self.registry.key_bindings() {
            println!("  {:<10} {}", name, action);
            any = true;
        }
        if !any {
            println!("  (none)");
        }

        println!("Mouse bindings:");
        let mut any = false;
        for (button, action) in self.registry.mouse_bindings() {
            println!("  {:<10} {}", button, action);
            any = true;
        }
        if !any {
            println!("  (none)");
        }

        let unbound: Vec<String> = self.registry.unbound_keys().map(|k| k.to_string()).collect();
        if !unbound.is_empty() {
            println!("Unbound defaults: {}", unbound.join(", "));
        }

        println!("Live table:");
        for entry in &self.live_table {
            println!(
                "  {:>5} {:<10} -> {}",
                entry.code,
                entry.key.as_deref().unwrap_or("?"),
                entry.name
            );
        }
    }
}
