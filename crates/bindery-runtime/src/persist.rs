//! Save data: bindings stored alongside the rest of a save slot.
//!
//! The registry is written verbatim under a `bindings` table. Everything else
//! in the save file belongs to the host and is carried through untouched.

use crate::registry::BindingRegistry;
use bindery_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of one save slot as far as the binding layer is concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveContents {
    /// Absent in saves made before bindings existed; those load as a fresh registry
    #[serde(default)]
    pub bindings: BindingRegistry,
    /// Host-owned save data
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl SaveContents {
    pub fn new(bindings: BindingRegistry) -> Self {
        Self {
            bindings,
            extra: toml::Table::new(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Save to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
