//! Live key-mapping table and the factory snapshot it is derived from

use bindery_core::KeyCode;
use std::collections::HashMap;

/// Physical key code -> logical input name, as consulted by input polling.
///
/// Logical names are either the host's built-in names (`ok`, `escape`, `up`)
/// or, for custom bindings, the key's own name (`q`, `f5`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapper {
    map: HashMap<KeyCode, String>,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The stock table of a 2D RPG runtime: confirm/cancel, menu paging,
    /// arrows and numpad directions, and the debug key.
    pub fn factory() -> Self {
        Self::from_entries([
            (9, "tab"),
            (13, "ok"),
            (16, "shift"),
            (17, "control"),
            (18, "control"),
            (27, "escape"),
            (32, "ok"),
            (33, "pageup"),
            (34, "pagedown"),
            (37, "left"),
            (38, "up"),
            (39, "right"),
            (40, "down"),
            (45, "escape"),
            (81, "pageup"),
            (87, "pagedown"),
            (88, "escape"),
            (90, "ok"),
            (96, "escape"),
            (98, "down"),
            (100, "left"),
            (102, "right"),
            (104, "up"),
            (120, "debug"),
        ])
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        Self {
            map: entries
                .into_iter()
                .map(|(code, name)| (KeyCode(code), name.to_string()))
                .collect(),
        }
    }

    /// Logical name currently mapped to a physical key
    pub fn get(&self, code: KeyCode) -> Option<&str> {
        self.map.get(&code).map(|s| s.as_str())
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.map.contains_key(&code)
    }

    pub fn set(&mut self, code: KeyCode, name: impl Into<String>) {
        self.map.insert(code, name.into());
    }

    pub fn unset(&mut self, code: KeyCode) -> Option<String> {
        self.map.remove(&code)
    }

    /// All entries, ordered by key code
    pub fn entries(&self) -> Vec<(KeyCode, &str)> {
        let mut entries: Vec<_> = self.map.iter().map(|(c, n)| (*c, n.as_str())).collect();
        entries.sort_by_key(|(code, _)| *code);
        entries
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Immutable copy of the host's key table, taken before any custom binding applies.
///
/// Decides which keys are protected defaults and what a removed binding restores.
#[derive(Debug, Clone)]
pub struct DefaultBindingSnapshot {
    table: KeyMapper,
}

impl DefaultBindingSnapshot {
    pub fn capture(host_table: &KeyMapper) -> Self {
        Self {
            table: host_table.clone(),
        }
    }

    /// Factory name for a physical key
    pub fn get(&self, code: KeyCode) -> Option<&str> {
        self.table.get(code)
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.table.contains(code)
    }

    /// A fresh live table holding only the factory entries
    pub fn to_mapper(&self) -> KeyMapper {
        self.table.clone()
    }
}
