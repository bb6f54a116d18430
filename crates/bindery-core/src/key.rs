//! Key names and physical key codes

use crate::error::{BindError, Result};
use bimap::BiMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A physical key code (DOM virtual key code numbering).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Get the raw code value
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyCode({})", self.0)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical lowercase key name, e.g. `q`, `f5`, `numpad1`.
///
/// Obtain one through [`KeyCodeTable::resolve`] so the name is normalized.
/// Names read back from save data are not re-validated here; consumers that
/// need the physical key look it up and skip names that have none.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyName(String);

impl KeyName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyName({:?})", self.0)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

const KEYBOARD: &[(&str, u32)] = &[
    ("a", 65), ("b", 66), ("c", 67), ("d", 68), ("e", 69), ("f", 70), ("g", 71),
    ("h", 72), ("i", 73), ("j", 74), ("k", 75), ("l", 76), ("m", 77), ("n", 78),
    ("o", 79), ("p", 80), ("q", 81), ("r", 82), ("s", 83), ("t", 84), ("u", 85),
    ("v", 86), ("w", 87), ("x", 88), ("y", 89), ("z", 90),
    ("0", 48), ("1", 49), ("2", 50), ("3", 51), ("4", 52),
    ("5", 53), ("6", 54), ("7", 55), ("8", 56), ("9", 57),
    ("backspace", 8), ("tab", 9), ("enter", 13), ("shift", 16), ("ctrl", 17),
    ("alt", 18), ("esc", 27), ("space", 32), ("pageup", 33), ("pagedown", 34),
    ("end", 35), ("home", 36), ("left", 37), ("up", 38), ("right", 39), ("down", 40),
    ("insert", 45), ("delete", 46),
    ("numpad0", 96), ("numpad1", 97), ("numpad2", 98), ("numpad3", 99), ("numpad4", 100),
    ("numpad5", 101), ("numpad6", 102), ("numpad7", 103), ("numpad8", 104), ("numpad9", 105),
    ("f1", 112), ("f2", 113), ("f3", 114), ("f4", 115), ("f5", 116), ("f6", 117),
    ("f7", 118), ("f8", 119), ("f9", 120), ("f10", 121), ("f11", 122), ("f12", 123),
    (";", 186), ("=", 187), (",", 188), ("-", 189), (".", 190), ("/", 191), ("`", 192),
    ("[", 219), ("\\", 220), ("]", 221), ("'", 222),
];

/// Alternate spellings accepted on input, folded onto a canonical name.
const ALIASES: &[(&str, &str)] = &[
    ("arrowleft", "left"),
    ("arrowup", "up"),
    ("arrowright", "right"),
    ("arrowdown", "down"),
];

/// Bidirectional key name <-> key code table.
///
/// One-to-one by construction; aliases are resolved before the lookup and
/// never appear as names of their own.
pub struct KeyCodeTable {
    keys: BiMap<&'static str, KeyCode>,
}

impl KeyCodeTable {
    fn build() -> Self {
        let mut keys = BiMap::new();
        for &(name, code) in KEYBOARD {
            keys.insert(name, KeyCode(code));
        }
        Self { keys }
    }

    /// The shared standard keyboard table
    pub fn standard() -> &'static KeyCodeTable {
        static TABLE: OnceLock<KeyCodeTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    /// Normalize a user-supplied name and resolve it to a canonical name and its code.
    pub fn resolve(&self, name: &str) -> Result<(KeyName, KeyCode)> {
        let lowered = name.trim().to_lowercase();
        let canonical = ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map(|(_, target)| *target)
            .unwrap_or(lowered.as_str());

        self.keys
            .get_by_left(canonical)
            .map(|code| (KeyName(canonical.to_string()), *code))
            .ok_or(BindError::UnknownKey(lowered))
    }

    /// Physical code for a key name, if the name is in the table
    pub fn code_of(&self, name: &KeyName) -> Option<KeyCode> {
        self.keys.get_by_left(name.as_str()).copied()
    }

    /// Canonical name for a physical code
    pub fn name_of(&self, code: KeyCode) -> Option<KeyName> {
        self.keys
            .get_by_right(&code)
            .map(|name| KeyName((*name).to_string()))
    }

    /// All entries, ordered by key code
    pub fn entries(&self) -> Vec<(&'static str, KeyCode)> {
        let mut entries: Vec<_> = self.keys.iter().map(|(n, c)| (*n, *c)).collect();
        entries.sort_by_key(|(_, code)| *code);
        entries
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        let table = KeyCodeTable::standard();
        let (name, code) = table.resolve("Q").unwrap();
        assert_eq!(name.as_str(), "q");
        assert_eq!(code, KeyCode(81));

        let (name, code) = table.resolve("F5").unwrap();
        assert_eq!(name.as_str(), "f5");
        assert_eq!(code, KeyCode(116));
    }

    #[test]
    fn arrow_aliases_fold_to_canonical() {
        let table = KeyCodeTable::standard();
        let (name, code) = table.resolve("ArrowUp").unwrap();
        assert_eq!(name.as_str(), "up");
        assert_eq!(code, KeyCode(38));
        assert_eq!(table.name_of(KeyCode(38)).unwrap().as_str(), "up");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let table = KeyCodeTable::standard();
        match table.resolve("hyper") {
            Err(BindError::UnknownKey(name)) => assert_eq!(name, "hyper"),
            other => panic!("expected UnknownKey, got {:?}", other.map(|(n, _)| n)),
        }
    }

    #[test]
    fn table_is_one_to_one() {
        let table = KeyCodeTable::standard();
        assert_eq!(table.len(), KEYBOARD.len());
        for (name, code) in table.entries() {
            assert_eq!(table.name_of(code).unwrap().as_str(), name);
        }
    }

    #[test]
    fn punctuation_keys_resolve() {
        let table = KeyCodeTable::standard();
        assert_eq!(table.resolve("\\").unwrap().1, KeyCode(220));
        assert_eq!(table.resolve("'").unwrap().1, KeyCode(222));
        assert_eq!(table.resolve(";").unwrap().1, KeyCode(186));
    }
}
