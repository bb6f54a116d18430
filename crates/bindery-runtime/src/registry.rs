//! Binding registry: the persisted key/mouse -> action table
//!
//! The registry is the only authoritative binding state. The live key-mapping
//! table is always rebuilt from it via [`BindingRegistry::live_table`].

use crate::keymap::{DefaultBindingSnapshot, KeyMapper};
use bindery_core::{Action, KeyCodeTable, KeyName, MouseButton, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical input a binding is attached to
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum BindingSource {
    Key(KeyName),
    Mouse(MouseButton),
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSource::Key(name) => write!(f, "key:{}", name),
            BindingSource::Mouse(button) => write!(f, "mouse:{}", button),
        }
    }
}

/// Result of an assign call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The action is now bound
    Assigned,
    /// A custom binding already existed and overwrite was off
    KeptExisting,
    /// The key carries a factory mapping and overwrite was off
    ProtectedDefault,
}

impl Assignment {
    pub fn is_assigned(&self) -> bool {
        matches!(self, Assignment::Assigned)
    }
}

/// Custom key and mouse bindings for one play session or save slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingRegistry {
    /// Keys whose factory mapping was removed without restoring it
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    unbound_keys: IndexSet<KeyName>,
    /// Key bindings in assignment order
    #[serde(default)]
    key_binds: IndexMap<KeyName, Action>,
    #[serde(default)]
    mouse_binds: IndexMap<MouseButton, Action>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an action to a key.
    ///
    /// Without `overwrite`, neither an existing custom binding nor a factory
    /// mapping of the same physical key is replaced.
    pub fn assign_key(
        &mut self,
        name: &str,
        action: Action,
        overwrite: bool,
        snapshot: &DefaultBindingSnapshot,
    ) -> Result<Assignment> {
        let (name, code) = KeyCodeTable::standard().resolve(name).inspect_err(|e| {
            log::warn!("{}; binding not created", e);
        })?;

        if !overwrite {
            if self.key_binds.contains_key(&name) {
                log::debug!("Key '{}' already bound; keeping existing binding", name);
                return Ok(Assignment::KeptExisting);
            }
            if snapshot.contains(code) {
                log::debug!("Key '{}' carries a default mapping; not overwriting", name);
                return Ok(Assignment::ProtectedDefault);
            }
        }

        log::debug!("Binding key '{}' -> {:?}", name, action.kind);
        self.unbound_keys.shift_remove(&name);
        self.key_binds.insert(name, action);
        Ok(Assignment::Assigned)
    }

    /// Remove a key's custom binding, returning it if one existed.
    ///
    /// With `restore_default` the key falls back to its factory mapping (if any);
    /// otherwise it is left unbound.
    pub fn remove_key(
        &mut self,
        name: &str,
        restore_default: bool,
        snapshot: &DefaultBindingSnapshot,
    ) -> Result<Option<Action>> {
        let (name, code) = KeyCodeTable::standard().resolve(name).inspect_err(|e| {
            log::warn!("{}; nothing to unbind", e);
        })?;

        let removed = self.key_binds.shift_remove(&name);
        if !restore_default && snapshot.contains(code) {
            self.unbound_keys.insert(name.clone());
        } else {
            self.unbound_keys.shift_remove(&name);
        }
        log::debug!(
            "Removed key '{}' (restore default: {}, had binding: {})",
            name,
            restore_default,
            removed.is_some()
        );
        Ok(removed)
    }

    /// Bind an action to a mouse button. Mouse buttons have no factory mapping,
    /// so `overwrite` only guards existing custom bindings.
    pub fn assign_mouse(&mut self, button: MouseButton, action: Action, overwrite: bool) -> Assignment {
        if !overwrite && self.mouse_binds.contains_key(&button) {
            log::debug!("Mouse '{}' already bound; keeping existing binding", button);
            return Assignment::KeptExisting;
        }
        log::debug!("Binding mouse '{}' -> {:?}", button, action.kind);
        self.mouse_binds.insert(button, action);
        Assignment::Assigned
    }

    pub fn remove_mouse(&mut self, button: MouseButton) -> Option<Action> {
        log::debug!("Removed mouse '{}'", button);
        self.mouse_binds.shift_remove(&button)
    }

    pub fn key_binding(&self, name: &KeyName) -> Option<&Action> {
        self.key_binds.get(name)
    }

    pub fn mouse_binding(&self, button: MouseButton) -> Option<&Action> {
        self.mouse_binds.get(&button)
    }

    /// Key bindings in assignment order
    pub fn key_bindings(&self) -> impl Iterator<Item = (&KeyName, &Action)> {
        self.key_binds.iter()
    }

    pub fn mouse_bindings(&self) -> impl Iterator<Item = (MouseButton, &Action)> {
        self.mouse_binds.iter().map(|(b, a)| (*b, a))
    }

    pub fn unbound_keys(&self) -> impl Iterator<Item = &KeyName> {
        self.unbound_keys.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.key_binds.is_empty() && self.mouse_binds.is_empty() && self.unbound_keys.is_empty()
    }

    /// Derive the live key-mapping table: factory entries, minus keys that were
    /// unbound, overlaid with every custom key binding.
    pub fn live_table(&self, snapshot: &DefaultBindingSnapshot) -> KeyMapper {
        let table = KeyCodeTable::standard();
        let mut mapper = snapshot.to_mapper();

        for name in &self.unbound_keys {
            if let Some(code) = table.code_of(name) {
                mapper.unset(code);
            }
        }
        for name in self.key_binds.keys() {
            match table.code_of(name) {
                Some(code) => mapper.set(code, name.as_str()),
                None => log::warn!("Ignoring binding for unknown key '{}'", name),
            }
        }
        mapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_core::{BindError, KeyCode, TriggerCondition};

    fn snapshot() -> DefaultBindingSnapshot {
        DefaultBindingSnapshot::capture(&KeyMapper::factory())
    }

    fn key(name: &str) -> KeyName {
        KeyCodeTable::standard().resolve(name).unwrap().0
    }

    #[test]
    fn assign_normalizes_name() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        let outcome = reg.assign_key("F", Action::toggle_auto_move(), true, &snap).unwrap();
        assert_eq!(outcome, Assignment::Assigned);
        assert_eq!(reg.key_binding(&key("f")), Some(&Action::toggle_auto_move()));
    }

    #[test]
    fn unknown_key_creates_nothing() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        let result = reg.assign_key("hyper", Action::common_event(1, false), true, &snap);
        assert!(matches!(result, Err(BindError::UnknownKey(_))));
        assert!(reg.is_empty());
    }

    #[test]
    fn protected_default_without_overwrite() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        let outcome = reg.assign_key("q", Action::common_event(1, false), false, &snap).unwrap();
        assert_eq!(outcome, Assignment::ProtectedDefault);
        assert_eq!(reg.live_table(&snap).get(KeyCode(81)), Some("pageup"));
    }

    #[test]
    fn existing_binding_kept_without_overwrite() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        reg.assign_key("g", Action::common_event(1, false), false, &snap).unwrap();
        let outcome = reg.assign_key("g", Action::common_event(2, false), false, &snap).unwrap();
        assert_eq!(outcome, Assignment::KeptExisting);
        assert_eq!(reg.key_binding(&key("g")), Some(&Action::common_event(1, false)));

        reg.assign_key("g", Action::common_event(2, false), true, &snap).unwrap();
        assert_eq!(reg.key_binding(&key("g")), Some(&Action::common_event(2, false)));
    }

    #[test]
    fn remove_restores_or_clears_default() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        reg.assign_key("q", Action::common_event(3, false), true, &snap).unwrap();
        assert_eq!(reg.live_table(&snap).get(KeyCode(81)), Some("q"));

        let removed = reg.remove_key("q", true, &snap).unwrap();
        assert_eq!(removed, Some(Action::common_event(3, false)));
        assert_eq!(reg.live_table(&snap).get(KeyCode(81)), Some("pageup"));

        reg.assign_key("q", Action::common_event(3, false), true, &snap).unwrap();
        reg.remove_key("q", false, &snap).unwrap();
        assert_eq!(reg.live_table(&snap).get(KeyCode(81)), None);

        // Binding the key again brings it back
        reg.assign_key("q", Action::common_event(4, false), true, &snap).unwrap();
        assert_eq!(reg.live_table(&snap).get(KeyCode(81)), Some("q"));
    }

    #[test]
    fn remove_without_default_leaves_key_unmapped() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        reg.assign_key("h", Action::common_event(1, false), true, &snap).unwrap();
        reg.remove_key("h", true, &snap).unwrap();
        assert_eq!(reg.live_table(&snap).get(KeyCode(72)), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn reassign_keeps_insertion_position() {
        let snap = snapshot();
        let mut reg = BindingRegistry::new();
        for name in ["g", "h", "j"] {
            reg.assign_key(name, Action::common_event(1, false), true, &snap).unwrap();
        }
        reg.assign_key("g", Action::common_event(9, false), true, &snap).unwrap();
        reg.remove_key("h", true, &snap).unwrap();

        let order: Vec<&str> = reg.key_bindings().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, vec!["g", "j"]);
    }

    #[test]
    fn mouse_overwrite_policy() {
        let mut reg = BindingRegistry::new();
        let first = Action::common_event(1, false);
        let second = Action::common_event(2, false).with_trigger(TriggerCondition::Pressed);
        assert!(reg.assign_mouse(MouseButton::Left, first.clone(), false).is_assigned());
        assert_eq!(
            reg.assign_mouse(MouseButton::Left, second.clone(), false),
            Assignment::KeptExisting
        );
        assert_eq!(reg.mouse_binding(MouseButton::Left), Some(&first));

        reg.assign_mouse(MouseButton::Left, second.clone(), true);
        assert_eq!(reg.mouse_binding(MouseButton::Left), Some(&second));

        assert_eq!(reg.remove_mouse(MouseButton::Left), Some(second));
        assert_eq!(reg.remove_mouse(MouseButton::Left), None);
    }

    #[test]
    fn live_table_is_factory_when_empty() {
        let snap = snapshot();
        assert_eq!(BindingRegistry::new().live_table(&snap), KeyMapper::factory());
    }
}
