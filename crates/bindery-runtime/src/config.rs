//! Designer-facing binding configuration
//!
//! `ActionConfig` mirrors the action payload a designer fills in: predicate
//! names like `isTriggered`, type names like `commonEvent`, and numbers or
//! booleans that may arrive string-encoded. `BindingConfig` is the initial
//! binding list applied when a new game starts.

use bindery_core::{Action, ActionKind, BindError, Result, TriggerCondition};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Number or boolean that may be written as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

fn loose_i64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    use serde::de::Error;
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Loose::Int(n)) => Ok(n),
        Some(Loose::Float(f)) => Ok(f as i64),
        Some(Loose::Bool(b)) => Ok(b as i64),
        Some(Loose::Str(s)) if s.trim().is_empty() => Ok(0),
        Some(Loose::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map(|f| f as i64)
            .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
    }
}

fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Bool(b)) => b,
        Some(Loose::Str(s)) => s.trim() == "true",
        Some(Loose::Int(n)) => n != 0,
        Some(Loose::Float(f)) => f != 0.0,
        None => false,
    })
}

/// Raw action payload as authored in configuration or plugin-command arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    #[serde(default, alias = "trigger", alias = "trigger_condition")]
    pub trigger_condition: Option<String>,
    #[serde(default, alias = "type", alias = "action_type")]
    pub action_type: Option<String>,
    #[serde(default, alias = "common_event_id", deserialize_with = "loose_i64")]
    pub common_event_id: i64,
    #[serde(default, alias = "parallel", alias = "is_parallel", deserialize_with = "loose_bool")]
    pub is_parallel: bool,
    #[serde(default, alias = "map_event_id", deserialize_with = "loose_i64")]
    pub map_event_id: i64,
    #[serde(default, alias = "script", alias = "script_call")]
    pub script_call: Option<String>,
}

impl ActionConfig {
    /// Parse a JSON-encoded payload
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| BindError::MalformedAction(e.to_string()))
    }

    /// Convert into a typed action.
    pub fn into_action(self) -> Result<Action> {
        let trigger = match self.trigger_condition.as_deref() {
            None | Some("") => TriggerCondition::default(),
            Some(raw) => TriggerCondition::parse(raw).ok_or_else(|| {
                BindError::MalformedAction(format!("unknown trigger condition '{}'", raw))
            })?,
        };

        let kind = match self.action_type.as_deref().map(str::trim) {
            Some("commonEvent") | Some("common_event") => ActionKind::CommonEvent {
                id: u32::try_from(self.common_event_id).map_err(|_| {
                    BindError::MalformedAction(format!(
                        "common event id {} out of range",
                        self.common_event_id
                    ))
                })?,
                parallel: self.is_parallel,
            },
            Some("mapEvent") | Some("map_event") => ActionKind::MapEvent {
                id: i32::try_from(self.map_event_id).map_err(|_| {
                    BindError::MalformedAction(format!(
                        "map event id {} out of range",
                        self.map_event_id
                    ))
                })?,
            },
            Some("scriptCall") | Some("script_call") => match self.script_call {
                Some(code) if !code.trim().is_empty() => ActionKind::ScriptCall { code },
                _ => {
                    return Err(BindError::MalformedAction(
                        "script call has no code".to_string(),
                    ))
                }
            },
            Some("toggleMoveForward") | Some("toggle_auto_move_forward") => {
                ActionKind::ToggleAutoMoveForward
            }
            Some(other) => {
                return Err(BindError::MalformedAction(format!(
                    "unknown action type '{}'",
                    other
                )))
            }
            None => return Err(BindError::MalformedAction("missing action type".to_string())),
        };

        Ok(Action::new(trigger, kind))
    }
}

/// One initial key binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindConfig {
    #[serde(alias = "keyName")]
    pub key: String,
    pub action: ActionConfig,
}

/// One initial mouse binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouseBindConfig {
    #[serde(alias = "mouseButton")]
    pub button: String,
    pub action: ActionConfig,
}

fn default_overwrite() -> bool {
    true
}

/// Initial bindings applied when a new game starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Whether initial key bindings may replace factory-mapped keys
    #[serde(default = "default_overwrite", alias = "overwriteDefault")]
    pub overwrite_default: bool,
    #[serde(default, alias = "initialKeyBinds")]
    pub key_binds: Vec<KeyBindConfig>,
    #[serde(default, alias = "initialMouseBinds")]
    pub mouse_binds: Vec<MouseBindConfig>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            overwrite_default: true,
            key_binds: Vec::new(),
            mouse_binds: Vec::new(),
        }
    }
}

impl BindingConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
