//! Bindable actions

use crate::types::TriggerCondition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a binding does, plus when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub trigger: TriggerCondition,
    pub kind: ActionKind,
}

/// The side effect an action performs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Run a common event, either reserved for sequential execution or in parallel
    CommonEvent {
        id: u32,
        #[serde(default)]
        parallel: bool,
    },
    /// Start a map event; ids <= 0 address the player character
    MapEvent { id: i32 },
    /// Run script code through the host's script runner
    ScriptCall { code: String },
    /// Toggle continuous forward movement of the player
    ToggleAutoMoveForward,
}

impl Action {
    pub fn new(trigger: TriggerCondition, kind: ActionKind) -> Self {
        Self { trigger, kind }
    }

    pub fn triggered(kind: ActionKind) -> Self {
        Self::new(TriggerCondition::Triggered, kind)
    }

    pub fn common_event(id: u32, parallel: bool) -> Self {
        Self::triggered(ActionKind::CommonEvent { id, parallel })
    }

    pub fn map_event(id: i32) -> Self {
        Self::triggered(ActionKind::MapEvent { id })
    }

    pub fn script(code: impl Into<String>) -> Self {
        Self::triggered(ActionKind::ScriptCall { code: code.into() })
    }

    pub fn toggle_auto_move() -> Self {
        Self::triggered(ActionKind::ToggleAutoMoveForward)
    }

    pub fn with_trigger(mut self, trigger: TriggerCondition) -> Self {
        self.trigger = trigger;
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::CommonEvent { id, parallel: false } => write!(f, "common event {}", id)?,
            ActionKind::CommonEvent { id, parallel: true } => {
                write!(f, "common event {} (parallel)", id)?
            }
            ActionKind::MapEvent { id } => write!(f, "start {}", EventTarget::from_id(*id))?,
            ActionKind::ScriptCall { code } => write!(f, "script `{}`", code)?,
            ActionKind::ToggleAutoMoveForward => f.write_str("toggle auto-move")?,
        }
        let trigger = match self.trigger {
            TriggerCondition::Triggered => "triggered",
            TriggerCondition::Pressed => "pressed",
            TriggerCondition::Repeated => "repeated",
        };
        write!(f, " [{}]", trigger)
    }
}

/// Target of a map-event action
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum EventTarget {
    Player,
    Event(u32),
}

impl EventTarget {
    pub fn from_id(id: i32) -> Self {
        if id <= 0 {
            EventTarget::Player
        } else {
            EventTarget::Event(id as u32)
        }
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTarget::Player => f.write_str("player"),
            EventTarget::Event(id) => write!(f, "event {}", id),
        }
    }
}
