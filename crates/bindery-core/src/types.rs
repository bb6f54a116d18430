//! Mouse buttons, trigger conditions, and facing directions

use crate::error::{BindError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three bindable mouse buttons
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Order in which mouse bindings are checked each frame
    pub const RESOLUTION_ORDER: [MouseButton; 3] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MouseButton {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            other => Err(BindError::UnknownMouseButton(other.to_string())),
        }
    }
}

/// When a bound input fires its action
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    /// Once, on the frame the input goes down
    #[default]
    Triggered,
    /// Every frame the input is held
    Pressed,
    /// On the down edge, then at the host's key-repeat cadence while held
    Repeated,
}

impl TriggerCondition {
    /// Parse either the designer-facing predicate name (`isTriggered`) or the plain form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "isTriggered" | "triggered" => Some(TriggerCondition::Triggered),
            "isPressed" | "pressed" => Some(TriggerCondition::Pressed),
            "isRepeated" | "repeated" => Some(TriggerCondition::Repeated),
            _ => None,
        }
    }
}

/// Four-way facing direction, numbered like a numeric keypad
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    /// Grid offset of one step in this direction (y grows downward)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }
}
