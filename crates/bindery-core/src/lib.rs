//! Bindery Core - Foundational types for the Bindery input-binding layer
//!
//! This crate provides the types that the runtime and scripting crates share:
//! - `KeyCodeTable` - Bidirectional key name <-> key code table
//! - `MouseButton`, `TriggerCondition`, `Direction` - Input vocabulary
//! - `Action`, `ActionKind` - What a binding does when it fires
//! - Error types and Result alias

mod action;
mod error;
mod key;
mod types;

pub use action::{Action, ActionKind, EventTarget};
pub use error::{BindError, Result};
pub use key::{KeyCode, KeyCodeTable, KeyName};
pub use types::{Direction, MouseButton, TriggerCondition};
