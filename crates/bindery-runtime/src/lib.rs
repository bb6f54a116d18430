//! Bindery Runtime - custom input bindings for a tile-based RPG host
//!
//! Provides the pieces a host game wires into its frame loop:
//! - `KeyMapper` / `DefaultBindingSnapshot`: the live key table and the factory copy it derives from
//! - `InputState`: per-frame keyboard and mouse polling
//! - `BindingRegistry`: persisted key and mouse bindings
//! - `ActionDispatcher`: runs a fired binding against the host
//! - `AutoMoveController`: toggled forward movement for the player
//! - `BindingSystem`: the facade tying them together

mod automove;
mod command;
mod config;
mod dispatch;
mod host;
mod input;
mod keymap;
mod persist;
mod registry;
mod resolve;
mod system;
mod winit_input;

#[cfg(test)]
mod test_host;

pub use automove::{toggle_player, update_player, AutoMoveController, AutoMoveState};
pub use command::BindCommand;
pub use config::{ActionConfig, BindingConfig, KeyBindConfig, MouseBindConfig};
pub use dispatch::{ActionDispatcher, NoScripts, Outcome, ScriptContext, ScriptRunner};
pub use host::{GameHost, PlayerCharacter};
pub use input::{InputSource, InputState, KEY_REPEAT_INTERVAL, KEY_REPEAT_WAIT};
pub use keymap::{DefaultBindingSnapshot, KeyMapper};
pub use persist::SaveContents;
pub use registry::{Assignment, BindingRegistry, BindingSource};
pub use resolve::{key_fires, mouse_fires, resolve};
pub use system::{BindingSystem, Dispatch, InitialBind};
pub use winit_input::{key_code, mouse_button};
