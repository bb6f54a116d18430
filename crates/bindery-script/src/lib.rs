//! Bindery Script - Rhai runner for script-call bindings
//!
//! `RhaiScriptRunner` implements the runtime's `ScriptRunner` seam. Scripts
//! get the shorthand handles `a` (actors), `p` (party), `s` (switches) and
//! `v` (variables) over a shared `GameData`, plus the `source` of the binding
//! that fired. Every error, including a blown operation budget, comes back as
//! a script fault.

pub mod api;
pub mod context;
pub mod engine;

pub use context::{ActorData, GameData, PartyData, ScriptCallContext, SharedContext};
pub use engine::{RhaiScriptRunner, DEFAULT_MAX_OPERATIONS};
