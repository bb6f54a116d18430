//! The binding layer as the host sees it
//!
//! Owns the factory snapshot, the registry, the live key table derived from
//! them, and the dispatcher. The host calls [`BindingSystem::tick`] (or the
//! individual hooks) from its frame update, and the assign/remove methods from
//! its event commands.

use crate::automove::{self, AutoMoveController};
use crate::command::BindCommand;
use crate::config::BindingConfig;
use crate::dispatch::{ActionDispatcher, Outcome, ScriptRunner};
use crate::host::GameHost;
use crate::input::{InputSource, InputState};
use crate::keymap::{DefaultBindingSnapshot, KeyMapper};
use crate::persist::SaveContents;
use crate::registry::{Assignment, BindingRegistry, BindingSource};
use crate::resolve;
use bindery_core::{Action, MouseButton, Result};
use std::collections::HashMap;

/// A binding that fired this frame and what it did
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub source: BindingSource,
    pub outcome: Outcome,
}

/// Result of applying one initial binding at new-game time
#[derive(Debug)]
pub struct InitialBind {
    /// `key:<name>` or `mouse:<button>`, as written in the config
    pub target: String,
    pub result: Result<Assignment>,
}

pub struct BindingSystem {
    snapshot: DefaultBindingSnapshot,
    registry: BindingRegistry,
    /// Derived from `snapshot` + `registry`; rebuilt after every change
    live: KeyMapper,
    dispatcher: ActionDispatcher,
}

impl BindingSystem {
    /// Capture the host's factory key table. Call once, before any custom
    /// binding is applied.
    pub fn new(host_table: &KeyMapper) -> Self {
        let snapshot = DefaultBindingSnapshot::capture(host_table);
        let registry = BindingRegistry::new();
        let live = registry.live_table(&snapshot);
        Self {
            snapshot,
            registry,
            live,
            dispatcher: ActionDispatcher::default(),
        }
    }

    pub fn with_script_runner(mut self, scripts: Box<dyn ScriptRunner>) -> Self {
        self.dispatcher.set_script_runner(scripts);
        self
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// The key table input polling should use
    pub fn live_table(&self) -> &KeyMapper {
        &self.live
    }

    fn rebuild(&mut self) {
        self.live = self.registry.live_table(&self.snapshot);
    }

    // --- Lifecycle ---

    /// Start a new game: fresh registry, then the configured initial bindings.
    ///
    /// Key bindings honour `overwrite_default`; mouse bindings always overwrite.
    /// Entries whose action fails to parse are skipped.
    pub fn new_game(&mut self, config: &BindingConfig) -> Vec<InitialBind> {
        self.registry = BindingRegistry::new();
        let mut report = Vec::new();

        for bind in &config.key_binds {
            let target = format!("key:{}", bind.key);
            let result = bind.action.clone().into_action().and_then(|action| {
                self.registry
                    .assign_key(&bind.key, action, config.overwrite_default, &self.snapshot)
            });
            if let Err(e) = &result {
                log::warn!("Skipping initial binding {}: {}", target, e);
            }
            report.push(InitialBind { target, result });
        }

        for bind in &config.mouse_binds {
            let target = format!("mouse:{}", bind.button);
            let result = bind.button.parse::<MouseButton>().and_then(|button| {
                let action = bind.action.clone().into_action()?;
                Ok(self.registry.assign_mouse(button, action, true))
            });
            if let Err(e) = &result {
                log::warn!("Skipping initial binding {}: {}", target, e);
            }
            report.push(InitialBind { target, result });
        }

        self.rebuild();
        log::info!(
            "New game: {} key and {} mouse bindings",
            self.registry.key_bindings().count(),
            self.registry.mouse_bindings().count()
        );
        report
    }

    /// Replace the registry with a loaded one and rebuild the live table.
    pub fn load_game(&mut self, contents: &SaveContents) {
        self.registry = contents.bindings.clone();
        self.rebuild();
        log::info!("Loaded bindings: {} live key mappings", self.live.len());
    }

    /// Save contents holding the current registry
    pub fn save_contents(&self) -> SaveContents {
        SaveContents::new(self.registry.clone())
    }

    /// Hook for player-character initialization
    pub fn on_character_init() -> AutoMoveController {
        AutoMoveController::new()
    }

    // --- Binding API ---

    pub fn assign_key(&mut self, name: &str, action: Action, overwrite: bool) -> Result<Assignment> {
        let result = self.registry.assign_key(name, action, overwrite, &self.snapshot);
        self.rebuild();
        result
    }

    pub fn remove_key(&mut self, name: &str, restore_default: bool) -> Result<Option<Action>> {
        let result = self.registry.remove_key(name, restore_default, &self.snapshot);
        self.rebuild();
        result
    }

    pub fn assign_mouse(&mut self, button: MouseButton, action: Action, overwrite: bool) -> Assignment {
        self.registry.assign_mouse(button, action, overwrite)
    }

    pub fn remove_mouse(&mut self, button: MouseButton) -> Option<Action> {
        self.registry.remove_mouse(button)
    }

    pub fn apply_command(&mut self, command: BindCommand) -> Result<()> {
        match command {
            BindCommand::AssignKey {
                key,
                action,
                overwrite,
            } => self.assign_key(&key, action, overwrite).map(|_| ()),
            BindCommand::RemoveKey {
                key,
                restore_default,
            } => self.remove_key(&key, restore_default).map(|_| ()),
            BindCommand::AssignMouse {
                button,
                action,
                overwrite,
            } => {
                self.assign_mouse(button, action, overwrite);
                Ok(())
            }
            BindCommand::RemoveMouse { button } => {
                self.remove_mouse(button);
                Ok(())
            }
        }
    }

    /// Parse and apply a host event command. Failures are logged and skipped.
    pub fn run_command(&mut self, name: &str, args: &HashMap<String, String>) -> bool {
        match BindCommand::parse(name, args).and_then(|command| self.apply_command(command)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Command '{}' skipped: {}", name, e);
                false
            }
        }
    }

    // --- Frame hooks ---

    /// Execute an action directly, outside of input resolution
    pub fn execute<H>(&mut self, action: Option<&Action>, host: &mut H, input: &mut dyn InputSource) -> Outcome
    where
        H: GameHost + ?Sized,
    {
        self.dispatcher.execute(action, None, host, input)
    }

    /// Resolve this frame's input and dispatch at most one binding.
    pub fn on_frame_update<H>(&mut self, host: &mut H, input: &mut dyn InputSource) -> Option<Dispatch>
    where
        H: GameHost + ?Sized,
    {
        if !host.accepts_input() {
            return None;
        }
        let (source, action) = resolve::resolve(&self.registry, &*input)?;
        let outcome = self.dispatcher.execute(Some(action), Some(&source), host, input);
        Some(Dispatch { source, outcome })
    }

    /// One full frame in the fixed order: capture input through the live
    /// table, resolve and dispatch, then the player update with the auto-move
    /// checks around `movement`.
    pub fn tick<H, F>(&mut self, host: &mut H, input: &mut InputState, movement: F) -> Option<Dispatch>
    where
        H: GameHost + ?Sized,
        F: FnOnce(&mut H, &dyn InputSource),
    {
        input.update(&self.live);
        let dispatched = self.on_frame_update(host, input);
        automove::update_player(host, &*input, movement);
        dispatched
    }
}
