//! Action dispatch: performs the side effect of a fired binding

use crate::automove::{self, AutoMoveState};
use crate::host::GameHost;
use crate::input::InputSource;
use crate::registry::BindingSource;
use bindery_core::{Action, ActionKind, BindError, EventTarget, Result};

/// What the script runner knows about the call
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    /// The binding that fired, when dispatched from input
    pub source: Option<BindingSource>,
}

/// Executes script-call actions.
///
/// Implementations expose the shorthand names `a` (actors), `p` (party),
/// `s` (switches) and `v` (variables) to the code they run. Faults are
/// returned, never panicked.
pub trait ScriptRunner {
    fn run_script(&mut self, code: &str, ctx: &ScriptContext) -> Result<()>;
}

/// Runner for hosts without scripting; every call is a fault.
pub struct NoScripts;

impl ScriptRunner for NoScripts {
    fn run_script(&mut self, _code: &str, _ctx: &ScriptContext) -> Result<()> {
        Err(BindError::ScriptFault("no script runner installed".to_string()))
    }
}

/// What a dispatch did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to dispatch, or a common event id of 0
    Ignored,
    CommonEventReserved(u32),
    /// Added to the map's parallel list (`isolated == false`) or run in its own interpreter
    ParallelCommonEvent { id: u32, isolated: bool },
    EventStarted(EventTarget),
    /// The map event does not exist; silently skipped
    EventMissing(EventTarget),
    ScriptCompleted,
    /// The script raised; logged and swallowed
    ScriptFaulted(String),
    AutoMoveToggled(AutoMoveState),
}

/// Executes actions against the host.
pub struct ActionDispatcher {
    scripts: Box<dyn ScriptRunner>,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(Box::new(NoScripts))
    }
}

impl ActionDispatcher {
    pub fn new(scripts: Box<dyn ScriptRunner>) -> Self {
        Self { scripts }
    }

    pub fn set_script_runner(&mut self, scripts: Box<dyn ScriptRunner>) {
        self.scripts = scripts;
    }

    /// Execute an action. Input is cleared first so the same press cannot
    /// also reach the host's default handling or fire again next frame.
    pub fn execute<H>(
        &mut self,
        action: Option<&Action>,
        source: Option<&BindingSource>,
        host: &mut H,
        input: &mut dyn InputSource,
    ) -> Outcome
    where
        H: GameHost + ?Sized,
    {
        let Some(action) = action else {
            return Outcome::Ignored;
        };
        input.clear();

        let outcome = match &action.kind {
            ActionKind::CommonEvent { id: 0, .. } => Outcome::Ignored,
            ActionKind::CommonEvent { id, parallel: false } => {
                host.reserve_common_event(*id);
                Outcome::CommonEventReserved(*id)
            }
            ActionKind::CommonEvent { id, parallel: true } => {
                let isolated = !host.is_parallel_common_event(*id);
                if isolated {
                    host.spawn_common_event_interpreter(*id);
                } else {
                    host.add_parallel_common_event(*id);
                }
                Outcome::ParallelCommonEvent { id: *id, isolated }
            }
            ActionKind::MapEvent { id } => {
                let target = EventTarget::from_id(*id);
                if host.start_event(target) {
                    Outcome::EventStarted(target)
                } else {
                    Outcome::EventMissing(target)
                }
            }
            ActionKind::ScriptCall { code } => {
                let ctx = ScriptContext {
                    source: source.cloned(),
                };
                match self.scripts.run_script(code, &ctx) {
                    Ok(()) => Outcome::ScriptCompleted,
                    Err(e) => {
                        log::error!("Script call error: {}", e);
                        Outcome::ScriptFaulted(e.to_string())
                    }
                }
            }
            ActionKind::ToggleAutoMoveForward => {
                Outcome::AutoMoveToggled(automove::toggle_player(host.player_mut()))
            }
        };

        match source {
            Some(source) => log::debug!("{} dispatched: {:?}", source, outcome),
            None => log::debug!("Dispatched: {:?}", outcome),
        }
        outcome
    }
}
