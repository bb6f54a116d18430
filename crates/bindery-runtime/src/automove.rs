//! Auto-move forward: toggled continuous movement of the player
//!
//! A two-state machine stored on the player character. Manual directional
//! input or a queued click destination cancels it; the cancelling input is
//! then handled by the host's normal movement step in the same frame.

use crate::host::{GameHost, PlayerCharacter};
use crate::input::InputSource;

/// Whether the player is walking forward on their own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoMoveState {
    #[default]
    Idle,
    Moving,
}

/// Per-character auto-move state. Created idle with the character and never
/// saved, so every new game or load starts idle.
#[derive(Debug, Clone, Default)]
pub struct AutoMoveController {
    state: AutoMoveState,
}

impl AutoMoveController {
    /// Hook for character initialization
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AutoMoveState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AutoMoveState::Moving
    }

    /// Idle -> Moving only when the character can move; Moving -> Idle always.
    pub fn toggle(&mut self, can_move: bool) -> AutoMoveState {
        self.state = match self.state {
            AutoMoveState::Idle if can_move => AutoMoveState::Moving,
            AutoMoveState::Idle => AutoMoveState::Idle,
            AutoMoveState::Moving => AutoMoveState::Idle,
        };
        self.state
    }

    pub fn cancel(&mut self) {
        self.state = AutoMoveState::Idle;
    }

    /// Pre-movement check: manual input takes control back.
    /// Returns true when this call cancelled auto-move.
    pub fn check_override(&mut self, scene_active: bool, can_move: bool, manual_input: bool) -> bool {
        if scene_active && self.is_active() && can_move && manual_input {
            log::debug!("Manual input cancelled auto-move");
            self.cancel();
            return true;
        }
        false
    }

    /// Post-movement check: whether to issue a forward step this frame
    pub fn should_step(&self, scene_active: bool, can_move: bool, is_moving: bool) -> bool {
        scene_active && self.is_active() && !is_moving && can_move
    }
}

/// Toggle the player's auto-move, respecting whether they can move right now.
pub fn toggle_player(player: &mut dyn PlayerCharacter) -> AutoMoveState {
    let can_move = player.can_move();
    let state = player.auto_move_mut().toggle(can_move);
    log::debug!("Auto-move toggled: {:?}", state);
    state
}

/// Run the player's frame update with auto-move wrapped around it.
///
/// Order matters: the override check runs before `movement` so manual input
/// wins this frame, and the forward step runs after it so it never
/// pre-empts a manual step.
pub fn update_player<H, F>(host: &mut H, input: &dyn InputSource, movement: F)
where
    H: GameHost + ?Sized,
    F: FnOnce(&mut H, &dyn InputSource),
{
    let scene_active = host.is_scene_active();
    let manual_input = input.dir4().is_some() || host.is_destination_valid();
    {
        let player = host.player_mut();
        let can_move = player.can_move();
        player
            .auto_move_mut()
            .check_override(scene_active, can_move, manual_input);
    }

    movement(host, input);

    let player = host.player_mut();
    if player
        .auto_move()
        .should_step(scene_active, player.can_move(), player.is_moving())
    {
        let direction = player.direction();
        player.move_straight(direction);
    }
}
