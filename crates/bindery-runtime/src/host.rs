//! Seams to the host game engine

use crate::automove::AutoMoveController;
use bindery_core::{Direction, EventTarget};

/// The parts of the host engine the binding layer reads and drives.
pub trait GameHost {
    /// The map scene is the active scene
    fn is_scene_active(&self) -> bool;
    /// A blocking map event is running
    fn is_event_running(&self) -> bool;
    /// A message box is open
    fn is_message_busy(&self) -> bool;
    /// A click/touch destination is queued for the player
    fn is_destination_valid(&self) -> bool;

    /// Queue a common event for sequential execution
    fn reserve_common_event(&mut self, id: u32);
    /// Whether the common event is authored to run in parallel
    fn is_parallel_common_event(&self, id: u32) -> bool;
    /// Add a parallel-authored common event to the map's parallel run list
    fn add_parallel_common_event(&mut self, id: u32);
    /// Run a common event's commands in a new interpreter alongside the map
    fn spawn_common_event_interpreter(&mut self, id: u32);

    /// Start an event's interaction; false when the target does not exist
    fn start_event(&mut self, target: EventTarget) -> bool;

    fn player(&self) -> &dyn PlayerCharacter;
    fn player_mut(&mut self) -> &mut dyn PlayerCharacter;

    /// The map scene accepts bound input this frame
    fn accepts_input(&self) -> bool {
        self.is_scene_active() && !self.is_event_running() && !self.is_message_busy()
    }
}

/// The player character, as seen by the auto-move feature.
pub trait PlayerCharacter {
    /// Not blocked by a menu, event, or message
    fn can_move(&self) -> bool;
    /// Mid-step between tiles
    fn is_moving(&self) -> bool;
    fn direction(&self) -> Direction;
    /// Take one step in `direction`
    fn move_straight(&mut self, direction: Direction);

    /// Auto-move state lives on the character object
    fn auto_move(&self) -> &AutoMoveController;
    fn auto_move_mut(&mut self) -> &mut AutoMoveController;
}
