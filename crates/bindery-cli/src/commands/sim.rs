//! Headless grid map used by `replay`
//!
//! Steps complete instantly, nothing blocks input, and every host call the
//! binding layer makes is recorded so the replay can print it.

use bindery_core::{Direction, EventTarget};
use bindery_runtime::{AutoMoveController, BindingSystem, GameHost, InputSource, PlayerCharacter};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize)]
pub struct MapSpec {
    #[serde(default = "default_size")]
    pub width: i32,
    #[serde(default = "default_size")]
    pub height: i32,
    /// Ids of events that exist on the map
    #[serde(default)]
    pub events: Vec<u32>,
    /// Common events authored to run in parallel
    #[serde(default)]
    pub parallel_common_events: Vec<u32>,
}

fn default_size() -> i32 {
    20
}

impl Default for MapSpec {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            events: Vec::new(),
            parallel_common_events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSpec {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction {
    Direction::Down
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            direction: default_direction(),
        }
    }
}

pub struct SimPlayer {
    pub position: (i32, i32),
    pub direction: Direction,
    bounds: (i32, i32),
    auto_move: AutoMoveController,
}

impl PlayerCharacter for SimPlayer {
    fn can_move(&self) -> bool {
        true
    }

    fn is_moving(&self) -> bool {
        false
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns, then steps if the target tile is on the map
    fn move_straight(&mut self, direction: Direction) {
        self.direction = direction;
        let (dx, dy) = direction.offset();
        let (x, y) = (self.position.0 + dx, self.position.1 + dy);
        if (0..self.bounds.0).contains(&x) && (0..self.bounds.1).contains(&y) {
            self.position = (x, y);
        }
    }

    fn auto_move(&self) -> &AutoMoveController {
        &self.auto_move
    }

    fn auto_move_mut(&mut self) -> &mut AutoMoveController {
        &mut self.auto_move
    }
}

pub struct SimHost {
    events: HashSet<u32>,
    parallel_authored: HashSet<u32>,
    pub player: SimPlayer,
    /// Host calls made since the last `take_log`
    log: Vec<String>,
}

impl SimHost {
    pub fn new(map: &MapSpec, player: &PlayerSpec) -> Self {
        Self {
            events: map.events.iter().copied().collect(),
            parallel_authored: map.parallel_common_events.iter().copied().collect(),
            player: SimPlayer {
                position: (player.x, player.y),
                direction: player.direction,
                bounds: (map.width, map.height),
                auto_move: BindingSystem::on_character_init(),
            },
            log: Vec::new(),
        }
    }

    /// Walk one tile in the held direction
    pub fn move_by_input(&mut self, input: &dyn InputSource) {
        if let Some(direction) = input.dir4() {
            self.player.move_straight(direction);
        }
    }

    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

impl GameHost for SimHost {
    fn is_scene_active(&self) -> bool {
        true
    }

    fn is_event_running(&self) -> bool {
        false
    }

    fn is_message_busy(&self) -> bool {
        false
    }

    fn is_destination_valid(&self) -> bool {
        false
    }

    fn reserve_common_event(&mut self, id: u32) {
        self.log.push(format!("reserve common event {}", id));
    }

    fn is_parallel_common_event(&self, id: u32) -> bool {
        self.parallel_authored.contains(&id)
    }

    fn add_parallel_common_event(&mut self, id: u32) {
        self.log.push(format!("add parallel common event {}", id));
    }

    fn spawn_common_event_interpreter(&mut self, id: u32) {
        self.log.push(format!("spawn interpreter for common event {}", id));
    }

    fn start_event(&mut self, target: EventTarget) -> bool {
        let exists = match target {
            EventTarget::Player => true,
            EventTarget::Event(id) => self.events.contains(&id),
        };
        if exists {
            self.log.push(format!("start {}", target));
        }
        exists
    }

    fn player(&self) -> &dyn PlayerCharacter {
        &self.player
    }

    fn player_mut(&mut self) -> &mut dyn PlayerCharacter {
        &mut self.player
    }
}
