//! Grid-walking host double shared by the runtime tests

use crate::automove::{self, AutoMoveController};
use crate::dispatch::{ScriptContext, ScriptRunner};
use crate::host::{GameHost, PlayerCharacter};
use crate::input::{InputSource, InputState};
use crate::keymap::KeyMapper;
use bindery_core::{Direction, EventTarget, KeyCode, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub struct TestPlayer {
    pub position: (i32, i32),
    pub direction: Direction,
    /// Frames a step takes; 0 completes instantly
    pub step_frames: u32,
    pub remaining: u32,
    pub blocked: bool,
    pub auto_move: AutoMoveController,
}

impl TestPlayer {
    fn new() -> Self {
        Self {
            position: (0, 0),
            direction: Direction::Down,
            step_frames: 0,
            remaining: 0,
            blocked: false,
            auto_move: AutoMoveController::new(),
        }
    }
}

impl PlayerCharacter for TestPlayer {
    fn can_move(&self) -> bool {
        !self.blocked
    }

    fn is_moving(&self) -> bool {
        self.remaining > 0
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn move_straight(&mut self, direction: Direction) {
        let (dx, dy) = direction.offset();
        self.direction = direction;
        self.position = (self.position.0 + dx, self.position.1 + dy);
        self.remaining = self.step_frames;
    }

    fn auto_move(&self) -> &AutoMoveController {
        &self.auto_move
    }

    fn auto_move_mut(&mut self) -> &mut AutoMoveController {
        &mut self.auto_move
    }
}

pub struct TestHost {
    pub scene_active: bool,
    pub event_running: bool,
    pub message_busy: bool,
    pub destination_valid: bool,
    pub map_events: HashSet<u32>,
    pub parallel_authored: HashSet<u32>,
    pub reserved: Vec<u32>,
    pub parallel: Vec<u32>,
    pub interpreters: Vec<u32>,
    pub started: Vec<EventTarget>,
    pub player: TestPlayer,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            scene_active: true,
            event_running: false,
            message_busy: false,
            destination_valid: false,
            map_events: HashSet::new(),
            parallel_authored: HashSet::new(),
            reserved: Vec::new(),
            parallel: Vec::new(),
            interpreters: Vec::new(),
            started: Vec::new(),
            player: TestPlayer::new(),
        }
    }

    fn sync_player(&mut self) {
        self.player.blocked = self.event_running || self.message_busy;
    }

    /// The host's own movement step: advance any step in progress, then walk by input
    pub fn move_by_input(&mut self, input: &dyn InputSource) {
        self.sync_player();
        let player = &mut self.player;
        player.remaining = player.remaining.saturating_sub(1);
        if player.can_move() && !player.is_moving() {
            if let Some(direction) = input.dir4() {
                player.move_straight(direction);
            }
        }
    }

    /// One player update with auto-move wrapped around the normal movement step
    pub fn frame(&mut self, input: &dyn InputSource) {
        automove::update_player(self, input, |host, input| host.move_by_input(input));
    }
}

impl GameHost for TestHost {
    fn is_scene_active(&self) -> bool {
        self.scene_active
    }

    fn is_event_running(&self) -> bool {
        self.event_running
    }

    fn is_message_busy(&self) -> bool {
        self.message_busy
    }

    fn is_destination_valid(&self) -> bool {
        self.destination_valid
    }

    fn reserve_common_event(&mut self, id: u32) {
        self.reserved.push(id);
    }

    fn is_parallel_common_event(&self, id: u32) -> bool {
        self.parallel_authored.contains(&id)
    }

    fn add_parallel_common_event(&mut self, id: u32) {
        self.parallel.push(id);
    }

    fn spawn_common_event_interpreter(&mut self, id: u32) {
        self.interpreters.push(id);
    }

    fn start_event(&mut self, target: EventTarget) -> bool {
        let exists = match target {
            EventTarget::Player => true,
            EventTarget::Event(id) => self.map_events.contains(&id),
        };
        if exists {
            self.started.push(target);
        }
        exists
    }

    fn player(&self) -> &dyn PlayerCharacter {
        &self.player
    }

    fn player_mut(&mut self) -> &mut dyn PlayerCharacter {
        self.sync_player();
        &mut self.player
    }
}

/// Input for one frame with the given raw key codes held, mapped through the factory table
pub fn key_frame(codes: &[u32]) -> InputState {
    let mut input = InputState::new();
    for &code in codes {
        input.process_key_down(KeyCode(code));
    }
    input.update(&KeyMapper::factory());
    input
}

/// Records every script call instead of running it
pub struct RecordingScripts {
    pub log: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl ScriptRunner for RecordingScripts {
    fn run_script(&mut self, code: &str, ctx: &ScriptContext) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push((code.to_string(), ctx.source.as_ref().map(|s| s.to_string())));
        Ok(())
    }
}
