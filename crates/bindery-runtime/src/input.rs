//! Input state management

use crate::keymap::KeyMapper;
use bindery_core::{Direction, KeyCode, MouseButton};
use std::collections::HashSet;

/// Frames a button must be held before it starts repeating
pub const KEY_REPEAT_WAIT: u32 = 24;
/// Frames between repeats once repeating
pub const KEY_REPEAT_INTERVAL: u32 = 6;

/// Per-frame input predicates the binding layer reads from the host.
///
/// Keyboard queries take logical names from the live key-mapping table.
/// Mouse queries follow pointer conventions: the right button's edge is a
/// "cancel" gesture, and the middle button only reports a held state.
pub trait InputSource {
    fn is_pressed(&self, name: &str) -> bool;
    fn is_triggered(&self, name: &str) -> bool;
    fn is_repeated(&self, name: &str) -> bool;

    fn is_mouse_pressed(&self) -> bool;
    fn is_mouse_triggered(&self) -> bool;
    fn is_mouse_repeated(&self) -> bool;
    fn is_cancelled(&self) -> bool;
    fn is_right_pressed(&self) -> bool;
    fn is_middle_pressed(&self) -> bool;

    /// Drop edge and held state so nothing else reacts to the current press.
    /// The middle button's held state survives; only its release drops it.
    fn clear(&mut self);

    /// Held four-way direction. Vertical wins when both axes are held, unlike
    /// a host's preferred-axis rule; callers here only ask whether any
    /// direction is held.
    fn dir4(&self) -> Option<Direction> {
        let vertical = match (self.is_pressed("up"), self.is_pressed("down")) {
            (true, false) => Some(Direction::Up),
            (false, true) => Some(Direction::Down),
            _ => None,
        };
        let horizontal = match (self.is_pressed("left"), self.is_pressed("right")) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        };
        vertical.or(horizontal)
    }
}

/// Logical names that also answer to `escape`
fn is_escape_compatible(name: &str) -> bool {
    name == "cancel" || name == "menu"
}

fn is_repeat_frame(pressed_time: u32) -> bool {
    pressed_time == 0
        || (pressed_time >= KEY_REPEAT_WAIT && pressed_time % KEY_REPEAT_INTERVAL == 0)
}

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Raw key codes currently held down
    keys_down: HashSet<KeyCode>,
    /// Logical names held as of the last update
    current: HashSet<String>,
    /// Logical names held as of the update before that
    previous: HashSet<String>,
    /// Most recently pressed logical name, while still held
    latest_button: Option<String>,
    /// Frames the latest button has been held
    pressed_time: u32,

    /// Mouse buttons currently held
    mouse_buttons_down: HashSet<MouseButton>,
    /// Mouse presses received since the last update
    mouse_buttons_pending: HashSet<MouseButton>,
    /// Left button went down this frame
    mouse_triggered: bool,
    /// Right button went down this frame
    cancelled: bool,
    /// Frames the left button has been held
    mouse_pressed_time: u32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            current: HashSet::new(),
            previous: HashSet::new(),
            latest_button: None,
            pressed_time: 0,
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_pending: HashSet::new(),
            mouse_triggered: false,
            cancelled: false,
            mouse_pressed_time: 0,
        }
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: MouseButton) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_pending.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Capture this frame's state. Call once at the start of the frame,
    /// after the host has delivered its events.
    ///
    /// Raw keys are translated through `mapper` here, so a binding change
    /// takes effect on the next frame boundary and never halfway through one.
    pub fn update(&mut self, mapper: &KeyMapper) {
        let current: HashSet<String> = self
            .keys_down
            .iter()
            .filter_map(|code| mapper.get(*code))
            .map(str::to_string)
            .collect();

        let still_held = self
            .latest_button
            .as_ref()
            .is_some_and(|latest| current.contains(latest));
        if still_held {
            self.pressed_time += 1;
        } else {
            self.latest_button = None;
        }

        let mut fresh: Vec<&String> = current.difference(&self.previous).collect();
        fresh.sort();
        if let Some(name) = fresh.last() {
            self.latest_button = Some((*name).clone());
            self.pressed_time = 0;
        }

        self.previous = current.clone();
        self.current = current;

        self.mouse_triggered = self.mouse_buttons_pending.contains(&MouseButton::Left);
        self.cancelled = self.mouse_buttons_pending.contains(&MouseButton::Right);
        self.mouse_buttons_pending.clear();

        if self.mouse_triggered {
            self.mouse_pressed_time = 0;
        } else if self.mouse_buttons_down.contains(&MouseButton::Left) {
            self.mouse_pressed_time += 1;
        }
    }

    /// Is a raw key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_latest(&self, name: &str) -> bool {
        self.latest_button.as_deref() == Some(name)
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, name: &str) -> bool {
        if is_escape_compatible(name) && self.is_pressed("escape") {
            return true;
        }
        self.current.contains(name)
    }

    fn is_triggered(&self, name: &str) -> bool {
        if is_escape_compatible(name) && self.is_triggered("escape") {
            return true;
        }
        self.is_latest(name) && self.pressed_time == 0
    }

    fn is_repeated(&self, name: &str) -> bool {
        if is_escape_compatible(name) && self.is_repeated("escape") {
            return true;
        }
        self.is_latest(name) && is_repeat_frame(self.pressed_time)
    }

    fn is_mouse_pressed(&self) -> bool {
        self.mouse_buttons_down.contains(&MouseButton::Left)
    }

    fn is_mouse_triggered(&self) -> bool {
        self.mouse_triggered
    }

    fn is_mouse_repeated(&self) -> bool {
        self.is_mouse_pressed() && is_repeat_frame(self.mouse_pressed_time)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn is_right_pressed(&self) -> bool {
        self.mouse_buttons_down.contains(&MouseButton::Right)
    }

    fn is_middle_pressed(&self) -> bool {
        self.mouse_buttons_down.contains(&MouseButton::Middle)
    }

    fn clear(&mut self) {
        self.keys_down.clear();
        self.current.clear();
        self.previous.clear();
        self.latest_button = None;
        self.pressed_time = 0;
        self.mouse_buttons_down.retain(|b| *b == MouseButton::Middle);
        self.mouse_buttons_pending.clear();
        self.mouse_triggered = false;
        self.cancelled = false;
        self.mouse_pressed_time = 0;
    }
}
