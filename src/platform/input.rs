//! Input sampling
//!
//! Key events only update a held-key set; the loop samples it once per frame
//! into a frozen `TickInput`.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Held keyboard keys, stored as lowercased `KeyboardEvent.key` values
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// Drop every held key (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }

    pub fn left(&self) -> bool {
        self.any(&["a", "arrowleft"])
    }

    pub fn right(&self) -> bool {
        self.any(&["d", "arrowright"])
    }

    pub fn up(&self) -> bool {
        self.any(&["w", "arrowup"])
    }

    pub fn down(&self) -> bool {
        self.any(&["s", "arrowdown"])
    }

    /// Platformer jump: up keys or space
    pub fn jump(&self) -> bool {
        self.up() || self.is_held(" ")
    }

    /// Held directions for the top-down quest map, in a fixed order
    pub fn directions(&self) -> Vec<Direction> {
        sample_directions(self, &MobileButtons::default())
    }
}

/// On-screen touch controls (up/down only exist on the quest map)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileButtons {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub up: bool,
    pub down: bool,
}

/// Freeze keyboard and touch state into one frame's input
pub fn sample(keys: &KeyboardState, buttons: &MobileButtons) -> TickInput {
    TickInput {
        left: keys.left() || buttons.left,
        right: keys.right() || buttons.right,
        jump: keys.jump() || buttons.jump,
    }
}

/// Held quest map directions from keys and touch buttons, in a fixed order
pub fn sample_directions(keys: &KeyboardState, buttons: &MobileButtons) -> Vec<Direction> {
    [
        (keys.up() || buttons.up, Direction::Up),
        (keys.down() || buttons.down, Direction::Down),
        (keys.left() || buttons.left, Direction::Left),
        (keys.right() || buttons.right, Direction::Right),
    ]
    .into_iter()
    .filter_map(|(held, dir)| held.then_some(dir))
    .collect()
}

/// Quest map movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::NEG_Y,
            Self::Down => Vec2::Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
        }
    }
}
