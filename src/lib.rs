//! IAM Awakening - browser platformer and top-down quest game
//!
//! Core modules:
//! - `sim`: Platformer simulation (levels, physics step, collisions)
//! - `game_loop`: Per-frame driver that feeds input into the step and commits effects
//! - `store`: Owned platformer state container with single-replace mutations
//! - `quest`: Top-down exploration game state and store
//! - `notify`: Notification queue consumed by the UI layer
//! - `platform`: Browser/native platform abstraction (input, clock)
//! - `persistence`: Snapshot save/load over a key-value storage
//! - `tuning`: Data-driven physics constants

pub mod game_loop;
pub mod notify;
pub mod persistence;
pub mod platform;
pub mod quest;
pub mod sim;
pub mod store;
pub mod tuning;

pub use game_loop::{GameLoop, LoopHandle};
pub use notify::{Notification, NotificationKind, NotificationQueue};
pub use quest::QuestStore;
pub use store::{Persisted, PlatformerStore, Store};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to velocity.y every frame
    pub const GRAVITY: f32 = 0.8;
    /// Jump impulse (negative = upward, screen coordinates)
    pub const JUMP_POWER: f32 = -15.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Per-frame horizontal decay when no direction is held
    pub const GROUND_FRICTION: f32 = 0.85;

    /// World floor (player bottom edge never goes below this)
    pub const GROUND_Y: f32 = 550.0;
    /// Vertical band below a platform top in which a falling player snaps onto it
    pub const PLATFORM_SNAP_TOLERANCE: f32 = 10.0;
    /// Center-to-center distance for picking up a coin
    pub const COIN_PICKUP_RADIUS: f32 = 40.0;
    /// Center-to-center distance for reaching the level flag
    pub const FLAG_REACH_RADIUS: f32 = 50.0;
    /// Delay between reaching a flag and switching to the next level
    pub const ADVANCE_DELAY_MS: f64 = 1000.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: i32 = 3;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 30.0;

    /// LocalStorage keys
    pub const PLATFORMER_STORAGE_KEY: &str = "iam-awakening-storage";
    pub const QUEST_STORAGE_KEY: &str = "iam-quest-storage";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Whether two points are strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}
