//! Platformer simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, no delta-time scaling
//! - Stable iteration order (level table order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{centers_within, falls_into_pit, lands_on_platform, touches_spike};
pub use geometry::{Rect, Size};
pub use level::{Coin, Level, Obstacle, ObstacleKind, builtin_levels};
pub use state::{GameState, LevelPhase, PlatformerState, Player, PlayerUpgrades};
pub use tick::{Effect, StepOutcome, TickInput, World, step};
