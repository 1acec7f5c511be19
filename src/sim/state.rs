//! Platformer session state
//!
//! `PlatformerState` is the whole session: campaign progress, the level
//! tables, the player and the working copies of the active level's coins
//! and obstacles. The mutation methods here are plain state transitions;
//! `PlatformerStore` wraps them so each one lands as a single replace.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use super::level::{Coin, Level, Obstacle, ObstacleKind, builtin_levels};
use crate::consts::*;

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Top-left corner
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    pub on_ground: bool,
    pub facing_right: bool,
    pub health: i32,
    pub max_health: i32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            on_ground: false,
            facing_right: true,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Put the player back on a start point, at rest and airborne
    fn respawn(&mut self, start: Vec2) {
        self.position = start;
        self.velocity = Vec2::ZERO;
        self.on_ground = false;
    }
}

/// Persistent upgrade values (speed and jump are informational)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpgrades {
    pub speed: f32,
    pub jump_power: f32,
    pub health: i32,
}

impl Default for PlayerUpgrades {
    fn default() -> Self {
        Self {
            speed: MOVE_SPEED,
            jump_power: JUMP_POWER,
            health: PLAYER_MAX_HEALTH,
        }
    }
}

/// Campaign progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_level: usize,
    /// Total IAM earned; only lowered by a full game reset
    #[serde(rename = "totalIAM")]
    pub total_iam: u64,
    /// Set semantics, order irrelevant
    pub levels_unlocked: Vec<usize>,
    pub player_upgrades: PlayerUpgrades,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_level: 0,
            total_iam: 0,
            levels_unlocked: vec![0],
            player_upgrades: PlayerUpgrades::default(),
        }
    }
}

/// Progression phase of the active level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Normal play
    Playing,
    /// Flag reached; switch to `target` once the clock passes `deadline_ms`
    AdvancePending { target: usize, deadline_ms: f64 },
    /// Final level completed with every coin; simulation is frozen
    Won,
}

/// Complete platformer session state
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformerState {
    pub game_state: GameState,
    pub current_level_index: usize,
    pub player: Player,
    /// Level tables, shared between copies until a level is unlocked
    pub levels: Arc<Vec<Level>>,
    /// Working copy of the active level's coins
    pub current_coins: Vec<Coin>,
    /// The active level's obstacles (never edited in place)
    pub current_obstacles: Arc<Vec<Obstacle>>,
    pub phase: LevelPhase,
    pub dark_mode: bool,
    pub show_win_screen: bool,
}

impl Default for PlatformerState {
    fn default() -> Self {
        Self::with_levels(builtin_levels())
    }
}

impl PlatformerState {
    /// Fresh session over the given level tables, entering the first level.
    ///
    /// `levels` must be non-empty.
    pub fn with_levels(levels: Vec<Level>) -> Self {
        let first = &levels[0];
        let player = Player::new(first.start_position);
        let current_coins = first.fresh_coins();
        let current_obstacles = Arc::new(first.obstacles.clone());
        Self {
            game_state: GameState::default(),
            current_level_index: 0,
            player,
            levels: Arc::new(levels),
            current_coins,
            current_obstacles,
            phase: LevelPhase::Playing,
            dark_mode: false,
            show_win_screen: false,
        }
    }

    /// The active level
    pub fn current_level(&self) -> &Level {
        &self.levels[self.current_level_index]
    }

    pub fn is_last_level(&self) -> bool {
        self.current_level_index + 1 == self.levels.len()
    }

    pub fn collected_count(&self) -> usize {
        self.current_coins.iter().filter(|c| c.collected).count()
    }

    pub fn all_coins_collected(&self) -> bool {
        self.current_coins.iter().all(|c| c.collected)
    }

    /// Whether the coin quota for the active level is met
    pub fn barrier_open(&self) -> bool {
        self.collected_count() >= self.current_level().required_coins
    }

    /// Obstacles that are rendered / collidable right now (barrier dropped once open)
    pub fn visible_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        let open = self.barrier_open();
        self.current_obstacles
            .iter()
            .filter(move |o| !(open && o.kind == ObstacleKind::Barrier))
    }

    /// Mark a coin collected and credit its value.
    ///
    /// Returns the credited value, or `None` for an unknown or already
    /// collected coin (no-op).
    pub fn collect_coin(&mut self, coin_id: &str) -> Option<u32> {
        let coin = self
            .current_coins
            .iter_mut()
            .find(|c| c.id == coin_id && !c.collected)?;
        coin.collected = true;
        let value = coin.value;
        self.game_state.total_iam += u64::from(value);
        Some(value)
    }

    /// Enter a level. No-op (returns false) for an out-of-range or locked level.
    pub fn select_level(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get(index).filter(|l| l.unlocked) else {
            return false;
        };
        let start = level.start_position;
        self.current_coins = level.fresh_coins();
        self.current_obstacles = Arc::new(level.obstacles.clone());
        self.current_level_index = index;
        self.game_state.current_level = index;
        self.player.respawn(start);
        self.phase = LevelPhase::Playing;
        true
    }

    /// Unlock the level after the active one. No-op on the last level.
    pub fn unlock_next_level(&mut self) -> bool {
        let next = self.current_level_index + 1;
        if next >= self.levels.len() {
            return false;
        }
        if !self.levels[next].unlocked {
            Arc::make_mut(&mut self.levels)[next].unlocked = true;
        }
        if !self.game_state.levels_unlocked.contains(&next) {
            self.game_state.levels_unlocked.push(next);
        }
        true
    }

    /// Rewind the active level: player back to start, every coin uncollected
    pub fn reset_level(&mut self) {
        let level = &self.levels[self.current_level_index];
        let start = level.start_position;
        self.current_coins = level.fresh_coins();
        self.player.respawn(start);
        self.player.health = self.game_state.player_upgrades.health;
    }

    /// Full reset to a brand new campaign (keeps the dark mode preference)
    pub fn reset_game(&mut self) {
        let dark_mode = self.dark_mode;
        let mut levels = std::mem::take(Arc::make_mut(&mut self.levels));
        for (i, level) in levels.iter_mut().enumerate() {
            level.unlocked = i == 0;
        }
        *self = Self::with_levels(levels);
        self.dark_mode = dark_mode;
    }

    /// Re-derive the working copies after a snapshot load
    pub(crate) fn resync_current_level(&mut self) {
        if self.current_level_index >= self.levels.len() {
            self.current_level_index = 0;
        }
        let level = &self.levels[self.current_level_index];
        let start = level.start_position;
        self.current_coins = level.fresh_coins();
        self.current_obstacles = Arc::new(level.obstacles.clone());
        self.game_state.current_level = self.current_level_index;
        self.player.respawn(start);
        self.phase = LevelPhase::Playing;
    }
}
