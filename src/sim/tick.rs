//! Per-frame platformer step
//!
//! `step` is a pure function of the player, the active level's geometry and
//! one frozen input snapshot. It never touches the store: anything that must
//! change outside the player (coins, level progression) comes back as an
//! `Effect` for the loop driver to commit.

use super::collision::{centers_within, falls_into_pit, lands_on_platform, touches_spike};
use super::level::{Coin, Obstacle, ObstacleKind};
use super::state::{PlatformerState, Player};
use crate::tuning::Tuning;

/// Movement input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Level-triggered; only acts while grounded
    pub jump: bool,
}

/// Side effect produced by a step
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Coin picked up; credit `value`
    CoinCollected { coin_id: String, value: u32 },
    /// Hazard contact; rewind the level
    ResetLevel,
    /// Flag reached on a non-final level
    AdvanceLevel { next: usize },
    /// Flag reached on the final level with every coin collected
    Win,
}

/// Read-only view of the level the step runs against
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub level_index: usize,
    pub is_last_level: bool,
    pub width: f32,
    pub coins: &'a [Coin],
    pub obstacles: &'a [Obstacle],
}

impl<'a> World<'a> {
    /// View over the active level of a session
    pub fn of(state: &'a PlatformerState) -> Self {
        Self {
            level_index: state.current_level_index,
            is_last_level: state.is_last_level(),
            width: state.current_level().width,
            coins: &state.current_coins,
            obstacles: &state.current_obstacles,
        }
    }
}

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub player: Player,
    pub effects: Vec<Effect>,
}

impl StepOutcome {
    pub fn hit_hazard(&self) -> bool {
        self.effects.contains(&Effect::ResetLevel)
    }
}

/// Advance the player by one frame
pub fn step(player: &Player, world: &World<'_>, input: &TickInput, tuning: &Tuning) -> StepOutcome {
    let mut next = player.clone();
    let mut effects = Vec::new();

    // Horizontal: left wins over right, otherwise decay
    if input.left {
        next.velocity.x = -tuning.move_speed;
        next.facing_right = false;
    } else if input.right {
        next.velocity.x = tuning.move_speed;
        next.facing_right = true;
    } else {
        next.velocity.x *= tuning.ground_friction;
    }

    // Grounding is re-derived every frame
    next.on_ground = false;
    if input.jump && player.on_ground {
        next.velocity.y = tuning.jump_power;
    }

    next.velocity.y += tuning.gravity;
    next.position += next.velocity;

    // World floor
    if next.position.y + next.size.height >= tuning.ground_y {
        next.position.y = tuning.ground_y - next.size.height;
        next.velocity.y = 0.0;
        next.on_ground = true;
    }

    // One-way platforms; the last match in order wins
    for obstacle in world.obstacles.iter().filter(|o| o.kind == ObstacleKind::Platform) {
        let platform = obstacle.rect();
        if lands_on_platform(&next.rect(), next.velocity.y, &platform, tuning.platform_snap_tolerance) {
            next.position.y = platform.top() - next.size.height;
            next.velocity.y = 0.0;
            next.on_ground = true;
        }
    }

    let body = next.rect();

    let mut picked_up = 0;
    for coin in world.coins.iter().filter(|c| !c.collected) {
        if centers_within(&body, &coin.rect(), tuning.coin_pickup_radius) {
            picked_up += 1;
            effects.push(Effect::CoinCollected {
                coin_id: coin.id.clone(),
                value: coin.value,
            });
        }
    }

    let hazard = world.obstacles.iter().any(|o| match o.kind {
        ObstacleKind::Spike => touches_spike(&body, &o.rect()),
        ObstacleKind::Pit => falls_into_pit(&body, &o.rect()),
        _ => false,
    });
    if hazard {
        effects.push(Effect::ResetLevel);
    }

    // Barriers are a render-layer gate only: no physics here.

    if let Some(flag) = world.obstacles.iter().find(|o| o.kind == ObstacleKind::Flag) {
        if centers_within(&body, &flag.rect(), tuning.flag_reach_radius) {
            if world.is_last_level {
                let collected = world.coins.iter().filter(|c| c.collected).count() + picked_up;
                if collected == world.coins.len() {
                    effects.push(Effect::Win);
                }
            } else {
                effects.push(Effect::AdvanceLevel {
                    next: world.level_index + 1,
                });
            }
        }
    }

    // Horizontal world bounds only
    let max_x = (world.width - next.size.width).max(0.0);
    next.position.x = next.position.x.clamp(0.0, max_x);

    StepOutcome {
        player: next,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::builtin_levels;
    use glam::Vec2;

    fn empty_world(width: f32) -> World<'static> {
        World {
            level_index: 0,
            is_last_level: false,
            width,
            coins: &[],
            obstacles: &[],
        }
    }

    fn grounded_player(x: f32) -> Player {
        let mut p = Player::new(Vec2::new(x, GROUND_Y - PLAYER_HEIGHT));
        p.on_ground = true;
        p
    }

    #[test]
    fn test_left_beats_right() {
        let p = grounded_player(500.0);
        let input = TickInput {
            left: true,
            right: true,
            jump: false,
        };
        let out = step(&p, &empty_world(3000.0), &input, &Tuning::default());
        assert_eq!(out.player.velocity.x, -MOVE_SPEED);
        assert_eq!(out.player.position.x, 495.0);
        assert!(!out.player.facing_right);
    }

    #[test]
    fn test_friction_decays_without_reaching_zero() {
        let mut p = grounded_player(500.0);
        p.velocity.x = 5.0;
        let world = empty_world(3000.0);
        let tuning = Tuning::default();
        let mut out = step(&p, &world, &TickInput::default(), &tuning);
        assert!((out.player.velocity.x - 4.25).abs() < 1e-5);
        for _ in 0..50 {
            out = step(&out.player, &world, &TickInput::default(), &tuning);
        }
        assert!(out.player.velocity.x > 0.0);
        assert!(out.player.velocity.x < 0.01);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let tuning = Tuning::default();
        let world = empty_world(3000.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let out = step(&grounded_player(100.0), &world, &jump, &tuning);
        assert!((out.player.velocity.y - (JUMP_POWER + GRAVITY)).abs() < 1e-5);
        assert!(!out.player.on_ground);

        // Holding jump in the air does nothing extra
        let airborne = step(&out.player, &world, &jump, &tuning);
        assert!((airborne.player.velocity.y - (JUMP_POWER + 2.0 * GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_floor_catches_player() {
        let mut p = Player::new(Vec2::new(100.0, 495.0));
        p.velocity.y = 12.0;
        let out = step(&p, &empty_world(3000.0), &TickInput::default(), &Tuning::default());
        assert_eq!(out.player.position.y + out.player.size.height, GROUND_Y);
        assert_eq!(out.player.velocity.y, 0.0);
        assert!(out.player.on_ground);
    }

    #[test]
    fn test_lands_on_platform() {
        let obstacles = [Obstacle::new("p", 500.0, 450.0, 200.0, 20.0, ObstacleKind::Platform)];
        let world = World {
            obstacles: &obstacles,
            ..empty_world(3000.0)
        };
        let mut p = Player::new(Vec2::new(550.0, 396.0));
        p.velocity.y = 4.0;
        let out = step(&p, &world, &TickInput::default(), &Tuning::default());
        assert_eq!(out.player.position.y, 400.0);
        assert!(out.player.on_ground);
        assert_eq!(out.player.velocity.y, 0.0);
    }

    #[test]
    fn test_clamps_to_world_width() {
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let out = step(&grounded_player(958.0), &empty_world(1000.0), &right, &Tuning::default());
        assert_eq!(out.player.position.x, 960.0);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let out = step(&grounded_player(2.0), &empty_world(1000.0), &left, &Tuning::default());
        assert_eq!(out.player.position.x, 0.0);
    }

    #[test]
    fn test_spike_overlap_emits_reset() {
        let obstacles = [Obstacle::new("s", 100.0, 480.0, 40.0, 50.0, ObstacleKind::Spike)];
        let world = World {
            obstacles: &obstacles,
            ..empty_world(3000.0)
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert!(out.hit_hazard());
    }

    #[test]
    fn test_sinking_into_pit_emits_reset() {
        let obstacles = [Obstacle::new("pit", 80.0, 540.0, 100.0, 50.0, ObstacleKind::Pit)];
        let world = World {
            obstacles: &obstacles,
            ..empty_world(3000.0)
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert_eq!(out.effects, vec![Effect::ResetLevel]);

        // Same height, clear of the pit horizontally
        let out = step(&grounded_player(400.0), &world, &TickInput::default(), &Tuning::default());
        assert!(!out.hit_hazard());
    }

    #[test]
    fn test_builtin_floor_spikes_are_flush_with_floor() {
        // Floor spikes start exactly at the floor line, so a grounded player
        // walking over them never overlaps.
        let levels = builtin_levels();
        let world = World {
            obstacles: &levels[0].obstacles,
            ..empty_world(levels[0].width)
        };
        let out = step(&grounded_player(700.0), &world, &TickInput::default(), &Tuning::default());
        assert!(!out.hit_hazard());
    }

    #[test]
    fn test_coin_pickup_and_reset_in_same_step() {
        let coins = [Coin {
            id: "c".into(),
            position: Vec2::new(105.0, 495.0),
            size: crate::sim::Size::new(COIN_SIZE, COIN_SIZE),
            collected: false,
            value: 10,
        }];
        let obstacles = [Obstacle::new("s", 100.0, 480.0, 40.0, 50.0, ObstacleKind::Spike)];
        let world = World {
            coins: &coins,
            obstacles: &obstacles,
            ..empty_world(3000.0)
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert_eq!(
            out.effects,
            vec![
                Effect::CoinCollected {
                    coin_id: "c".into(),
                    value: 10
                },
                Effect::ResetLevel
            ]
        );
    }

    #[test]
    fn test_flag_without_win_condition_is_inert_on_last_level() {
        let coins = [Coin {
            id: "far".into(),
            position: Vec2::new(2000.0, 100.0),
            size: crate::sim::Size::new(COIN_SIZE, COIN_SIZE),
            collected: false,
            value: 20,
        }];
        let obstacles = [Obstacle::new("flag", 100.0, 480.0, 40.0, 50.0, ObstacleKind::Flag)];
        let world = World {
            level_index: 2,
            is_last_level: true,
            width: 3000.0,
            coins: &coins,
            obstacles: &obstacles,
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert!(out.effects.is_empty());
    }

    #[test]
    fn test_last_coin_picked_up_on_flag_counts_toward_win() {
        let coin = |id: &str, x: f32, y: f32, collected: bool| Coin {
            id: id.into(),
            position: Vec2::new(x, y),
            size: crate::sim::Size::new(COIN_SIZE, COIN_SIZE),
            collected,
            value: 20,
        };
        let coins = [coin("done", 2000.0, 100.0, true), coin("last", 105.0, 510.0, false)];
        let obstacles = [Obstacle::new("flag", 100.0, 480.0, 40.0, 50.0, ObstacleKind::Flag)];
        let world = World {
            level_index: 2,
            is_last_level: true,
            width: 3000.0,
            coins: &coins,
            obstacles: &obstacles,
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert_eq!(
            out.effects,
            vec![
                Effect::CoinCollected {
                    coin_id: "last".into(),
                    value: 20
                },
                Effect::Win
            ]
        );
    }

    #[test]
    fn test_flag_advances_non_final_level() {
        let obstacles = [Obstacle::new("flag", 100.0, 480.0, 40.0, 50.0, ObstacleKind::Flag)];
        let world = World {
            obstacles: &obstacles,
            ..empty_world(3000.0)
        };
        let out = step(&grounded_player(100.0), &world, &TickInput::default(), &Tuning::default());
        assert_eq!(out.effects, vec![Effect::AdvanceLevel { next: 1 }]);
    }

    #[test]
    fn test_level_without_flag_never_finishes() {
        let world = empty_world(3000.0);
        let out = step(&grounded_player(2900.0), &world, &TickInput::default(), &Tuning::default());
        assert!(out.effects.is_empty());
    }
}
