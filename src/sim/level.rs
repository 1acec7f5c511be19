//! Level geometry and the built-in level tables

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use crate::consts::*;

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub position: Vec2,
    pub size: Size,
    /// Set once per level entry, cleared only by a level reset/re-entry
    pub collected: bool,
    pub value: u32,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Resets the level on any overlap
    Spike,
    /// Resets the level when the player sinks past its top edge
    Pit,
    /// One-way surface, landable from above only
    Platform,
    /// Visual gate, hidden once the coin quota is met
    Barrier,
    /// Level end marker
    Flag,
}

/// A static obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub position: Vec2,
    pub size: Size,
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(id: impl Into<String>, x: f32, y: f32, w: f32, h: f32, kind: ObstacleKind) -> Self {
        Self {
            id: id.into(),
            position: Vec2::new(x, y),
            size: Size::new(w, h),
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// Static description of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub name: String,
    pub description: String,
    pub width: f32,
    pub height: f32,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub start_position: Vec2,
    pub end_position: Vec2,
    pub required_coins: usize,
    /// Only mutated by unlocking, false -> true
    pub unlocked: bool,
}

impl Level {
    /// Fresh working copy of the coin list (every coin uncollected)
    pub fn fresh_coins(&self) -> Vec<Coin> {
        self.coins
            .iter()
            .map(|c| Coin {
                collected: false,
                ..c.clone()
            })
            .collect()
    }

    /// First flag obstacle, if the level has one
    pub fn flag(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.kind == ObstacleKind::Flag)
    }
}

fn coin_row(level: u32, count: u32, value: u32, place: impl Fn(f32) -> (f32, f32)) -> Vec<Coin> {
    (0..count)
        .map(|i| {
            let (x, y) = place(i as f32);
            Coin {
                id: format!("coin-{level}-{i}"),
                position: Vec2::new(x, y),
                size: Size::new(COIN_SIZE, COIN_SIZE),
                collected: false,
                value,
            }
        })
        .collect()
}

fn level_1() -> Level {
    use ObstacleKind::*;
    Level {
        id: "level-1".into(),
        name: "The Awakening".into(),
        description: "Begin your journey to restore balance".into(),
        width: 3000.0,
        height: 600.0,
        coins: coin_row(1, 15, 10, |i| (200.0 + i * 180.0, 400.0 - i.sin() * 50.0)),
        obstacles: vec![
            Obstacle::new("platform-1", 500.0, 450.0, 200.0, 20.0, Platform),
            Obstacle::new("platform-2", 900.0, 400.0, 200.0, 20.0, Platform),
            Obstacle::new("platform-3", 1300.0, 350.0, 200.0, 20.0, Platform),
            Obstacle::new("platform-4", 1700.0, 300.0, 200.0, 20.0, Platform),
            Obstacle::new("spike-1", 700.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("spike-2", 1100.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("spike-3", 1500.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("barrier-1", 2000.0, 200.0, 50.0, 400.0, Barrier),
            Obstacle::new("flag-1", 2800.0, 300.0, 50.0, 200.0, Flag),
        ],
        start_position: Vec2::new(50.0, 500.0),
        end_position: Vec2::new(2800.0, 300.0),
        required_coins: 10,
        unlocked: true,
    }
}

fn level_2() -> Level {
    use ObstacleKind::*;
    Level {
        id: "level-2".into(),
        name: "The Descent".into(),
        description: "Navigate through treacherous paths".into(),
        width: 3500.0,
        height: 600.0,
        coins: coin_row(2, 20, 15, |i| {
            (200.0 + i * 160.0, 350.0 - (i * 0.5).cos() * 80.0)
        }),
        obstacles: vec![
            Obstacle::new("platform-2-1", 400.0, 450.0, 150.0, 20.0, Platform),
            Obstacle::new("platform-2-2", 700.0, 400.0, 150.0, 20.0, Platform),
            Obstacle::new("platform-2-3", 1000.0, 350.0, 150.0, 20.0, Platform),
            Obstacle::new("platform-2-4", 1300.0, 300.0, 150.0, 20.0, Platform),
            Obstacle::new("platform-2-5", 1600.0, 250.0, 150.0, 20.0, Platform),
            Obstacle::new("spike-2-1", 600.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("spike-2-2", 900.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("spike-2-3", 1200.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("spike-2-4", 1500.0, 550.0, 40.0, 50.0, Spike),
            Obstacle::new("pit-2-1", 1800.0, 550.0, 200.0, 50.0, Pit),
            Obstacle::new("pit-2-2", 2200.0, 550.0, 200.0, 50.0, Pit),
            Obstacle::new("barrier-2-1", 2500.0, 200.0, 50.0, 400.0, Barrier),
            Obstacle::new("flag-2", 3300.0, 300.0, 50.0, 200.0, Flag),
        ],
        start_position: Vec2::new(50.0, 500.0),
        end_position: Vec2::new(3300.0, 300.0),
        required_coins: 15,
        unlocked: false,
    }
}

fn level_3() -> Level {
    use ObstacleKind::*;
    let mut obstacles = vec![
        Obstacle::new("platform-3-1", 300.0, 450.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-2", 500.0, 400.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-3", 700.0, 350.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-4", 900.0, 300.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-5", 1100.0, 250.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-6", 1300.0, 200.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-7", 1500.0, 250.0, 100.0, 20.0, Platform),
        Obstacle::new("platform-3-8", 1700.0, 300.0, 100.0, 20.0, Platform),
    ];
    obstacles.extend(
        (0..10).map(|i| {
            Obstacle::new(format!("spike-3-{i}"), 400.0 + i as f32 * 350.0, 550.0, 40.0, 50.0, Spike)
        }),
    );
    obstacles.extend([
        Obstacle::new("pit-3-1", 2000.0, 550.0, 300.0, 50.0, Pit),
        Obstacle::new("pit-3-2", 2500.0, 550.0, 300.0, 50.0, Pit),
        Obstacle::new("barrier-3-1", 3000.0, 200.0, 50.0, 400.0, Barrier),
        Obstacle::new("flag-3", 3800.0, 300.0, 50.0, 200.0, Flag),
    ]);

    Level {
        id: "level-3".into(),
        name: "The Awakening".into(),
        description: "Give back to restore balance".into(),
        width: 4000.0,
        height: 600.0,
        coins: coin_row(3, 25, 20, |i| {
            (200.0 + i * 150.0, 300.0 - (i * 0.3).sin() * 100.0)
        }),
        obstacles,
        start_position: Vec2::new(50.0, 500.0),
        end_position: Vec2::new(3800.0, 300.0),
        required_coins: 20,
        unlocked: false,
    }
}

/// The built-in campaign, in play order. Only the first level starts unlocked.
pub fn builtin_levels() -> Vec<Level> {
    vec![level_1(), level_2(), level_3()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 3);
        assert!(levels[0].unlocked);
        assert!(levels.iter().skip(1).all(|l| !l.unlocked));

        let coin_counts: Vec<_> = levels.iter().map(|l| l.coins.len()).collect();
        assert_eq!(coin_counts, vec![15, 20, 25]);

        for level in &levels {
            assert!(level.required_coins <= level.coins.len());
            assert!(level.flag().is_some());
            assert!(level.coins.iter().all(|c| !c.collected));
        }
        assert_eq!(
            levels[2].obstacles.iter().filter(|o| o.kind == ObstacleKind::Spike).count(),
            10
        );
    }

    #[test]
    fn test_fresh_coins_clears_flags() {
        let mut level = level_1();
        level.coins[3].collected = true;
        let fresh = level.fresh_coins();
        assert!(fresh.iter().all(|c| !c.collected));
        assert_eq!(fresh[3].id, "coin-1-3");
    }

    #[test]
    fn test_obstacle_kind_serializes_lowercase() {
        let obstacle = Obstacle::new("flag-1", 0.0, 0.0, 1.0, 1.0, ObstacleKind::Flag);
        let json = serde_json::to_string(&obstacle).unwrap();
        assert!(json.contains("\"type\":\"flag\""));
    }
}
