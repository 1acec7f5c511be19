//! Quest world tables: zones, NPCs, quests, achievements and coin layout

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A map zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Theme color name
    pub color: &'static str,
    pub emoji: &'static str,
}

pub const STARTING_ZONE: &str = "sacred-grove";

pub static ZONES: [Zone; 3] = [
    Zone {
        id: "sacred-grove",
        name: "Sacred Grove",
        description: "A peaceful forest where your journey begins",
        color: "green",
        emoji: "🌳",
    },
    Zone {
        id: "crystal-caves",
        name: "Crystal Caves",
        description: "Mysterious caves filled with glowing crystals",
        color: "blue",
        emoji: "💎",
    },
    Zone {
        id: "divine-peak",
        name: "Divine Peak",
        description: "The highest mountain where divine power flows",
        color: "purple",
        emoji: "⛰️",
    },
];

pub fn zone(id: &str) -> Option<&'static Zone> {
    ZONES.iter().find(|z| z.id == id)
}

/// A non-player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Npc {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub position: Vec2,
    pub zone_id: &'static str,
    pub quest_id: Option<&'static str>,
    pub dialogue: &'static [&'static str],
}

pub static NPCS: [Npc; 5] = [
    Npc {
        id: "npc-guide",
        name: "The Guide",
        emoji: "🧙",
        position: Vec2::new(300.0, 200.0),
        zone_id: "sacred-grove",
        quest_id: Some("quest-1"),
        dialogue: &[
            "Welcome, divine hero!",
            "You are \"I Am That I Am\" - a being of great power.",
            "Complete quests to earn IAM tokens and unlock new zones.",
            "Press E or tap me to interact!",
        ],
    },
    Npc {
        id: "npc-merchant",
        name: "Crystal Merchant",
        emoji: "🛒",
        position: Vec2::new(500.0, 300.0),
        zone_id: "crystal-caves",
        quest_id: None,
        dialogue: &[
            "Welcome to the Crystal Caves!",
            "Collect coins to earn IAM tokens.",
            "The more you collect, the stronger you become!",
        ],
    },
    Npc {
        id: "npc-elder",
        name: "Divine Elder",
        emoji: "👴",
        position: Vec2::new(400.0, 250.0),
        zone_id: "divine-peak",
        quest_id: None,
        dialogue: &[
            "You have reached the Divine Peak!",
            "Your journey is just beginning.",
            "Continue to explore and grow in power!",
        ],
    },
    Npc {
        id: "npc-trainer",
        name: "Combat Trainer",
        emoji: "⚔️",
        position: Vec2::new(200.0, 350.0),
        zone_id: "sacred-grove",
        quest_id: None,
        dialogue: &[
            "Train hard, hero!",
            "Level up to increase your speed and power.",
            "Every achievement brings you closer to divinity!",
        ],
    },
    Npc {
        id: "npc-collector",
        name: "Coin Collector",
        emoji: "👛",
        position: Vec2::new(600.0, 150.0),
        zone_id: "crystal-caves",
        quest_id: None,
        dialogue: &[
            "I love collecting coins!",
            "Have you found all the coins in this zone?",
            "Collect them all for a special reward!",
        ],
    },
];

pub fn npc(id: &str) -> Option<&'static Npc> {
    NPCS.iter().find(|n| n.id == id)
}

/// What completes an objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectiveKind {
    /// Interact with a specific NPC
    Talk { npc: String },
    /// Be in a zone
    Enter { zone: String },
    /// Coins collected in the quest's zone
    CollectInZone { count: usize },
    /// Coins collected anywhere
    CollectTotal { count: usize },
    ReachLevel { level: u32 },
    /// Other quests completed
    CompleteQuests { count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: String,
    pub description: String,
    pub kind: ObjectiveKind,
    pub completed: bool,
}

impl Objective {
    fn new(id: &str, description: &str, kind: ObjectiveKind) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub zone_id: String,
    pub npc_id: Option<String>,
    pub completed: bool,
    pub reward: u64,
    pub objectives: Vec<Objective>,
}

impl Quest {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        zone_id: &str,
        npc_id: Option<&str>,
        reward: u64,
        objectives: Vec<Objective>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            zone_id: zone_id.into(),
            npc_id: npc_id.map(Into::into),
            completed: false,
            reward,
            objectives,
        }
    }
}

fn talk(npc: &str) -> ObjectiveKind {
    ObjectiveKind::Talk { npc: npc.into() }
}

fn enter(zone: &str) -> ObjectiveKind {
    ObjectiveKind::Enter { zone: zone.into() }
}

pub fn initial_quests() -> Vec<Quest> {
    use ObjectiveKind::*;
    vec![
        Quest::new(
            "quest-1",
            "Welcome to IAM QUEST",
            "Meet the guide and learn about your divine powers",
            "sacred-grove",
            Some("npc-guide"),
            100,
            vec![
                Objective::new("obj-1", "Talk to the Guide", talk("npc-guide")),
                Objective::new("obj-2", "Collect 5 IAM coins", CollectInZone { count: 5 }),
            ],
        ),
        Quest::new(
            "quest-2",
            "Training Grounds",
            "Learn from the Combat Trainer",
            "sacred-grove",
            Some("npc-trainer"),
            150,
            vec![
                Objective::new("obj-2a", "Talk to Combat Trainer", talk("npc-trainer")),
                Objective::new("obj-2b", "Reach level 2", ReachLevel { level: 2 }),
            ],
        ),
        Quest::new(
            "quest-3",
            "Crystal Collector",
            "Gather crystals from the caves",
            "crystal-caves",
            None,
            200,
            vec![
                Objective::new("obj-3", "Enter Crystal Caves", enter("crystal-caves")),
                Objective::new("obj-4", "Collect 8 coins", CollectInZone { count: 8 }),
            ],
        ),
        Quest::new(
            "quest-4",
            "Merchant's Challenge",
            "Help the Crystal Merchant",
            "crystal-caves",
            Some("npc-merchant"),
            250,
            vec![
                Objective::new("obj-4a", "Talk to Crystal Merchant", talk("npc-merchant")),
                Objective::new("obj-4b", "Collect 15 coins total", CollectTotal { count: 15 }),
            ],
        ),
        Quest::new(
            "quest-5",
            "Divine Ascent",
            "Reach the Divine Peak",
            "divine-peak",
            None,
            300,
            vec![
                Objective::new("obj-5", "Reach Divine Peak", enter("divine-peak")),
                Objective::new("obj-6", "Collect 10 coins", CollectInZone { count: 10 }),
            ],
        ),
        Quest::new(
            "quest-6",
            "Elder's Wisdom",
            "Seek guidance from the Divine Elder",
            "divine-peak",
            Some("npc-elder"),
            400,
            vec![
                Objective::new("obj-6a", "Talk to Divine Elder", talk("npc-elder")),
                Objective::new("obj-6b", "Reach level 5", ReachLevel { level: 5 }),
                Objective::new("obj-6c", "Complete 3 previous quests", CompleteQuests { count: 3 }),
            ],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    /// Wall clock (ms since epoch) of the unlock
    pub unlocked_at: Option<f64>,
    pub reward: u64,
}

pub fn initial_achievements() -> Vec<Achievement> {
    [
        ("first-coin", "First Coin", "Collect your first IAM coin", "🪙", 25),
        ("coin-collector-10", "Coin Collector", "Collect 10 coins", "💰", 50),
        ("coin-master-30", "Coin Master", "Collect 30 coins", "💎", 100),
        ("coin-legend-60", "Coin Legend", "Collect all 60 coins", "👑", 500),
        ("first-quest", "Quest Starter", "Complete your first quest", "🎯", 50),
        ("quest-master", "Quest Master", "Complete all quests", "🏆", 300),
        ("zone-explorer", "Zone Explorer", "Visit all 3 zones", "🗺️", 150),
        ("level-5", "Rising Star", "Reach level 5", "⭐", 200),
        ("level-10", "Divine Warrior", "Reach level 10", "🌟", 500),
        ("token-rich", "Token Rich", "Earn 1000 IAM tokens", "💵", 250),
    ]
    .into_iter()
    .map(|(id, title, description, icon, reward)| Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        unlocked: false,
        unlocked_at: None,
        reward,
    })
    .collect()
}

/// A pick-up on the quest map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleCoin {
    pub id: String,
    pub position: Vec2,
    pub zone_id: String,
    pub collected: bool,
    pub value: u64,
}

/// Coins per zone, in `ZONES` order
const COINS_PER_ZONE: [usize; 3] = [15, 20, 25];

/// Scatter coins over every zone. Same seed, same layout.
pub fn generate_coins(seed: u64) -> Vec<CollectibleCoin> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut coins = Vec::with_capacity(COINS_PER_ZONE.iter().sum());
    for (zone, count) in ZONES.iter().zip(COINS_PER_ZONE) {
        for i in 0..count {
            let x = rng.random_range(100.0..800.0);
            let y = rng.random_range(100.0..500.0);
            coins.push(CollectibleCoin {
                id: format!("coin-{}-{}", zone.id, i),
                position: Vec2::new(x, y),
                zone_id: zone.id.to_string(),
                collected: false,
                value: rng.random_range(10..=29),
            });
        }
    }
    coins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_layout_is_seeded() {
        let a = generate_coins(7);
        assert_eq!(a, generate_coins(7));
        assert_ne!(a, generate_coins(8));
        assert_eq!(a.len(), 60);
        assert_eq!(a.iter().filter(|c| c.zone_id == "crystal-caves").count(), 20);
        for coin in &a {
            assert!((100.0..800.0).contains(&coin.position.x));
            assert!((100.0..500.0).contains(&coin.position.y));
            assert!((10..=29).contains(&coin.value));
        }
    }

    #[test]
    fn test_tables_reference_known_ids() {
        for quest in initial_quests() {
            assert!(zone(&quest.zone_id).is_some());
            if let Some(id) = &quest.npc_id {
                assert!(npc(id).is_some());
            }
        }
        for n in &NPCS {
            assert!(zone(n.zone_id).is_some());
        }
        assert_eq!(initial_achievements().len(), 10);
    }
}
