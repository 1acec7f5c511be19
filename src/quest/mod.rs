//! Top-down quest game
//!
//! A free-roaming map split in zones, with NPCs to talk to, coins to pick
//! up, quests whose objectives complete as the player progresses, and a
//! daily login bonus. Movement is position-only: no physics.

pub mod data;
pub mod state;
pub mod store;

pub use data::{
    Achievement, CollectibleCoin, NPCS, Npc, Objective, ObjectiveKind, Quest, ZONES, Zone, generate_coins,
};
pub use state::{DailyLogin, PlayerStats, QuestPlayer, QuestState};
pub use store::{QuestSnapshot, QuestStore};
