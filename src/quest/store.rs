//! Quest store operations and persisted snapshot

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::data::{Achievement, CollectibleCoin, Quest, zone};
use super::state::{DailyLogin, PlayerStats, QuestPlayer, QuestState};
use crate::consts::QUEST_STORAGE_KEY;
use crate::platform::Direction;
use crate::store::{Persisted, Store};

/// Persisted projection of the quest state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSnapshot {
    pub player: QuestPlayer,
    #[serde(rename = "iamTokens")]
    pub iam_tokens: u64,
    pub current_zone_id: String,
    pub quests: Vec<Quest>,
    pub active_quest_id: Option<String>,
    pub coins: Vec<CollectibleCoin>,
    pub daily_login: DailyLogin,
    pub achievements: Vec<Achievement>,
    pub player_stats: PlayerStats,
    pub dark_mode: bool,
}

impl Persisted for QuestState {
    type Snapshot = QuestSnapshot;
    const STORAGE_KEY: &'static str = QUEST_STORAGE_KEY;

    fn snapshot(&self) -> QuestSnapshot {
        QuestSnapshot {
            player: self.player.clone(),
            iam_tokens: self.iam_tokens,
            current_zone_id: self.current_zone_id.clone(),
            quests: self.quests.clone(),
            active_quest_id: self.active_quest_id.clone(),
            coins: self.coins.clone(),
            daily_login: self.daily_login.clone(),
            achievements: self.achievements.clone(),
            player_stats: self.stats.clone(),
            dark_mode: self.dark_mode,
        }
    }

    fn restore(snapshot: QuestSnapshot) -> Option<Self> {
        zone(&snapshot.current_zone_id)?;
        if snapshot.player_stats.experience_to_next_level == 0 {
            log::warn!("Quest snapshot has no experience threshold, starting fresh");
            return None;
        }
        let state = QuestState {
            player: snapshot.player,
            iam_tokens: snapshot.iam_tokens,
            current_zone_id: snapshot.current_zone_id,
            quests: snapshot.quests,
            active_quest_id: snapshot.active_quest_id,
            coins: snapshot.coins,
            daily_login: snapshot.daily_login,
            achievements: snapshot.achievements,
            stats: snapshot.player_stats,
            dark_mode: snapshot.dark_mode,
            ..QuestState::default()
        };
        log::info!("Resuming quest in {} with {} IAM", state.current_zone_id, state.iam_tokens);
        Some(state)
    }
}

/// Quest session store
pub type QuestStore = Store<QuestState>;

impl Store<QuestState> {
    pub fn set_player_position(&mut self, position: Vec2) {
        self.transact(|s, _| s.set_player_position(position));
    }

    /// Apply one movement step per held direction
    pub fn move_player(&mut self, directions: &[Direction]) {
        if directions.is_empty() {
            return;
        }
        self.transact(|s, _| {
            directions
                .iter()
                .fold(false, |moved, dir| s.move_player(*dir) | moved)
        });
    }

    pub fn nudge_player(&mut self, direction: Direction) {
        self.transact(|s, _| s.nudge_player(direction));
    }

    pub fn drag_player(&mut self, delta: Vec2) {
        self.transact(|s, _| s.drag_player(delta));
    }

    pub fn set_current_zone(&mut self, zone_id: &str) {
        self.transact(|s, notes| s.set_current_zone(zone_id, notes));
    }

    pub fn add_tokens(&mut self, amount: u64) {
        self.transact(|s, notes| s.add_tokens(amount, notes));
    }

    pub fn complete_quest(&mut self, quest_id: &str) {
        self.transact(|s, notes| s.complete_quest(quest_id, notes));
    }

    pub fn collect_coin(&mut self, coin_id: &str) {
        self.transact(|s, notes| s.collect_coin(coin_id, notes));
    }

    /// Pick up every coin in range of the player
    pub fn collect_nearby_coins(&mut self) {
        let ids: Vec<String> = self.state().nearby_coins().map(|c| c.id.clone()).collect();
        if ids.is_empty() {
            return;
        }
        self.transact(|s, notes| {
            ids.iter()
                .fold(false, |any, id| s.collect_coin(id, notes) | any)
        });
    }

    /// Talk to an NPC; returns its dialogue (`None` for an unknown NPC)
    pub fn interact_with_npc(&mut self, npc_id: &str) -> Option<&'static [&'static str]> {
        let mut dialogue = None;
        self.transact(|s, notes| {
            dialogue = s.interact_with_npc(npc_id, notes);
            dialogue.is_some()
        });
        dialogue
    }

    /// Talk to an NPC only if the player stands next to it
    pub fn interact_if_near(&mut self, npc_id: &str) -> Option<&'static [&'static str]> {
        if !self.state().can_reach_npc(npc_id) {
            return None;
        }
        self.interact_with_npc(npc_id)
    }

    /// Register the visit for calendar day `today`
    pub fn check_daily_login(&mut self, today: i64) {
        self.transact(|s, _| s.check_daily_login(today));
    }

    pub fn claim_daily_bonus(&mut self) {
        self.transact(|s, notes| s.claim_daily_bonus(notes));
    }

    pub fn add_experience(&mut self, amount: u64) {
        self.transact(|s, notes| s.add_experience(amount, notes));
    }

    pub fn unlock_achievement(&mut self, achievement_id: &str) {
        self.transact(|s, notes| s.unlock_achievement(achievement_id, notes));
    }

    pub fn add_play_time(&mut self, seconds: f64) {
        self.transact(|s, _| s.add_play_time(seconds));
    }

    pub fn toggle_dark_mode(&mut self) {
        self.transact(|s, _| {
            s.dark_mode = !s.dark_mode;
            true
        });
    }

    pub fn toggle_quest_sidebar(&mut self) {
        self.transact(|s, _| {
            s.quest_sidebar_open = !s.quest_sidebar_open;
            true
        });
    }

    pub fn toggle_stats_panel(&mut self) {
        self.transact(|s, _| {
            s.stats_panel_open = !s.stats_panel_open;
            true
        });
    }

    /// Start over with a new coin layout
    pub fn reset_game(&mut self, coin_seed: u64) {
        self.transact(|s, _| {
            s.reset(coin_seed);
            log::info!("Quest progress reset");
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::persistence::{MemoryStorage, Storage};

    #[test]
    fn test_invalid_requests_do_not_bump_version() {
        let mut store = QuestStore::new();
        store.set_current_zone("atlantis");
        store.collect_coin("coin-nowhere-0");
        store.complete_quest("quest-0");
        assert!(store.interact_with_npc("npc-ghost").is_none());
        store.move_player(&[]);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_diagonal_move_is_one_change() {
        let mut store = QuestStore::new();
        store.move_player(&[Direction::Down, Direction::Right]);
        assert_eq!(store.version(), 1);
        assert_eq!(store.state().player.position, Vec2::new(105.0, 105.0));
    }

    #[test]
    fn test_clicking_a_distant_npc_does_nothing() {
        let mut store = QuestStore::new();
        assert!(store.interact_if_near("npc-guide").is_none());
        assert_eq!(store.version(), 0);

        store.set_player_position(Vec2::new(320.0, 220.0));
        let lines = store.interact_if_near("npc-guide");
        assert_eq!(lines.map(|l| l.len()), Some(4));
        assert!(store.state().quests[0].objectives[0].completed);
    }

    #[test]
    fn test_collect_nearby_coins() {
        let mut store = QuestStore::new();
        let coin = store.state().coins[0].clone();
        store.set_player_position(coin.position);
        store.collect_nearby_coins();
        let state = store.state();
        assert!(state.coins[0].collected);
        assert!(state.iam_tokens >= coin.value);
        let notes = store.drain_notifications();
        assert!(notes.iter().any(|n| n.kind == NotificationKind::Reward));
        assert!(notes.iter().any(|n| n.kind == NotificationKind::Achievement));
    }

    #[test]
    fn test_progress_survives_reload() {
        let storage = MemoryStorage::new();
        {
            let mut store = QuestStore::with_storage(Box::new(storage.clone()));
            store.check_daily_login(20_000);
            store.claim_daily_bonus();
            store.set_current_zone("crystal-caves");
            store.toggle_quest_sidebar();
        }
        let store = QuestStore::with_storage(Box::new(storage.clone()));
        let state = store.state();
        assert_eq!(state.iam_tokens, 60);
        assert_eq!(state.current_zone_id, "crystal-caves");
        assert!(state.daily_login.claimed);
        assert!(state.quests[2].objectives[0].completed);
        // UI panels are not persisted
        assert!(!state.quest_sidebar_open);

        let json = storage.get_item(QUEST_STORAGE_KEY).unwrap().unwrap();
        assert!(json.contains("\"iamTokens\":60"));
    }

    #[test]
    fn test_snapshot_with_unknown_zone_is_rejected() {
        let mut snapshot = QuestState::default().snapshot();
        snapshot.current_zone_id = "void".into();
        assert!(QuestState::restore(snapshot).is_none());
    }

    #[test]
    fn test_snapshot_with_zero_threshold_is_rejected() {
        let mut snapshot = QuestState::default().snapshot();
        snapshot.player_stats.experience_to_next_level = 0;
        assert!(QuestState::restore(snapshot).is_none());

        let storage = MemoryStorage::new();
        let json = serde_json::to_string(&QuestState::default().snapshot())
            .unwrap()
            .replace("\"experienceToNextLevel\":100", "\"experienceToNextLevel\":0");
        storage.set_item(QUEST_STORAGE_KEY, &json).unwrap();
        let mut store = QuestStore::with_storage(Box::new(storage));
        assert_eq!(store.state().stats.experience_to_next_level, 100);
        store.add_experience(120);
        assert_eq!(store.state().stats.level, 2);
    }
}
