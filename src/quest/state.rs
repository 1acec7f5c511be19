//! Quest session state and its transitions
//!
//! Objectives are evaluated against the state after every mutation
//! (`settle`), so a single action can cascade: a quest completion grants
//! experience, the level-up satisfies a "reach level" objective, and so on
//! until nothing else changes. Each quest and achievement pays out once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::data::*;
use crate::notify::{NotificationKind, NotificationQueue};
use crate::platform::Direction;
use crate::within;

/// Map bounds for player movement (inclusive)
pub const MAP_WIDTH: f32 = 800.0;
pub const MAP_HEIGHT: f32 = 600.0;
/// Interaction range around an NPC
pub const NPC_REACH: f32 = 80.0;
/// Pick-up range around a coin
pub const COIN_REACH: f32 = 50.0;
/// Experience granted per completed quest
pub const QUEST_XP: u64 = 50;
/// A tap on the direction pad moves this many regular steps
pub const TAP_STEP_MULTIPLIER: f32 = 3.0;
/// Map units moved per pixel of touch drag
pub const DRAG_SCALE: f32 = 0.5;
/// Seed of the default coin layout
pub const DEFAULT_COIN_SEED: u64 = 0x1a3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestPlayer {
    /// Sprite center
    pub position: Vec2,
    pub current_zone: String,
    pub speed: f32,
}

impl Default for QuestPlayer {
    fn default() -> Self {
        Self {
            position: Vec2::new(100.0, 100.0),
            current_zone: STARTING_ZONE.to_string(),
            speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next_level: u64,
    pub total_coins_collected: usize,
    pub total_quests_completed: usize,
    pub total_tokens_earned: u64,
    /// Seconds
    pub play_time: f64,
    pub zones_visited: Vec<String>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next_level: 100,
            total_coins_collected: 0,
            total_quests_completed: 0,
            total_tokens_earned: 0,
            play_time: 0.0,
            zones_visited: vec![STARTING_ZONE.to_string()],
        }
    }
}

/// Daily login streak; days are local calendar day numbers (see `platform::day_number`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogin {
    pub last_login_day: Option<i64>,
    pub streak: u32,
    pub claimed: bool,
}

impl DailyLogin {
    pub fn bonus(&self) -> u64 {
        50 + 10 * u64::from(self.streak)
    }
}

/// Complete quest session state
#[derive(Debug, Clone, PartialEq)]
pub struct QuestState {
    pub player: QuestPlayer,
    /// Only lowered by a full reset
    pub iam_tokens: u64,
    pub current_zone_id: String,
    pub quests: Vec<Quest>,
    pub active_quest_id: Option<String>,
    pub coins: Vec<CollectibleCoin>,
    pub daily_login: DailyLogin,
    pub achievements: Vec<Achievement>,
    pub stats: PlayerStats,
    pub dark_mode: bool,
    pub quest_sidebar_open: bool,
    pub stats_panel_open: bool,
    pub coin_seed: u64,
}

impl Default for QuestState {
    fn default() -> Self {
        Self::new(DEFAULT_COIN_SEED)
    }
}

impl QuestState {
    pub fn new(coin_seed: u64) -> Self {
        Self {
            player: QuestPlayer::default(),
            iam_tokens: 0,
            current_zone_id: STARTING_ZONE.to_string(),
            quests: initial_quests(),
            active_quest_id: Some("quest-1".to_string()),
            coins: generate_coins(coin_seed),
            daily_login: DailyLogin::default(),
            achievements: initial_achievements(),
            stats: PlayerStats::default(),
            dark_mode: false,
            quest_sidebar_open: false,
            stats_panel_open: false,
            coin_seed,
        }
    }

    pub fn current_zone(&self) -> Option<&'static Zone> {
        zone(&self.current_zone_id)
    }

    pub fn active_quest(&self) -> Option<&Quest> {
        let id = self.active_quest_id.as_deref()?;
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn completed_quests(&self) -> usize {
        self.quests.iter().filter(|q| q.completed).count()
    }

    pub fn collected_in_zone(&self, zone_id: &str) -> usize {
        self.coins
            .iter()
            .filter(|c| c.collected && c.zone_id == zone_id)
            .count()
    }

    pub fn collected_total(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }

    /// First NPC of the current zone within interaction range
    pub fn nearby_npc(&self) -> Option<&'static Npc> {
        NPCS.iter().find(|n| {
            n.zone_id == self.current_zone_id && within(self.player.position, n.position, NPC_REACH)
        })
    }

    /// Uncollected coins of the current zone within pick-up range
    pub fn nearby_coins(&self) -> impl Iterator<Item = &CollectibleCoin> {
        self.coins.iter().filter(|c| {
            !c.collected
                && c.zone_id == self.current_zone_id
                && within(self.player.position, c.position, COIN_REACH)
        })
    }

    pub fn set_player_position(&mut self, position: Vec2) -> bool {
        if self.player.position == position {
            return false;
        }
        self.player.position = position;
        true
    }

    /// One movement step, clamped to the map
    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.shift_player(direction.unit() * self.player.speed)
    }

    /// Direction pad tap: a longer step
    pub fn nudge_player(&mut self, direction: Direction) -> bool {
        self.shift_player(direction.unit() * self.player.speed * TAP_STEP_MULTIPLIER)
    }

    /// Touch drag by `delta` screen pixels
    pub fn drag_player(&mut self, delta: Vec2) -> bool {
        self.shift_player(delta * DRAG_SCALE)
    }

    fn shift_player(&mut self, offset: Vec2) -> bool {
        let pos = (self.player.position + offset).clamp(Vec2::ZERO, Vec2::new(MAP_WIDTH, MAP_HEIGHT));
        self.set_player_position(pos)
    }

    /// Whether `npc_id` stands in the current zone within reach of the player
    pub fn can_reach_npc(&self, npc_id: &str) -> bool {
        npc(npc_id).is_some_and(|n| {
            n.zone_id == self.current_zone_id && within(self.player.position, n.position, NPC_REACH)
        })
    }

    /// Travel to a zone (no-op for an unknown zone)
    pub fn set_current_zone(&mut self, zone_id: &str, notes: &mut NotificationQueue) -> bool {
        let Some(zone) = zone(zone_id) else {
            return false;
        };
        self.current_zone_id = zone.id.to_string();
        self.player.current_zone = zone.id.to_string();
        if !self.stats.zones_visited.iter().any(|z| z == zone.id) {
            self.stats.zones_visited.push(zone.id.to_string());
        }
        self.settle(None, notes);
        true
    }

    pub fn add_tokens(&mut self, amount: u64, notes: &mut NotificationQueue) -> bool {
        if amount == 0 {
            return false;
        }
        self.credit(amount);
        self.settle(None, notes);
        true
    }

    /// Force-complete a quest and pay its reward (no-op if unknown or done)
    pub fn complete_quest(&mut self, quest_id: &str, notes: &mut NotificationQueue) -> bool {
        let Some(index) = self.quests.iter().position(|q| q.id == quest_id && !q.completed) else {
            return false;
        };
        self.quests[index].completed = true;
        self.on_quest_completed(index, notes);
        self.settle(None, notes);
        true
    }

    /// Pick up a coin (no-op if unknown or already collected)
    pub fn collect_coin(&mut self, coin_id: &str, notes: &mut NotificationQueue) -> bool {
        let Some(coin) = self.coins.iter_mut().find(|c| c.id == coin_id && !c.collected) else {
            return false;
        };
        coin.collected = true;
        let value = coin.value;
        self.stats.total_coins_collected += 1;
        self.credit(value);
        notes.push(NotificationKind::Reward, "Coin Collected!", Some(value));
        self.settle(None, notes);
        true
    }

    /// Talk to an NPC. Returns its dialogue, `None` for an unknown NPC.
    pub fn interact_with_npc(
        &mut self,
        npc_id: &str,
        notes: &mut NotificationQueue,
    ) -> Option<&'static [&'static str]> {
        let npc = npc(npc_id)?;
        log::debug!("Talking to {}", npc.name);
        self.settle(Some(npc.id), notes);
        Some(npc.dialogue)
    }

    /// Register today's visit. No-op if already registered today.
    pub fn check_daily_login(&mut self, today: i64) -> bool {
        let login = &mut self.daily_login;
        let streak = match login.last_login_day {
            Some(day) if day == today => return false,
            Some(day) if day + 1 == today => login.streak + 1,
            _ => 1,
        };
        *login = DailyLogin {
            last_login_day: Some(today),
            streak,
            claimed: false,
        };
        true
    }

    /// Pay the daily bonus once per registered day
    pub fn claim_daily_bonus(&mut self, notes: &mut NotificationQueue) -> bool {
        if self.daily_login.claimed {
            return false;
        }
        let bonus = self.daily_login.bonus();
        self.daily_login.claimed = true;
        self.credit(bonus);
        notes.push(NotificationKind::Reward, "Daily Bonus Claimed!", Some(bonus));
        self.settle(None, notes);
        true
    }

    pub fn add_experience(&mut self, amount: u64, notes: &mut NotificationQueue) -> bool {
        if amount == 0 {
            return false;
        }
        self.gain_experience(amount, notes);
        self.settle(None, notes);
        true
    }

    /// Unlock an achievement and pay its reward (no-op if unknown or unlocked)
    pub fn unlock_achievement(&mut self, achievement_id: &str, notes: &mut NotificationQueue) -> bool {
        if !self.unlock(achievement_id, notes) {
            return false;
        }
        self.settle(None, notes);
        true
    }

    pub fn add_play_time(&mut self, seconds: f64) -> bool {
        if seconds <= 0.0 {
            return false;
        }
        self.stats.play_time += seconds;
        true
    }

    /// Brand new session with a fresh coin layout (keeps the dark mode preference)
    pub fn reset(&mut self, coin_seed: u64) {
        let dark_mode = self.dark_mode;
        *self = Self::new(coin_seed);
        self.dark_mode = dark_mode;
    }

    fn credit(&mut self, amount: u64) {
        self.iam_tokens += amount;
        self.stats.total_tokens_earned += amount;
    }

    fn gain_experience(&mut self, amount: u64, notes: &mut NotificationQueue) {
        let stats = &mut self.stats;
        stats.experience += amount;
        while stats.experience >= stats.experience_to_next_level {
            stats.experience -= stats.experience_to_next_level;
            stats.level += 1;
            stats.experience_to_next_level = stats.experience_to_next_level * 3 / 2;
            log::info!("Reached level {}", stats.level);
            notes.push(
                NotificationKind::LevelUp,
                format!("Level Up! You are now level {}!", stats.level),
                None,
            );
        }
    }

    fn unlock(&mut self, achievement_id: &str, notes: &mut NotificationQueue) -> bool {
        let Some(achievement) = self
            .achievements
            .iter_mut()
            .find(|a| a.id == achievement_id && !a.unlocked)
        else {
            return false;
        };
        achievement.unlocked = true;
        achievement.unlocked_at = Some(crate::platform::now_ms());
        let reward = achievement.reward;
        notes.push(
            NotificationKind::Achievement,
            format!("Achievement Unlocked: {}!", achievement.title),
            Some(reward),
        );
        self.credit(reward);
        true
    }

    fn on_quest_completed(&mut self, index: usize, notes: &mut NotificationQueue) {
        let quest = &self.quests[index];
        let (reward, title, id) = (quest.reward, quest.title.clone(), quest.id.clone());
        log::info!("Quest completed: {}", title);
        notes.push(NotificationKind::Quest, format!("Quest Completed: {title}!"), Some(reward));
        self.credit(reward);
        self.stats.total_quests_completed = self.completed_quests();
        if self.active_quest_id.as_deref() == Some(id.as_str()) {
            self.active_quest_id = self.quests.iter().find(|q| !q.completed).map(|q| q.id.clone());
        }
        self.gain_experience(QUEST_XP, notes);
    }

    fn objective_met(&self, quest: &Quest, kind: &ObjectiveKind, talked_to: Option<&str>) -> bool {
        match kind {
            ObjectiveKind::Talk { npc } => talked_to == Some(npc.as_str()),
            ObjectiveKind::Enter { zone } => &self.current_zone_id == zone,
            ObjectiveKind::CollectInZone { count } => self.collected_in_zone(&quest.zone_id) >= *count,
            ObjectiveKind::CollectTotal { count } => self.collected_total() >= *count,
            ObjectiveKind::ReachLevel { level } => self.stats.level >= *level,
            ObjectiveKind::CompleteQuests { count } => self.completed_quests() >= *count,
        }
    }

    /// Complete every objective, quest and achievement the state now satisfies
    fn settle(&mut self, talked_to: Option<&str>, notes: &mut NotificationQueue) {
        loop {
            let mut progressed = false;
            for index in 0..self.quests.len() {
                let quest = &self.quests[index];
                if quest.completed {
                    continue;
                }
                let met: Vec<usize> = quest
                    .objectives
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| !o.completed && self.objective_met(quest, &o.kind, talked_to))
                    .map(|(i, _)| i)
                    .collect();
                let quest = &mut self.quests[index];
                for i in met {
                    quest.objectives[i].completed = true;
                    progressed = true;
                }
                if quest.objectives.iter().all(|o| o.completed) {
                    quest.completed = true;
                    self.on_quest_completed(index, notes);
                    progressed = true;
                }
            }
            for id in self.earned_achievements() {
                progressed |= self.unlock(id, notes);
            }
            if !progressed {
                break;
            }
        }
    }

    fn earned_achievements(&self) -> Vec<&'static str> {
        let coins = self.collected_total();
        let quests = self.completed_quests();
        [
            ("first-coin", coins >= 1),
            ("coin-collector-10", coins >= 10),
            ("coin-master-30", coins >= 30),
            ("coin-legend-60", coins == self.coins.len()),
            ("first-quest", quests >= 1),
            ("quest-master", quests == self.quests.len()),
            ("zone-explorer", self.stats.zones_visited.len() >= ZONES.len()),
            ("level-5", self.stats.level >= 5),
            ("level-10", self.stats.level >= 10),
            ("token-rich", self.stats.total_tokens_earned >= 1000),
        ]
        .into_iter()
        .filter(|(id, earned)| *earned && self.achievements.iter().any(|a| a.id == *id && !a.unlocked))
        .map(|(id, _)| id)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect_in_zone(state: &mut QuestState, zone: &str, n: usize, notes: &mut NotificationQueue) {
        let ids: Vec<String> = state
            .coins
            .iter()
            .filter(|c| c.zone_id == zone && !c.collected)
            .take(n)
            .map(|c| c.id.clone())
            .collect();
        for id in ids {
            assert!(state.collect_coin(&id, notes));
        }
    }

    #[test]
    fn test_initial_state() {
        let state = QuestState::default();
        assert_eq!(state.player.position, Vec2::new(100.0, 100.0));
        assert_eq!(state.current_zone_id, "sacred-grove");
        assert_eq!(state.active_quest().map(|q| q.title.as_str()), Some("Welcome to IAM QUEST"));
        assert_eq!(state.coins.len(), 60);
        assert_eq!(state.iam_tokens, 0);
    }

    #[test]
    fn test_move_player_clamps_to_map() {
        let mut state = QuestState::default();
        state.set_player_position(Vec2::new(2.0, 598.0));
        assert!(state.move_player(Direction::Left));
        assert!(state.move_player(Direction::Down));
        assert_eq!(state.player.position, Vec2::new(0.0, 600.0));
        assert!(!state.move_player(Direction::Left));
        assert!(state.move_player(Direction::Up));
        assert_eq!(state.player.position, Vec2::new(0.0, 595.0));
    }

    #[test]
    fn test_tap_and_drag_movement() {
        let mut state = QuestState::default();
        assert!(state.nudge_player(Direction::Right));
        assert_eq!(state.player.position, Vec2::new(115.0, 100.0));
        assert!(state.drag_player(Vec2::new(-40.0, 20.0)));
        assert_eq!(state.player.position, Vec2::new(95.0, 110.0));
        assert!(state.drag_player(Vec2::new(-1000.0, 0.0)));
        assert_eq!(state.player.position.x, 0.0);
        assert!(!state.drag_player(Vec2::ZERO));
    }

    #[test]
    fn test_npc_reach_needs_zone_and_distance() {
        let mut state = QuestState::default();
        assert!(!state.can_reach_npc("npc-guide"));
        state.set_player_position(Vec2::new(300.0, 250.0));
        assert!(state.can_reach_npc("npc-guide"));
        // The merchant lives in the caves
        state.set_player_position(Vec2::new(500.0, 300.0));
        assert!(!state.can_reach_npc("npc-merchant"));
        assert!(!state.can_reach_npc("npc-ghost"));
    }

    #[test]
    fn test_first_quest_completes_on_talk_and_coins() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();

        let dialogue = state.interact_with_npc("npc-guide", &mut notes);
        assert_eq!(dialogue.map(|d| d[0]), Some("Welcome, divine hero!"));
        assert!(state.quests[0].objectives[0].completed);
        assert!(!state.quests[0].completed);

        collect_in_zone(&mut state, "sacred-grove", 5, &mut notes);
        assert!(state.quests[0].completed);
        assert_eq!(state.active_quest_id.as_deref(), Some("quest-2"));
        assert_eq!(state.stats.total_quests_completed, 1);
        assert!(state.achievements.iter().any(|a| a.id == "first-quest" && a.unlocked));
        assert!(notes.drain().iter().any(|n| n.kind == NotificationKind::Quest));
    }

    #[test]
    fn test_quest_reward_is_paid_once() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        assert!(state.complete_quest("quest-3", &mut notes));
        let tokens = state.iam_tokens;
        assert!(!state.complete_quest("quest-3", &mut notes));
        assert!(!state.complete_quest("quest-99", &mut notes));
        assert_eq!(state.iam_tokens, tokens);
        // quest reward + first-quest achievement
        assert_eq!(tokens, 200 + 50);
    }

    #[test]
    fn test_entering_zone_completes_enter_objective() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        assert!(!state.set_current_zone("nowhere", &mut notes));
        assert!(state.set_current_zone("crystal-caves", &mut notes));
        assert!(state.quests[2].objectives[0].completed);
        assert!(!state.quests[2].completed);
        // "Reach level 2" is not a zone objective
        assert!(!state.quests[1].objectives[1].completed);
        assert_eq!(state.player.current_zone, "crystal-caves");
    }

    #[test]
    fn test_zone_explorer() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        state.set_current_zone("crystal-caves", &mut notes);
        state.set_current_zone("divine-peak", &mut notes);
        assert!(state.achievements.iter().any(|a| a.id == "zone-explorer" && a.unlocked));
    }

    #[test]
    fn test_experience_threshold_grows() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        state.add_experience(120, &mut notes);
        assert_eq!(state.stats.level, 2);
        assert_eq!(state.stats.experience, 20);
        assert_eq!(state.stats.experience_to_next_level, 150);

        state.add_experience(500, &mut notes);
        // 520 -> L3 (370 left, next 225) -> L4 (145 left, next 337)
        assert_eq!(state.stats.level, 4);
        assert_eq!(state.stats.experience, 145);
        assert_eq!(state.stats.experience_to_next_level, 337);
        assert!(notes.drain().iter().any(|n| n.kind == NotificationKind::LevelUp));
    }

    #[test]
    fn test_daily_login_streak() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        assert!(state.check_daily_login(100));
        assert_eq!(state.daily_login.streak, 1);
        assert!(!state.check_daily_login(100));

        assert!(state.claim_daily_bonus(&mut notes));
        assert!(!state.claim_daily_bonus(&mut notes));
        assert_eq!(state.iam_tokens, 60);

        state.check_daily_login(101);
        assert_eq!(state.daily_login.streak, 2);
        assert!(!state.daily_login.claimed);
        state.claim_daily_bonus(&mut notes);
        assert_eq!(state.iam_tokens, 60 + 70);

        state.check_daily_login(105);
        assert_eq!(state.daily_login.streak, 1);
    }

    #[test]
    fn test_one_local_day_pays_one_bonus() {
        use crate::platform::day_number;
        // 10:00 and 20:00 on 2026-10-19 in UTC-8 straddle UTC midnight
        let morning = day_number(1_792_432_800_000.0, 480.0);
        let evening = day_number(1_792_468_800_000.0, 480.0);
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        assert!(state.check_daily_login(morning));
        assert!(state.claim_daily_bonus(&mut notes));
        assert!(!state.check_daily_login(evening));
        assert!(!state.claim_daily_bonus(&mut notes));
        assert_eq!(state.iam_tokens, 60);
        assert_eq!(state.daily_login.streak, 1);
    }

    #[test]
    fn test_unlock_achievement_pays_once() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        assert!(state.unlock_achievement("level-10", &mut notes));
        assert!(!state.unlock_achievement("level-10", &mut notes));
        assert!(!state.unlock_achievement("missing", &mut notes));
        assert_eq!(state.iam_tokens, 500);
    }

    #[test]
    fn test_proximity_helpers() {
        let mut state = QuestState::default();
        state.set_player_position(Vec2::new(300.0, 250.0));
        assert_eq!(state.nearby_npc().map(|n| n.id), Some("npc-guide"));
        state.set_player_position(Vec2::new(300.0, 281.0));
        assert!(state.nearby_npc().is_none());

        let target = state.coins[0].position;
        state.set_player_position(target + Vec2::new(10.0, 0.0));
        assert!(state.nearby_coins().any(|c| c.id == state.coins[0].id));
    }

    #[test]
    fn test_reset_keeps_dark_mode() {
        let mut state = QuestState::default();
        let mut notes = NotificationQueue::new();
        state.dark_mode = true;
        state.add_tokens(40, &mut notes);
        state.reset(9);
        assert_eq!(state.iam_tokens, 0);
        assert!(state.dark_mode);
        assert_eq!(state.coins, generate_coins(9));
    }

    #[derive(Debug, Clone)]
    enum Action {
        Collect(usize),
        Talk(usize),
        Zone(usize),
        Tokens(u64),
        Xp(u64),
        Login(i64),
        Claim,
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0usize..60).prop_map(Action::Collect),
            (0usize..5).prop_map(Action::Talk),
            (0usize..3).prop_map(Action::Zone),
            (0u64..200).prop_map(Action::Tokens),
            (0u64..300).prop_map(Action::Xp),
            (0i64..10).prop_map(Action::Login),
            Just(Action::Claim),
        ]
    }

    proptest! {
        #[test]
        fn prop_tokens_never_decrease(actions in prop::collection::vec(arb_action(), 1..80)) {
            let mut state = QuestState::default();
            let mut notes = NotificationQueue::new();
            let mut last = 0;
            for action in actions {
                match action {
                    Action::Collect(i) => {
                        let id = state.coins[i].id.clone();
                        state.collect_coin(&id, &mut notes);
                    }
                    Action::Talk(i) => {
                        state.interact_with_npc(NPCS[i].id, &mut notes);
                    }
                    Action::Zone(i) => {
                        state.set_current_zone(ZONES[i].id, &mut notes);
                    }
                    Action::Tokens(n) => {
                        state.add_tokens(n, &mut notes);
                    }
                    Action::Xp(n) => {
                        state.add_experience(n, &mut notes);
                    }
                    Action::Login(day) => {
                        state.check_daily_login(day);
                    }
                    Action::Claim => {
                        state.claim_daily_bonus(&mut notes);
                    }
                }
                prop_assert!(state.iam_tokens >= last);
                prop_assert!(state.stats.total_tokens_earned >= state.iam_tokens);
                last = state.iam_tokens;
            }
        }
    }
}
