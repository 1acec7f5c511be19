//! State stores
//!
//! A `Store` owns the state of one game session. Every mutation is applied
//! to a copy and swapped in as a whole, so subscribers only ever observe
//! complete states. Invalid requests are silent no-ops.
//!
//! The platformer operations live here; the quest game adds its own in
//! `quest::store`.

use std::sync::Arc;

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::PLATFORMER_STORAGE_KEY;
use crate::notify::{Notification, NotificationKind, NotificationQueue};
use crate::persistence::{Storage, load_or_discard, save_json};
use crate::sim::{GameState, Level, PlatformerState};

/// Session state that persists a projection of itself
pub trait Persisted: Clone {
    type Snapshot: Serialize + DeserializeOwned + PartialEq;

    /// Storage key of the snapshot
    const STORAGE_KEY: &'static str;

    fn snapshot(&self) -> Self::Snapshot;

    /// Whether `self` and `other` persist to the same snapshot
    fn same_snapshot(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }

    /// Rebuild a session from a snapshot; `None` if it is unusable
    fn restore(snapshot: Self::Snapshot) -> Option<Self>;
}

/// Persisted projection of the platformer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformerSnapshot {
    pub game_state: GameState,
    pub current_level_index: usize,
    pub levels: Vec<Level>,
    pub dark_mode: bool,
}

impl Persisted for PlatformerState {
    type Snapshot = PlatformerSnapshot;
    const STORAGE_KEY: &'static str = PLATFORMER_STORAGE_KEY;

    fn snapshot(&self) -> PlatformerSnapshot {
        PlatformerSnapshot {
            game_state: self.game_state.clone(),
            current_level_index: self.current_level_index,
            levels: self.levels.to_vec(),
            dark_mode: self.dark_mode,
        }
    }

    fn same_snapshot(&self, other: &Self) -> bool {
        self.current_level_index == other.current_level_index
            && self.dark_mode == other.dark_mode
            && self.game_state == other.game_state
            && (Arc::ptr_eq(&self.levels, &other.levels) || self.levels == other.levels)
    }

    fn restore(snapshot: PlatformerSnapshot) -> Option<Self> {
        if snapshot.levels.is_empty() {
            return None;
        }
        let mut state = PlatformerState::with_levels(snapshot.levels);
        if !state.levels[0].unlocked {
            Arc::make_mut(&mut state.levels)[0].unlocked = true;
        }
        state.game_state = snapshot.game_state;
        state.current_level_index = snapshot.current_level_index;
        state.dark_mode = snapshot.dark_mode;
        state.resync_current_level();
        log::info!(
            "Resuming at level {} with {} IAM",
            state.current_level_index + 1,
            state.game_state.total_iam
        );
        Some(state)
    }
}

/// Change listener
pub type Listener<S> = Box<dyn FnMut(&S)>;

/// Injectable state container
pub struct Store<S: Persisted> {
    state: S,
    version: u64,
    listeners: Vec<Listener<S>>,
    notifications: NotificationQueue,
    storage: Option<Box<dyn Storage>>,
    /// Last save failed; retry on the next applied change
    save_pending: bool,
}

/// Platformer session store
pub type PlatformerStore = Store<PlatformerState>;

impl<S: Persisted + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Persisted + Default> Store<S> {
    /// Store over a fresh session, not persisted
    pub fn new() -> Self {
        Self::from_state(S::default())
    }

    /// Store backed by `storage`, resuming from its snapshot when one decodes
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self::with_storage_or_else(storage, S::default)
    }
}

impl<S: Persisted> Store<S> {
    pub fn from_state(state: S) -> Self {
        Self {
            state,
            version: 0,
            listeners: Vec::new(),
            notifications: NotificationQueue::new(),
            storage: None,
            save_pending: false,
        }
    }

    /// Like `with_storage`, with `fresh` building the session when nothing usable is stored
    pub fn with_storage_or_else(storage: Box<dyn Storage>, fresh: impl FnOnce() -> S) -> Self {
        let state = load_or_discard::<S::Snapshot>(&*storage, S::STORAGE_KEY)
            .and_then(S::restore)
            .unwrap_or_else(fresh);
        let mut store = Self::from_state(state);
        store.storage = Some(storage);
        store
    }

    /// Current state snapshot
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Increments on every applied change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a listener called after each applied change
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Call `on_change` only when the value picked by `select` changes
    pub fn watch<T, F, G>(&mut self, select: F, mut on_change: G)
    where
        T: PartialEq + 'static,
        F: Fn(&S) -> T + 'static,
        G: FnMut(&T) + 'static,
    {
        let mut last = select(&self.state);
        self.subscribe(move |state| {
            let value = select(state);
            if value != last {
                on_change(&value);
                last = value;
            }
        });
    }

    /// Take pending notifications for display
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Apply `f` to a copy of the state and swap it in if `f` reports a change.
    ///
    /// This is the only write path; listeners and persistence run once per
    /// applied transaction. Notifications pushed by a rejected `f` are kept.
    pub fn transact<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut S, &mut NotificationQueue) -> bool,
    {
        let mut next = self.state.clone();
        if !f(&mut next, &mut self.notifications) {
            return false;
        }
        let dirty = self.save_pending || !next.same_snapshot(&self.state);
        self.state = next;
        self.version += 1;
        if dirty {
            self.persist();
        }
        for listener in &mut self.listeners {
            listener(&self.state);
        }
        true
    }

    fn persist(&mut self) {
        let Some(storage) = self.storage.as_deref() else {
            return;
        };
        let result = save_json(storage, S::STORAGE_KEY, &self.state.snapshot());
        self.save_pending = result.is_err();
        if let Err(e) = result {
            log::warn!("Failed to save '{}': {}", S::STORAGE_KEY, e);
        }
    }
}

impl Store<PlatformerState> {
    pub fn set_player_position(&mut self, position: Vec2) {
        self.transact(|s, _| {
            s.player.position = position;
            true
        });
    }

    pub fn set_player_velocity(&mut self, velocity: Vec2) {
        self.transact(|s, _| {
            s.player.velocity = velocity;
            true
        });
    }

    pub fn set_player_on_ground(&mut self, on_ground: bool) {
        self.transact(|s, _| {
            s.player.on_ground = on_ground;
            true
        });
    }

    pub fn set_player_facing(&mut self, facing_right: bool) {
        self.transact(|s, _| {
            s.player.facing_right = facing_right;
            true
        });
    }

    /// Collect a coin of the active level (no-op if unknown or already collected)
    pub fn collect_coin(&mut self, coin_id: &str) {
        self.transact(|s, notes| collect_with_notice(s, notes, coin_id));
    }

    /// Enter a level (no-op if out of range or locked)
    pub fn set_current_level(&mut self, index: usize) {
        self.transact(|s, _| {
            let entered = s.select_level(index);
            if entered {
                log::info!("Entered level {} '{}'", index + 1, s.current_level().name);
            }
            entered
        });
    }

    pub fn unlock_next_level(&mut self) {
        self.transact(|s, _| s.unlock_next_level());
    }

    pub fn reset_level(&mut self) {
        self.transact(|s, _| {
            s.reset_level();
            true
        });
    }

    pub fn toggle_dark_mode(&mut self) {
        self.transact(|s, _| {
            s.dark_mode = !s.dark_mode;
            true
        });
    }

    pub fn show_win(&mut self) {
        self.transact(|s, _| {
            s.show_win_screen = true;
            true
        });
    }

    pub fn hide_win(&mut self) {
        self.transact(|s, _| {
            s.show_win_screen = false;
            true
        });
    }

    /// Start a brand new campaign (the only way IAM goes down)
    pub fn reset_game(&mut self) {
        self.transact(|s, _| {
            s.reset_game();
            log::info!("Platformer progress reset");
            true
        });
    }
}

/// Coin collection shared by the direct mutation and the per-frame commit
pub(crate) fn collect_with_notice(
    state: &mut PlatformerState,
    notes: &mut NotificationQueue,
    coin_id: &str,
) -> bool {
    match state.collect_coin(coin_id) {
        Some(value) => {
            log::debug!("Collected {} (+{} IAM)", coin_id, value);
            notes.push(NotificationKind::Reward, "Coin Collected!", Some(u64::from(value)));
            true
        }
        None => false,
    }
}
