//! Per-frame game loop driver
//!
//! Once per display frame the host samples input and calls
//! [`GameLoop::frame`]. The driver reads the current store state, runs the
//! pure [`step`], and commits the player plus every produced effect in a
//! single store transaction.
//!
//! Cancellation is cooperative: [`GameLoop::start`] hands out a
//! [`LoopHandle`], and a frame presented with a cancelled or superseded
//! handle does nothing. A scheduled callback that fires after teardown is
//! therefore harmless, and two live loops can never double-apply physics.

use crate::notify::{NotificationKind, NotificationQueue};
use crate::sim::{Effect, LevelPhase, PlatformerState, StepOutcome, TickInput, World, step};
use crate::store::{PlatformerStore, collect_with_notice};
use crate::tuning::Tuning;

/// Token identifying one run of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopHandle {
    generation: u64,
}

/// The loop driver. One per mounted game session.
#[derive(Debug, Clone)]
pub struct GameLoop {
    tuning: Tuning,
    generation: u64,
    running: bool,
    frames: u64,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameLoop {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            generation: 0,
            running: false,
            frames: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Frames committed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start (or restart) the loop. Handles from earlier runs go stale.
    pub fn start(&mut self) -> LoopHandle {
        self.generation += 1;
        self.running = true;
        log::info!("Game loop started (run {})", self.generation);
        LoopHandle {
            generation: self.generation,
        }
    }

    /// Stop the loop; every outstanding handle goes stale
    pub fn cancel(&mut self) {
        if self.running {
            log::info!("Game loop cancelled after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Whether a frame presented with `handle` would run
    pub fn is_live(&self, handle: LoopHandle) -> bool {
        self.running && handle.generation == self.generation
    }

    /// Run one frame. Returns the effects that were actually committed.
    pub fn frame(
        &mut self,
        handle: LoopHandle,
        store: &mut PlatformerStore,
        input: TickInput,
        now_ms: f64,
    ) -> Vec<Effect> {
        if !self.is_live(handle) {
            return Vec::new();
        }

        if let LevelPhase::AdvancePending { target, deadline_ms } = store.state().phase {
            if now_ms >= deadline_ms {
                store.set_current_level(target);
            }
        }

        if store.state().phase == LevelPhase::Won {
            return Vec::new();
        }

        let outcome = step(&store.state().player, &World::of(store.state()), &input, &self.tuning);

        let delay = self.tuning.advance_delay_ms;
        let mut committed = Vec::new();
        store.transact(|state, notes| {
            committed = commit(state, notes, outcome, now_ms, delay);
            true
        });
        self.frames += 1;
        committed
    }
}

/// Apply a step outcome in order: coins, reset, unlock + pending switch, win.
///
/// A reset discards the stepped position and suppresses level completion for
/// this frame; coin credit from the same frame is kept.
fn commit(
    state: &mut PlatformerState,
    notes: &mut NotificationQueue,
    outcome: StepOutcome,
    now_ms: f64,
    advance_delay_ms: f64,
) -> Vec<Effect> {
    let mut committed = Vec::new();
    let reset = outcome.hit_hazard();
    state.player = outcome.player;

    for effect in &outcome.effects {
        if let Effect::CoinCollected { coin_id, .. } = effect {
            if collect_with_notice(state, notes, coin_id) {
                committed.push(effect.clone());
            }
        }
    }

    if reset {
        log::info!("Hazard hit, resetting level {}", state.current_level_index + 1);
        state.reset_level();
        committed.push(Effect::ResetLevel);
        return committed;
    }

    for effect in outcome.effects {
        match effect {
            Effect::AdvanceLevel { next } if state.phase == LevelPhase::Playing => {
                state.unlock_next_level();
                state.phase = LevelPhase::AdvancePending {
                    target: next,
                    deadline_ms: now_ms + advance_delay_ms,
                };
                log::info!("Level {} complete, next level in {} ms", next, advance_delay_ms);
                notes.push(NotificationKind::Success, "Level Complete!", None);
                committed.push(Effect::AdvanceLevel { next });
            }
            Effect::Win if state.phase != LevelPhase::Won => {
                state.phase = LevelPhase::Won;
                state.show_win_screen = true;
                log::info!("Campaign won with {} IAM", state.game_state.total_iam);
                notes.push(
                    NotificationKind::Achievement,
                    "Balance Restored!",
                    Some(state.game_state.total_iam),
                );
                committed.push(Effect::Win);
            }
            _ => {}
        }
    }

    committed
}
