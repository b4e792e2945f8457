//! Timeline: the eagerly computed history of one run
//!
//! A timeline is built once from a stage, a deck and a starting state, and is
//! read-only afterwards. Building stops early when every robot has despawned
//! or when the world repeats an earlier configuration (ignoring which slot is
//! which). A repeat only counts as a loop if the world is still doing
//! something; a world where every robot just waits is treated as settled.

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::types::{Cell, Tick};
use crate::deck::Deck;
use crate::robot::action::Action;
use crate::simulation::resolver::resolve;
use crate::simulation::state::{Fingerprint, StageState};
use crate::stage::Stage;

/// How a timeline ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every robot despawned
    Completed,
    /// The last state repeats the state at `start`
    Loop { start: Tick },
    /// Nothing moves any more, but robots remain
    Settled,
    /// The tick cap was reached while robots were still busy
    Capped,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    states: Vec<StageState>,
    max_time: Tick,
    loop_time: Option<Tick>,
}

impl Timeline {
    /// Precompute up to `config.max_ticks` ticks starting from `initial`
    ///
    /// `config.robot_count` is not consulted; the slot count is whatever
    /// `initial` holds.
    pub fn build(
        stage: &Stage,
        deck: &Deck,
        initial: StageState,
        config: &SimulationConfig,
    ) -> Self {
        let max_ticks = config.max_ticks;
        let mut states = Vec::with_capacity(max_ticks.min(1024) + 1);
        let mut seen: AHashMap<Fingerprint, Tick> = AHashMap::new();
        let mut loop_time = None;

        seen.insert(initial.fingerprint(), 0);
        let mut current = initial;

        for t in 1..=max_ticks {
            let next = advance(stage, deck, &mut current, config);
            states.push(current);
            current = next;
            tracing::trace!(tick = t, "resolved tick");

            if current.all_despawned() {
                tracing::debug!(tick = t, "all robots despawned");
                break;
            }

            let fingerprint = current.fingerprint();
            if let Some(&earlier) = seen.get(&fingerprint) {
                tracing::debug!(tick = t, earlier, "state repeats");
                loop_time = Some(earlier);
                break;
            }
            seen.insert(fingerprint, t);
        }

        // One more tick tells a real cycle apart from a world at rest
        advance(stage, deck, &mut current, config);
        if current
            .actions
            .iter()
            .all(|a| matches!(a, Action::Wait | Action::Spawn))
        {
            loop_time = None;
        }
        states.push(current);

        let max_time = states.len() - 1;
        tracing::info!(max_time, loop_time = ?loop_time, "timeline built");

        Self {
            states,
            max_time,
            loop_time,
        }
    }

    /// Last computed tick
    pub fn max_time(&self) -> Tick {
        self.max_time
    }

    /// Earlier tick equivalent to `max_time`, if the run cycles
    pub fn loop_time(&self) -> Option<Tick> {
        self.loop_time
    }

    pub fn states(&self) -> &[StageState] {
        &self.states
    }

    pub fn outcome(&self) -> Outcome {
        let last = self.state(self.max_time);
        if last.all_despawned() {
            Outcome::Completed
        } else if let Some(start) = self.loop_time {
            Outcome::Loop { start }
        } else if last
            .actions
            .iter()
            .all(|a| matches!(a, Action::Wait | Action::Spawn))
        {
            Outcome::Settled
        } else {
            Outcome::Capped
        }
    }

    /// State at a whole tick, clamped to `[0, max_time]`
    pub fn state(&self, tick: Tick) -> &StageState {
        &self.states[tick.min(self.max_time)]
    }

    /// State at a continuous time, clamped to `[0, max_time]` then floored
    pub fn state_at(&self, time: f64) -> &StageState {
        let t = time.clamp(0.0, self.max_time as f64);
        self.state(t.floor() as Tick)
    }

    /// Progress through the current tick, in `[0, 1)`; used for animation
    pub fn fractional_progress(&self, time: f64) -> f64 {
        let t = time.clamp(0.0, self.max_time as f64);
        t - t.floor()
    }

    /// Does any slot sit on `cell` at `tick` (clamped)?
    pub fn has_robot_at(&self, tick: Tick, cell: Cell) -> bool {
        self.state(tick).has_robot_at(cell)
    }
}

/// Resolve the tick leaving `state`, record its actions on it, and return
/// the following state
fn advance(
    stage: &Stage,
    deck: &Deck,
    state: &mut StageState,
    config: &SimulationConfig,
) -> StageState {
    let resolution = resolve(stage, deck, &state.robots, config);
    state.actions = resolution.actions;
    state.failed = resolution.failed;
    StageState::new(resolution.next)
}
