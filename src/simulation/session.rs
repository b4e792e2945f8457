//! Editing session: a stage and deck with an always-current timeline

use ahash::AHashSet;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::deck::{Card, Deck};
use crate::simulation::matcher::{choose_card, occupied_cells};
use crate::simulation::state::StageState;
use crate::simulation::timeline::Timeline;
use crate::stage::Stage;

/// Owns the inputs of a run and rebuilds the timeline whenever they change
pub struct Session {
    stage: Stage,
    deck: Deck,
    config: SimulationConfig,
    timeline: Timeline,
}

impl Session {
    pub fn new(stage: Stage, deck: Deck, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let timeline = build_timeline(&stage, &deck, &config);
        Ok(Self {
            stage,
            deck,
            config,
            timeline,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Apply an edit to the deck, then rebuild
    pub fn edit_deck<F: FnOnce(&mut Deck)>(&mut self, edit: F) {
        edit(&mut self.deck);
        tracing::debug!(cards = self.deck.len(), "deck edited");
        self.rebuild();
    }

    /// Apply an edit to one card, then rebuild
    ///
    /// Returns false, leaving the timeline alone, if `index` is out of range.
    pub fn edit_card<F: FnOnce(&mut Card)>(&mut self, index: usize, edit: F) -> bool {
        let Some(card) = self.deck.get_mut(index) else {
            return false;
        };
        edit(card);
        tracing::debug!(index, "card edited");
        self.rebuild();
        true
    }

    /// Apply an edit to the stage, then rebuild
    ///
    /// The edit may fail (say, moving the exit onto the border); the timeline
    /// is rebuilt either way since the stage may have changed before failing.
    pub fn edit_stage<F: FnOnce(&mut Stage) -> Result<()>>(&mut self, edit: F) -> Result<()> {
        let result = edit(&mut self.stage);
        tracing::debug!(ok = result.is_ok(), "stage edited");
        self.rebuild();
        result
    }

    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.rebuild();
        Ok(())
    }

    pub fn rebuild(&mut self) {
        self.timeline = build_timeline(&self.stage, &self.deck, &self.config);
        tracing::debug!(
            max_time = self.timeline.max_time(),
            "timeline rebuilt"
        );
    }

    /// Card the robot in `slot` plays at `tick`
    ///
    /// `None` for spawning or despawned robots, for a robot the exit is about
    /// to terminate, and when no card matches.
    pub fn matched_card(&self, tick: Tick, slot: usize) -> Option<usize> {
        let state = self.timeline.state(tick);
        let robot = state.robots.get(slot)?;
        if self.config.touch_exit && robot.position == self.stage.exit() {
            return None;
        }
        let occupied: AHashSet<Cell> = occupied_cells(&state.robots);
        choose_card(&self.stage, &occupied, &self.deck, robot)
    }

    /// First tick at or after `from` where any slot sits on `cell`
    pub fn first_break(&self, cell: Cell, from: Tick) -> Option<Tick> {
        (from..=self.timeline.max_time()).find(|&t| self.timeline.has_robot_at(t, cell))
    }
}

fn build_timeline(stage: &Stage, deck: &Deck, config: &SimulationConfig) -> Timeline {
    let initial = StageState::spawning(stage.entrance(), config.robot_count);
    Timeline::build(stage, deck, initial, config)
}
