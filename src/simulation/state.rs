//! Per-tick world snapshot and its canonical fingerprint

use serde::{Deserialize, Serialize};

use crate::core::types::Cell;
use crate::robot::action::Action;
use crate::robot::state::{Direction, RoboState};

/// Why a robot did not get what it asked for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FailKind {
    /// The intended action went through (or there was nothing to deny)
    #[default]
    DoNot,
    /// Move denied by a wall, a contested cell, a blocked chain or the spawn gate
    Fail,
    /// Move denied because two robots tried to swap cells
    FailFast,
}

/// Every robot slot at one tick, plus what each slot did on the way out
///
/// `actions` and `failed` describe the transition from this state to the
/// next one. They are empty until the timeline resolves that transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    pub robots: Vec<RoboState>,
    pub actions: Vec<Action>,
    pub failed: Vec<FailKind>,
}

impl StageState {
    pub fn new(robots: Vec<RoboState>) -> Self {
        Self {
            robots,
            actions: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// `count` robots all waiting at the entrance
    pub fn spawning(entrance: Cell, count: usize) -> Self {
        Self::new(vec![RoboState::spawning(entrance); count])
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    pub fn all_despawned(&self) -> bool {
        self.robots.iter().all(|r| r.is_despawned())
    }

    /// Does any slot sit on `cell`, whatever its direction?
    pub fn has_robot_at(&self, cell: Cell) -> bool {
        self.robots.iter().any(|r| r.position == cell)
    }

    /// Robots with a live heading on the grid
    pub fn active_robots(&self) -> impl Iterator<Item = &RoboState> {
        self.robots.iter().filter(|r| r.direction.is_live())
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.robots)
    }
}

/// Slot-agnostic encoding of a robot set, used for loop detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<(i32, i32, Direction)>);

impl Fingerprint {
    /// Robots sorted by (y, x, direction)
    pub fn of(robots: &[RoboState]) -> Self {
        let mut entries: Vec<_> = robots
            .iter()
            .map(|r| (r.position.y, r.position.x, r.direction))
            .collect();
        entries.sort();
        Self(entries)
    }
}
