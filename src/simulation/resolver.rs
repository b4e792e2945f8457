//! Conflict resolution: turn every robot's intent into one consistent next tick
//!
//! All robots act at once. A robot only ever ends up in a new cell if nothing
//! else could claim that cell: walls, stationary robots, swaps and contested
//! targets all deny the move, and denials propagate backwards along chains of
//! robots queued behind each other.
//!
//! Robots still waiting to spawn sit outside this process. At most one of
//! them is admitted per tick, and only once the entrance has been vacated.

use ahash::{AHashMap, AHashSet};

use crate::core::config::SimulationConfig;
use crate::core::types::Cell;
use crate::deck::Deck;
use crate::robot::action::{apply, Action};
use crate::robot::state::RoboState;
use crate::simulation::matcher::{choose_action, occupied_cells};
use crate::simulation::state::FailKind;
use crate::stage::Stage;

/// Outcome of one tick, one entry per robot slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub next: Vec<RoboState>,
    pub actions: Vec<Action>,
    pub failed: Vec<FailKind>,
    /// Fixed-point passes run; never more than the number of slots
    pub passes: usize,
}

/// Working state for a single tick
struct Pending<'a> {
    current: &'a [RoboState],
    targets: Vec<RoboState>,
    next: Vec<RoboState>,
    failed: Vec<FailKind>,
    resolved: Vec<bool>,
    blocked: AHashSet<Cell>,
}

impl Pending<'_> {
    /// Accept the target state without moving into a new cell
    fn settle(&mut self, i: usize) {
        self.next[i] = self.targets[i];
        self.resolved[i] = true;
    }

    /// Deny the move: the robot stays where it is and its cell is blocked
    fn deny(&mut self, i: usize, kind: FailKind) {
        self.next[i] = self.current[i];
        self.failed[i] = kind;
        self.resolved[i] = true;
        self.blocked.insert(self.current[i].position);
    }

    fn target(&self, i: usize) -> Cell {
        self.targets[i].position
    }
}

/// Resolve one tick for every robot slot
pub fn resolve(
    stage: &Stage,
    deck: &Deck,
    current: &[RoboState],
    config: &SimulationConfig,
) -> Resolution {
    let n = current.len();

    // Intent
    let occupied = occupied_cells(current);
    let actions: Vec<Action> = current
        .iter()
        .map(|robot| choose_action(stage, &occupied, deck, robot, config))
        .collect();
    let targets = current
        .iter()
        .zip(&actions)
        .map(|(robot, action)| apply(*robot, *action))
        .collect();

    let mut tick = Pending {
        current,
        targets,
        next: current.to_vec(),
        failed: vec![FailKind::DoNot; n],
        resolved: vec![false; n],
        blocked: AHashSet::new(),
    };

    // Spawn gate: slots from the first spawning robot on wait their turn, and
    // nobody may step onto the entrance while they do.
    let first_spawn = current.iter().position(|r| r.is_spawning()).unwrap_or(n);
    if first_spawn < n {
        tick.blocked.insert(current[first_spawn].position);
    }

    classify(stage, &mut tick, first_spawn);
    let passes = propagate(&mut tick, first_spawn);

    // Whatever survived propagation moves
    for i in 0..first_spawn {
        if !tick.resolved[i] {
            tick.settle(i);
        }
    }

    if first_spawn < n {
        admit_spawn(&mut tick, first_spawn);
    }

    Resolution {
        next: tick.next,
        actions,
        failed: tick.failed,
        passes,
    }
}

/// Settle everything decidable without looking at other movers
fn classify(stage: &Stage, tick: &mut Pending<'_>, first_spawn: usize) {
    // Current cell -> slot, for movers not yet classified
    let mut movers: AHashMap<Cell, usize> = AHashMap::new();

    for i in 0..first_spawn {
        let here = tick.current[i].position;
        let target = tick.target(i);

        if tick.targets[i].is_despawned() {
            tick.settle(i);
            continue;
        }

        if target == here {
            tick.settle(i);
            tick.blocked.insert(here);
            continue;
        }

        if stage.is_wall(target) {
            tick.deny(i, FailKind::Fail);
            continue;
        }

        if let Some(&j) = movers.get(&target) {
            if tick.target(j) == here {
                tick.deny(i, FailKind::FailFast);
                tick.deny(j, FailKind::FailFast);
                movers.remove(&target);
                continue;
            }
        }

        movers.insert(here, i);
    }
}

/// Deny moves into blocked or contested cells until nothing changes
///
/// Every contender for a contested cell is denied, including the first one to
/// ask for it. Returns the number of passes run.
fn propagate(tick: &mut Pending<'_>, first_spawn: usize) -> usize {
    let mut passes = 0;

    while (0..first_spawn).any(|i| !tick.resolved[i]) {
        passes += 1;
        let mut changed = false;
        let mut requested: AHashMap<Cell, usize> = AHashMap::new();

        for i in 0..first_spawn {
            if tick.resolved[i] {
                continue;
            }
            let target = tick.target(i);

            if tick.blocked.contains(&target) {
                tick.deny(i, FailKind::Fail);
                changed = true;
            } else if let Some(&first) = requested.get(&target) {
                tick.blocked.insert(target);
                tick.deny(i, FailKind::Fail);
                if !tick.resolved[first] {
                    tick.deny(first, FailKind::Fail);
                }
                changed = true;
            } else {
                requested.insert(target, i);
            }
        }

        if !changed {
            break;
        }
    }

    passes
}

/// Let the first waiting robot in if the entrance was vacated this tick
fn admit_spawn(tick: &mut Pending<'_>, first_spawn: usize) {
    let n = tick.current.len();
    let entrance = tick.current[first_spawn].position;

    let vacated = first_spawn == 0
        || tick.next[first_spawn - 1].position != entrance
        || tick.targets[first_spawn - 1].is_despawned();

    let mut waiting_from = first_spawn;
    if vacated {
        tick.settle(first_spawn);
        waiting_from += 1;
    }

    for i in waiting_from..n {
        tick.next[i] = tick.current[i];
        tick.failed[i] = FailKind::Fail;
        tick.resolved[i] = true;
    }
}
