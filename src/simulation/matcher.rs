//! Rule matching: what a robot senses and which card it plays
//!
//! Everything here is a pure function of its inputs.

use ahash::AHashSet;

use crate::core::config::SimulationConfig;
use crate::core::types::Cell;
use crate::deck::card::Sensed;
use crate::deck::Deck;
use crate::robot::action::Action;
use crate::robot::state::{Direction, Heading, RoboState};
use crate::stage::Stage;

/// Sensor offsets for an upward-facing robot, in card order:
/// front-left, front, front-right, left, right
const SENSOR_OFFSETS: [Cell; 5] = [Cell::UP_LEFT, Cell::UP, Cell::UP_RIGHT, Cell::LEFT, Cell::RIGHT];

/// Cells held by robots that have not despawned (spawning robots included)
pub fn occupied_cells(robots: &[RoboState]) -> AHashSet<Cell> {
    robots
        .iter()
        .filter(|r| !r.is_despawned())
        .map(|r| r.position)
        .collect()
}

/// Observe the five sensed neighbours of a robot with a live heading
pub fn sense(stage: &Stage, occupied: &AHashSet<Cell>, position: Cell, heading: Heading) -> [Sensed; 5] {
    SENSOR_OFFSETS.map(|offset| {
        let cell = position + heading.rotate(offset);
        if stage.is_wall(cell) {
            Sensed::Wall
        } else if occupied.contains(&cell) {
            Sensed::Robo
        } else {
            Sensed::Empty
        }
    })
}

/// Index of the first card matching what the robot senses
///
/// Returns `None` for robots without a live heading or when no card matches.
/// This ignores the touch-exit override; see [`choose_action`].
pub fn choose_card(
    stage: &Stage,
    occupied: &AHashSet<Cell>,
    deck: &Deck,
    robot: &RoboState,
) -> Option<usize> {
    let heading = robot.direction.heading()?;
    let observed = sense(stage, occupied, robot.position, heading);
    deck.iter().position(|card| card.matches(&observed))
}

/// Action a robot intends to take this tick
pub fn choose_action(
    stage: &Stage,
    occupied: &AHashSet<Cell>,
    deck: &Deck,
    robot: &RoboState,
    config: &SimulationConfig,
) -> Action {
    match robot.direction {
        Direction::Despawned => return Action::Wait,
        Direction::Spawning => return Action::Spawn,
        Direction::Facing(_) => {}
    }

    if config.touch_exit && robot.position == stage.exit() {
        return Action::Terminate;
    }

    choose_card(stage, occupied, deck, robot)
        .and_then(|i| deck.get(i))
        .map(|card| card.action)
        .unwrap_or(Action::Wait)
}
