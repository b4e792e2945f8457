//! Robot actions and the fixed action lookup tables
//!
//! The tables only cover the four live headings and the eight actions that
//! can be looked up. `Terminate`, `Spawn` and the two lifecycle directions are
//! handled before any lookup happens.

use serde::{Deserialize, Serialize};

use crate::core::types::Cell;
use crate::robot::state::Heading::{Down as D, Left as L, Right as R, Up as U};
use crate::robot::state::{Direction, Heading, RoboState};

/// Action a robot performs in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Wait = 0,
    TurnRight = 1,
    TurnAround = 2,
    TurnLeft = 3,
    MoveForward = 4,
    MoveRight = 5,
    MoveBackwards = 6,
    MoveLeft = 7,
    Terminate = 8,
    /// Synthesized by the engine for robots still waiting at the entrance
    Spawn = 9,
}

impl Action {
    /// Every action that may be stored on a card
    pub const STORED: [Action; 9] = [
        Action::Wait,
        Action::TurnRight,
        Action::TurnAround,
        Action::TurnLeft,
        Action::MoveForward,
        Action::MoveRight,
        Action::MoveBackwards,
        Action::MoveLeft,
        Action::Terminate,
    ];

    /// Permissive decoding: unknown bytes and `Spawn` become `Wait`
    pub fn from_byte(byte: u8) -> Action {
        Self::STORED
            .get(byte as usize)
            .copied()
            .unwrap_or(Action::Wait)
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

const TABLE_ACTIONS: usize = 8;

/// Displacement per (heading, action) for `Wait`..`MoveLeft`
const MOVEMENT: [[Cell; TABLE_ACTIONS]; 4] = [
    // Up
    [Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::UP, Cell::RIGHT, Cell::DOWN, Cell::LEFT],
    // Right
    [Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::RIGHT, Cell::DOWN, Cell::LEFT, Cell::UP],
    // Down
    [Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::DOWN, Cell::LEFT, Cell::UP, Cell::RIGHT],
    // Left
    [Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::ZERO, Cell::LEFT, Cell::UP, Cell::RIGHT, Cell::DOWN],
];

/// Resulting heading per (heading, action) for `Wait`..`MoveLeft`
const TURNS: [[Heading; TABLE_ACTIONS]; 4] = [
    [U, R, D, L, U, U, U, U],
    [R, D, L, U, R, R, R, R],
    [D, L, U, R, D, D, D, D],
    [L, U, R, D, L, L, L, L],
];

/// Tentative state after `action`, ignoring walls and other robots
pub fn apply(state: RoboState, action: Action) -> RoboState {
    let heading = match state.direction {
        Direction::Despawned => return state,
        Direction::Spawning => {
            let direction = match action {
                Action::Terminate => Direction::Despawned,
                _ => Direction::UP,
            };
            return RoboState::new(state.position, direction);
        }
        Direction::Facing(h) => h,
    };

    match action {
        Action::Terminate => RoboState::new(state.position, Direction::Despawned),
        Action::Spawn => state,
        _ => {
            let (row, col) = (heading as usize, action as usize);
            RoboState::new(
                state.position + MOVEMENT[row][col],
                Direction::Facing(TURNS[row][col]),
            )
        }
    }
}
