//! Robot position and facing

use serde::{Deserialize, Serialize};

use crate::core::types::Cell;

/// One of the four live facings, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Heading {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Rotate a vector expressed relative to an upward-facing robot
    pub fn rotate(self, v: Cell) -> Cell {
        match self {
            Heading::Up => v,
            Heading::Right => v.rotate_cw(),
            Heading::Down => -v,
            Heading::Left => -v.rotate_cw(),
        }
    }
}

/// Robot facing including the two lifecycle states that cannot move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Facing(Heading),
    Spawning,
    Despawned,
}

impl Direction {
    pub const UP: Direction = Direction::Facing(Heading::Up);
    pub const RIGHT: Direction = Direction::Facing(Heading::Right);
    pub const DOWN: Direction = Direction::Facing(Heading::Down);
    pub const LEFT: Direction = Direction::Facing(Heading::Left);

    pub fn heading(self) -> Option<Heading> {
        match self {
            Direction::Facing(h) => Some(h),
            _ => None,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Direction::Facing(_))
    }
}

/// Position and facing of one robot slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoboState {
    pub position: Cell,
    pub direction: Direction,
}

impl RoboState {
    pub fn new(position: Cell, direction: Direction) -> Self {
        Self { position, direction }
    }

    /// A robot waiting at the entrance to be admitted
    pub fn spawning(entrance: Cell) -> Self {
        Self::new(entrance, Direction::Spawning)
    }

    pub fn is_despawned(&self) -> bool {
        self.direction == Direction::Despawned
    }

    pub fn is_spawning(&self) -> bool {
        self.direction == Direction::Spawning
    }
}
