//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick index (0 is the initial state)
pub type Tick = usize;

/// Integer grid cell. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ZERO: Cell = Cell::new(0, 0);
    pub const UP: Cell = Cell::new(0, -1);
    pub const DOWN: Cell = Cell::new(0, 1);
    pub const LEFT: Cell = Cell::new(-1, 0);
    pub const RIGHT: Cell = Cell::new(1, 0);
    pub const UP_LEFT: Cell = Cell::new(-1, -1);
    pub const UP_RIGHT: Cell = Cell::new(1, -1);
    pub const DOWN_LEFT: Cell = Cell::new(-1, 1);
    pub const DOWN_RIGHT: Cell = Cell::new(1, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate a vector a quarter turn clockwise (screen coordinates, y down)
    pub fn rotate_cw(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl std::ops::Add for Cell {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Cell {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Neg for Cell {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::str::FromStr for Cell {
    type Err = String;

    /// Parses `X,Y`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
        let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in '{}': {}", s, e))?;
        let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in '{}': {}", s, e))?;
        Ok(Self::new(x, y))
    }
}
