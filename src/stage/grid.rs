//! Walled stage grid with entrance and exit cells
//!
//! The outermost ring of cells is always a wall. Every mutation that could
//! touch the border re-establishes that ring, so a live robot can never sense
//! or step outside the grid.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RoboError};
use crate::core::types::Cell;

/// Smallest stage with at least one interior cell
pub const MIN_STAGE_SIZE: usize = 3;

/// Static wall map plus entrance and exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStage")]
pub struct Stage {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    entrance: Cell,
    exit: Cell,
}

impl Stage {
    /// Create an empty walled room
    pub fn new(width: usize, height: usize, entrance: Cell, exit: Cell) -> Result<Self> {
        if width < MIN_STAGE_SIZE || height < MIN_STAGE_SIZE {
            return Err(RoboError::InvalidStage(format!(
                "stage must be at least {0}x{0}, got {1}x{2}",
                MIN_STAGE_SIZE, width, height
            )));
        }

        let mut stage = Self {
            width,
            height,
            walls: vec![false; width * height],
            entrance,
            exit,
        };
        stage.check_interior("entrance", entrance)?;
        stage.check_interior("exit", exit)?;
        stage.init_border();
        Ok(stage)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn entrance(&self) -> Cell {
        self.entrance
    }

    pub fn exit(&self) -> Cell {
        self.exit
    }

    /// True for walls and for anything outside the grid
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => self.walls[i],
            None => true,
        }
    }

    /// Is the cell inside the permanent border ring?
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.x >= 1
            && cell.y >= 1
            && (cell.x as usize) < self.width - 1
            && (cell.y as usize) < self.height - 1
    }

    /// Set or clear a wall. Border cells cannot be changed.
    ///
    /// Returns whether the cell was changed.
    pub fn set_wall(&mut self, cell: Cell, wall: bool) -> bool {
        if !self.is_interior(cell) {
            return false;
        }
        let Some(i) = self.index(cell) else {
            return false;
        };
        let changed = self.walls[i] != wall;
        self.walls[i] = wall;
        changed
    }

    pub fn set_entrance(&mut self, cell: Cell) -> Result<()> {
        self.check_interior("entrance", cell)?;
        self.entrance = cell;
        Ok(())
    }

    pub fn set_exit(&mut self, cell: Cell) -> Result<()> {
        self.check_interior("exit", cell)?;
        self.exit = cell;
        Ok(())
    }

    /// Change the grid size, keeping interior walls that still fit
    ///
    /// The old border is discarded and a fresh one is built. Entrance and exit
    /// are clamped back into the interior if they fell outside.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width < MIN_STAGE_SIZE || height < MIN_STAGE_SIZE {
            return Err(RoboError::InvalidStage(format!(
                "cannot resize stage to {}x{}",
                width, height
            )));
        }

        let mut walls = vec![false; width * height];
        let keep_w = width.min(self.width) - 1;
        let keep_h = height.min(self.height) - 1;
        for y in 1..keep_h {
            for x in 1..keep_w {
                walls[y * width + x] = self.walls[y * self.width + x];
            }
        }

        self.width = width;
        self.height = height;
        self.walls = walls;
        self.entrance = self.clamp_interior(self.entrance);
        self.exit = self.clamp_interior(self.exit);
        self.init_border();
        Ok(())
    }

    /// Turn the outermost ring into walls
    pub fn init_border(&mut self) {
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            self.walls[x] = true;
            self.walls[(h - 1) * w + x] = true;
        }
        for y in 1..h - 1 {
            self.walls[y * w] = true;
            self.walls[y * w + w - 1] = true;
        }
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    fn clamp_interior(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(1, self.width as i32 - 2),
            cell.y.clamp(1, self.height as i32 - 2),
        )
    }

    fn check_interior(&self, what: &str, cell: Cell) -> Result<()> {
        if self.is_interior(cell) {
            Ok(())
        } else {
            Err(RoboError::InvalidStage(format!(
                "{} {} is outside the interior of a {}x{} stage",
                what, cell, self.width, self.height
            )))
        }
    }
}

/// Unchecked wire form; every deserialised stage passes through `Stage::new`
#[derive(Deserialize)]
struct RawStage {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    entrance: Cell,
    exit: Cell,
}

impl TryFrom<RawStage> for Stage {
    type Error = RoboError;

    fn try_from(raw: RawStage) -> Result<Self> {
        let mut stage = Stage::new(raw.width, raw.height, raw.entrance, raw.exit)?;
        if raw.walls.len() != stage.walls.len() {
            return Err(RoboError::InvalidStage(format!(
                "{}x{} stage needs {} wall flags, got {}",
                raw.width,
                raw.height,
                stage.walls.len(),
                raw.walls.len()
            )));
        }
        stage.walls = raw.walls;
        stage.init_border();
        Ok(stage)
    }
}
