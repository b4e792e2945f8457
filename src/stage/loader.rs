//! Load and save stages in the plain text format
//!
//! One line per interior row; the wall border is implicit. `W` marks a wall,
//! `S` the entrance, `F` the exit, anything else is open floor.

use std::fs;
use std::path::Path;

use crate::core::error::{Result, RoboError};
use crate::core::types::Cell;
use crate::stage::grid::Stage;

pub const WALL: char = 'W';
pub const EMPTY: char = 'E';
pub const START: char = 'S';
pub const FINISH: char = 'F';

/// Parse a stage from its text form
pub fn parse_stage(content: &str) -> Result<Stage> {
    let rows: Vec<Vec<char>> = content
        .lines()
        .map(|line| line.trim().chars().collect())
        .collect();

    if rows.is_empty() {
        return Err(RoboError::InvalidStage("stage text has no rows".into()));
    }

    let mut entrance = None;
    let mut exit = None;
    for (y, row) in rows.iter().enumerate() {
        // Grid coordinates are offset by the border
        if let Some(x) = row.iter().position(|&c| c == START) {
            entrance = Some(Cell::new(x as i32 + 1, y as i32 + 1));
        }
        if let Some(x) = row.iter().position(|&c| c == FINISH) {
            exit = Some(Cell::new(x as i32 + 1, y as i32 + 1));
        }
    }

    let (entrance, exit) = match (entrance, exit) {
        (Some(s), Some(f)) => (s, f),
        (None, Some(f)) => {
            tracing::warn!("Stage has no entrance, using default");
            (default_marker(f), f)
        }
        (Some(s), None) => {
            tracing::warn!("Stage has no exit, using default");
            (s, default_marker(s))
        }
        (None, None) => {
            tracing::warn!("Stage has neither entrance nor exit, using defaults");
            let s = Cell::new(1, 1);
            (s, default_marker(s))
        }
    };

    let field_width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    // Grow the grid if a defaulted marker landed on the border
    let width = (field_width + 2).max(entrance.x.max(exit.x) as usize + 2);
    let height = (rows.len() + 2).max(entrance.y.max(exit.y) as usize + 2);

    let mut stage = Stage::new(width, height, entrance, exit)?;
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            if c == WALL {
                stage.set_wall(Cell::new(x as i32 + 1, y as i32 + 1), true);
            }
        }
    }
    Ok(stage)
}

/// Render a stage to its text form (border omitted)
pub fn format_stage(stage: &Stage) -> String {
    let mut out = String::new();
    for y in 1..stage.height() as i32 - 1 {
        for x in 1..stage.width() as i32 - 1 {
            let cell = Cell::new(x, y);
            let c = if stage.is_wall(cell) {
                WALL
            } else if cell == stage.entrance() {
                START
            } else if cell == stage.exit() {
                FINISH
            } else {
                EMPTY
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Load a stage from a text file on disk
pub fn load_stage(path: &Path) -> Result<Stage> {
    let content = fs::read_to_string(path)?;
    parse_stage(&content)
}

/// Save a stage to a text file on disk
pub fn save_stage(stage: &Stage, path: &Path) -> Result<()> {
    fs::write(path, format_stage(stage))?;
    Ok(())
}

/// Default position for a missing marker, avoiding the other marker
fn default_marker(other: Cell) -> Cell {
    let preferred = Cell::new(1, 1);
    if preferred == other {
        Cell::new(2, 1)
    } else {
        preferred
    }
}
