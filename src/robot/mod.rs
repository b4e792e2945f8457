//! Robots: per-slot state and the action tables that move them

pub mod action;
pub mod state;

pub use action::{apply, Action};
pub use state::{Direction, Heading, RoboState};
