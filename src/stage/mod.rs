//! Stage: the static walled grid robots move through

pub mod grid;
pub mod loader;

pub use grid::{Stage, MIN_STAGE_SIZE};
pub use loader::{format_stage, load_stage, parse_stage, save_stage};
