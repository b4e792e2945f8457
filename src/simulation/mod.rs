//! Simulation core: matching, tick resolution, timelines and sessions

pub mod matcher;
pub mod resolver;
pub mod session;
pub mod state;
pub mod timeline;

pub use matcher::{choose_action, choose_card, occupied_cells, sense};
pub use resolver::{resolve, Resolution};
pub use session::Session;
pub use state::{FailKind, Fingerprint, StageState};
pub use timeline::{Outcome, Timeline};
