//! RoboDeck - grid puzzle simulation where robots play a shared deck of rule cards

pub mod core;
pub mod deck;
pub mod robot;
pub mod simulation;
pub mod stage;
