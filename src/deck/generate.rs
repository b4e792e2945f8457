//! Random deck generation for stress runs

use rand::Rng;

use crate::deck::card::{Card, SensorMask};
use crate::deck::Deck;
use crate::robot::action::Action;

/// Draw one card from the seven masks and nine storable actions
pub fn random_card<R: Rng>(rng: &mut R) -> Card {
    let mut sensors = [SensorMask::ANY; 5];
    for sensor in sensors.iter_mut() {
        *sensor = SensorMask::ALL[rng.gen_range(0..SensorMask::ALL.len())];
    }
    let action = Action::STORED[rng.gen_range(0..Action::STORED.len())];
    Card::new(sensors, action)
}

pub fn random_deck<R: Rng>(rng: &mut R, count: usize) -> Deck {
    (0..count).map(|_| random_card(rng)).collect()
}
