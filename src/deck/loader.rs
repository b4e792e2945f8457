//! Load and save decks in the plain text format
//!
//! A card is two comma separated rows: three sensor codes, then sensor,
//! action, sensor. Lines with fewer than three fields are skipped, so blank
//! separator lines and comments without commas are ignored.

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::deck::card::{Card, SensorMask};
use crate::deck::Deck;
use crate::robot::action::Action;

/// Sensor codes indexed by mask value; slot 0 is never a mask, 7 (`ANY`) prints blank
const SENSOR_CODES: [&str; 8] = ["", "E", "W", "-R", "R", "-W", "-E", ""];

/// Action codes indexed by action value
const ACTION_CODES: [&str; 9] = ["T", "R", "U", "L", "W", "A", "S", "D", "X"];

/// Decode a sensor code; blank and unknown codes mean `ANY`
pub fn sensor_from_code(code: &str) -> SensorMask {
    let code = code.trim();
    SENSOR_CODES[1..7]
        .iter()
        .position(|c| *c == code)
        .map(|i| SensorMask::from_byte(i as u8 + 1))
        .unwrap_or(SensorMask::ANY)
}

pub fn sensor_code(mask: SensorMask) -> &'static str {
    SENSOR_CODES[mask.to_byte() as usize]
}

/// Decode an action code; `None` for unknown codes
pub fn action_from_code(code: &str) -> Option<Action> {
    let code = code.trim();
    ACTION_CODES
        .iter()
        .position(|c| *c == code)
        .map(|i| Action::from_byte(i as u8))
}

pub fn action_code(action: Action) -> &'static str {
    ACTION_CODES
        .get(action.to_byte() as usize)
        .copied()
        .unwrap_or(ACTION_CODES[0])
}

/// Parse a deck from its text form
pub fn parse_deck(content: &str) -> Result<Deck> {
    let mut deck = Deck::new();
    let mut top: Option<[SensorMask; 3]> = None;

    for (line_no, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            continue;
        }

        match top.take() {
            None => {
                top = Some([
                    sensor_from_code(fields[0]),
                    sensor_from_code(fields[1]),
                    sensor_from_code(fields[2]),
                ]);
            }
            Some([front_left, front, front_right]) => {
                let action = action_from_code(fields[1]).unwrap_or_else(|| {
                    tracing::warn!(
                        "Unknown action code '{}' on line {}, using Wait",
                        fields[1].trim(),
                        line_no + 1
                    );
                    Action::Wait
                });
                let left = sensor_from_code(fields[0]);
                let right = sensor_from_code(fields[2]);
                deck.push(Card::new([front_left, front, front_right, left, right], action));
            }
        }
    }

    if top.is_some() {
        tracing::warn!("Deck text ends with half a card, dropping it");
    }

    Ok(deck)
}

/// Render a deck to its text form
pub fn format_deck(deck: &Deck) -> String {
    let mut out = String::new();
    for card in deck.iter() {
        let s = |i: usize| pad(sensor_code(card.sensors[i]));
        out.push('\n');
        out.push_str(&format!("{},{},{}\n", s(0), s(1), s(2)));
        out.push_str(&format!("{},{},{}\n", s(3), pad(action_code(card.action)), s(4)));
    }
    out
}

/// Load a deck from a text file on disk
pub fn load_deck(path: &Path) -> Result<Deck> {
    let content = fs::read_to_string(path)?;
    parse_deck(&content)
}

/// Save a deck to a text file on disk
pub fn save_deck(deck: &Deck, path: &Path) -> Result<()> {
    fs::write(path, format_deck(deck))?;
    Ok(())
}

/// Right-align a code in two columns
fn pad(code: &str) -> String {
    format!("{:>2}", code)
}
