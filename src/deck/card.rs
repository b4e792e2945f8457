//! Rule cards: five sensor masks and one action
//!
//! A card is laid out as a 2x3 table. Row 0 holds the front-left, front and
//! front-right sensors; row 1 holds the left sensor, the action and the right
//! sensor. Each sensor is a bit union over the three observable states.

use serde::{Deserialize, Serialize};

use crate::robot::action::Action;

/// Exact state observed in one neighbouring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Sensed {
    Empty = 0b001,
    Wall = 0b010,
    Robo = 0b100,
}

impl Sensed {
    pub const ALL: [Sensed; 3] = [Sensed::Empty, Sensed::Wall, Sensed::Robo];

    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// Set of acceptable observations for one sensor
///
/// Only the seven non-empty unions exist; every other byte decodes to `ANY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct SensorMask(u8);

impl SensorMask {
    pub const EMPTY: SensorMask = SensorMask(0b001);
    pub const WALL: SensorMask = SensorMask(0b010);
    pub const NOT_ROBO: SensorMask = SensorMask(0b011);
    pub const ROBO: SensorMask = SensorMask(0b100);
    pub const NOT_WALL: SensorMask = SensorMask(0b101);
    pub const NOT_EMPTY: SensorMask = SensorMask(0b110);
    pub const ANY: SensorMask = SensorMask(0b111);

    /// All seven masks in code order
    pub const ALL: [SensorMask; 7] = [
        Self::EMPTY,
        Self::WALL,
        Self::NOT_ROBO,
        Self::ROBO,
        Self::NOT_WALL,
        Self::NOT_EMPTY,
        Self::ANY,
    ];

    /// Permissive decoding: bytes outside `1..=7` are `ANY`
    pub fn from_byte(byte: u8) -> SensorMask {
        match byte {
            1..=7 => SensorMask(byte),
            _ => Self::ANY,
        }
    }

    pub fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn matches(self, observed: Sensed) -> bool {
        self.0 & observed.bit() != 0
    }
}

impl From<u8> for SensorMask {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl From<SensorMask> for u8 {
    fn from(mask: SensorMask) -> Self {
        mask.to_byte()
    }
}

impl Default for SensorMask {
    fn default() -> Self {
        Self::ANY
    }
}

/// Sensor slots in the order they are sensed and stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSlot {
    FrontLeft = 0,
    Front = 1,
    FrontRight = 2,
    Left = 3,
    Right = 4,
}

/// Table position of the action cell
pub const ACTION_CELL: (usize, usize) = (1, 1);

/// One rule: fires when every sensor accepts what the robot sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub sensors: [SensorMask; 5],
    pub action: Action,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            sensors: [SensorMask::ANY; 5],
            action: Action::Wait,
        }
    }
}

impl Card {
    pub fn new(sensors: [SensorMask; 5], action: Action) -> Self {
        Self { sensors, action }
    }

    /// A card that fires unconditionally
    pub fn always(action: Action) -> Self {
        Self::new([SensorMask::ANY; 5], action)
    }

    /// Builder-style override of one sensor
    pub fn with_sensor(mut self, slot: SensorSlot, mask: SensorMask) -> Self {
        self.sensors[slot as usize] = mask;
        self
    }

    pub fn sensor(&self, slot: SensorSlot) -> SensorMask {
        self.sensors[slot as usize]
    }

    /// Decode the raw 2x3 byte table
    pub fn from_cells(cells: [[u8; 3]; 2]) -> Self {
        Self {
            sensors: [
                SensorMask::from_byte(cells[0][0]),
                SensorMask::from_byte(cells[0][1]),
                SensorMask::from_byte(cells[0][2]),
                SensorMask::from_byte(cells[1][0]),
                SensorMask::from_byte(cells[1][2]),
            ],
            action: Action::from_byte(cells[ACTION_CELL.0][ACTION_CELL.1]),
        }
    }

    /// Encode as the raw 2x3 byte table
    pub fn to_cells(&self) -> [[u8; 3]; 2] {
        let s = |i: usize| self.sensors[i].to_byte();
        [
            [s(0), s(1), s(2)],
            [s(3), self.action.to_byte(), s(4)],
        ]
    }

    /// Does every sensor accept the matching observation?
    pub fn matches(&self, observed: &[Sensed; 5]) -> bool {
        self.sensors
            .iter()
            .zip(observed.iter())
            .all(|(mask, seen)| mask.matches(*seen))
    }
}
