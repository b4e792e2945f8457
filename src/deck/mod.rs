//! Deck: the priority-ordered list of rule cards shared by every robot

pub mod card;
pub mod generate;
pub mod loader;

pub use card::{Card, Sensed, SensorMask, SensorSlot, ACTION_CELL};
pub use generate::{random_card, random_deck};
pub use loader::{format_deck, load_deck, parse_deck, save_deck};

use serde::{Deserialize, Serialize};

/// Ordered cards; the first matching card wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Add a card with the lowest priority
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Insert a card at `index`, clamped to the end of the deck
    pub fn insert(&mut self, index: usize, card: Card) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    pub fn remove(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Move a card to a new priority slot, shifting the cards in between
    ///
    /// Returns false if `from` is out of range.
    pub fn move_card(&mut self, from: usize, to: usize) -> bool {
        let Some(card) = self.remove(from) else {
            return false;
        };
        self.insert(to, card);
        true
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from_cards(iter.into_iter().collect())
    }
}
