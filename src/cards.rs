/*
Card model and hierarchy for Argentine Truco.

The Spanish deck has no 8s or 9s. Four cards outrank everything by suit
(the two anchos and the two strong sevens); every other card ranks by its
number alone, so two 3s of different suits tie. Ties inside a trick are a
parda and are broken by play order at the trick level, not here.
*/

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use enum_iterator::{all, Sequence};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrucoError};

/// Ranks present in the 40-card Spanish deck, low to high by number.
pub const RANKS: [i32; 10] = [1, 2, 3, 4, 5, 6, 7, 10, 11, 12];

#[derive(
    Debug, Clone, Copy, Sequence, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum Suit {
    Espadas,
    Bastos,
    Oros,
    Copas,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub rank: i32,
    pub suit: Suit,
}

/// Ancho de Espadas, the highest card in the game.
pub const ANCHO_ESPADAS: Card = Card {
    rank: 1,
    suit: Suit::Espadas,
};
/// Ancho de Bastos, second highest.
pub const ANCHO_BASTOS: Card = Card {
    rank: 1,
    suit: Suit::Bastos,
};
/// Siete de Espadas, third highest.
pub const SIETE_ESPADAS: Card = Card {
    rank: 7,
    suit: Suit::Espadas,
};
/// Siete de Oro, fourth highest.
pub const SIETE_OROS: Card = Card {
    rank: 7,
    suit: Suit::Oros,
};

// Hierarchy values, higher is stronger. Built once: every card gets its
// by-rank value, then the four special cards are overridden.
static CARD_HIERARCHY: Lazy<HashMap<Card, i32>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(40);
    for suit in all::<Suit>() {
        for rank in RANKS {
            let value = match rank {
                3 => 10,
                2 => 9,
                1 => 8,
                12 => 7,
                11 => 6,
                10 => 5,
                7 => 4,
                6 => 3,
                5 => 2,
                _ => 1, // 4s
            };
            table.insert(Card { rank, suit }, value);
        }
    }
    table.insert(ANCHO_ESPADAS, 14);
    table.insert(ANCHO_BASTOS, 13);
    table.insert(SIETE_ESPADAS, 12);
    table.insert(SIETE_OROS, 11);
    table
});

impl Card {
    pub fn new(rank: i32, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// True for the four cards whose suit matters in the hierarchy.
    pub fn is_special(&self) -> bool {
        *self == ANCHO_ESPADAS
            || *self == ANCHO_BASTOS
            || *self == SIETE_ESPADAS
            || *self == SIETE_OROS
    }

    pub fn is_valid(&self) -> bool {
        RANKS.contains(&self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            1 => "Ace",
            2 => "Two",
            3 => "Three",
            4 => "Four",
            5 => "Five",
            6 => "Six",
            7 => "Seven",
            10 => "Jack",
            11 => "Knight",
            _ => "King",
        };
        let suit = match self.suit {
            Suit::Espadas => "Swords",
            Suit::Bastos => "Clubs",
            Suit::Oros => "Coins",
            Suit::Copas => "Cups",
        };
        write!(f, "{} of {}", rank, suit)
    }
}

/// Hierarchy value for a card, 1 (any 4) through 14 (ancho de espadas).
///
/// Panics on a rank that does not exist in the Spanish deck.
pub fn card_value(card: &Card) -> i32 {
    *CARD_HIERARCHY
        .get(card)
        .unwrap_or_else(|| panic!("invalid card: {} of {:?}", card.rank, card.suit))
}

/// Compare two cards by hierarchy alone.
///
/// `Equal` covers both the same card and two different cards of equal
/// hierarchy value (a parda). This function does not know play order; use
/// [`compare_cards_with_order`] when the first argument was played first.
pub fn compare_cards(card1: &Card, card2: &Card) -> Ordering {
    if card1 == card2 {
        return Ordering::Equal;
    }
    card_value(card1).cmp(&card_value(card2))
}

/// Compare two cards where `card1` was played strictly before `card2`.
/// A hierarchy tie goes to the earlier card.
pub fn compare_cards_with_order(card1: &Card, card2: &Card) -> Ordering {
    match compare_cards(card1, card2) {
        Ordering::Equal => Ordering::Greater,
        ordering => ordering,
    }
}

/// Index of the winning card in play order.
///
/// A later card takes the lead only when strictly greater, so the first
/// of any tied cards keeps the lead.
pub fn winning_card_index(cards: &[Card]) -> Result<usize> {
    if cards.is_empty() {
        return Err(TrucoError::EmptyCards);
    }

    let mut winning_index = 0;
    for (index, card) in cards.iter().enumerate().skip(1) {
        if compare_cards(&cards[winning_index], card) == Ordering::Less {
            winning_index = index;
        }
    }
    Ok(winning_index)
}
