/*
Deck construction, shuffling, and dealing.

Shuffling never mutates its input; dealing splits the front of the deck
into consecutive three-card hands and returns the rest, so a replay with
the same deck order is fully deterministic.
*/

use enum_iterator::all;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Suit, RANKS};
use crate::error::{Result, TrucoError};

/// Cards in the Spanish deck used for Truco.
pub const DECK_SIZE: usize = 40;

/// Cards dealt to each player per hand.
pub const CARDS_PER_PLAYER: usize = 3;

/// The full deck in canonical order: suit-major, ranks ascending.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in all::<Suit>() {
        for rank in RANKS {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// A new Fisher-Yates permutation of `deck`. The input is left untouched.
pub fn shuffle_deck(deck: &[Card], rng: &mut impl Rng) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// A fresh deck, already shuffled with the thread RNG.
pub fn create_shuffled_deck() -> Vec<Card> {
    shuffle_deck(&create_deck(), &mut thread_rng())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DealResult {
    pub hands: Vec<Vec<Card>>,
    pub remaining_deck: Vec<Card>,
}

/// Deal `cards_per_player` cards to each player from the front of `deck`.
///
/// Hands are consecutive runs, not round-robin: player 0 takes the first
/// three cards, player 1 the next three, and so on.
pub fn deal_cards(deck: &[Card], num_players: usize, cards_per_player: usize) -> Result<DealResult> {
    let needed = num_players * cards_per_player;
    if deck.len() < needed {
        return Err(TrucoError::InsufficientCards {
            needed,
            available: deck.len(),
        });
    }

    if num_players != 2 && num_players != 4 && num_players != 6 {
        return Err(TrucoError::InvalidPlayerCount(num_players));
    }

    let hands = (0..num_players)
        .map(|player| deck[player * cards_per_player..(player + 1) * cards_per_player].to_vec())
        .collect();
    let remaining_deck = deck[needed..].to_vec();

    debug!(num_players, cards_per_player, "dealt hands");
    Ok(DealResult {
        hands,
        remaining_deck,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn as_multiset(cards: &[Card]) -> Vec<Card> {
        let mut sorted = cards.to_vec();
        sorted.sort_by_key(|c| (c.suit, c.rank));
        sorted
    }

    #[test]
    fn test_deck_composition() {
        let deck = create_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        // No duplicates, no 8s or 9s
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| c.rank != 8 && c.rank != 9));
        assert!(deck.iter().all(|c| c.is_valid()));

        // 10 cards of each suit
        for suit in all::<Suit>() {
            assert_eq!(deck.iter().filter(|c| c.suit == suit).count(), 10);
        }
    }

    #[test]
    fn test_deck_is_canonical() {
        // Two fresh decks agree card-for-card
        assert_eq!(create_deck(), create_deck());
    }

    #[test]
    fn test_shuffle_preserves_multiset_and_input() {
        let deck = create_deck();
        let mut rng = StdRng::seed_from_u64(42);
        let shuffled = shuffle_deck(&deck, &mut rng);

        assert_eq!(deck, create_deck(), "input deck must not change");
        assert_eq!(shuffled.len(), DECK_SIZE);
        assert_eq!(as_multiset(&shuffled), as_multiset(&deck));
        assert_ne!(shuffled, deck, "seeded shuffle should permute the deck");
    }

    #[test]
    fn test_deal_four_players() {
        let deck = create_deck();
        let deal = deal_cards(&deck, 4, CARDS_PER_PLAYER).unwrap();

        assert_eq!(deal.hands.len(), 4);
        assert!(deal.hands.iter().all(|h| h.len() == 3));
        assert_eq!(deal.remaining_deck.len(), 28);

        // Hands plus remainder partition the deck
        let mut all_cards: Vec<Card> = deal.hands.concat();
        all_cards.extend(deal.remaining_deck.iter().copied());
        assert_eq!(as_multiset(&all_cards), as_multiset(&deck));

        // Sequential from the front
        assert_eq!(deal.hands[0], deck[0..3]);
        assert_eq!(deal.hands[1], deck[3..6]);
    }

    #[test]
    fn test_deal_six_players() {
        let deck = create_deck();
        let deal = deal_cards(&deck, 6, CARDS_PER_PLAYER).unwrap();
        assert_eq!(deal.hands.len(), 6);
        assert_eq!(deal.remaining_deck.len(), 22);
    }

    #[test]
    fn test_deal_errors() {
        let deck = create_deck();
        assert_eq!(
            deal_cards(&deck, 3, CARDS_PER_PLAYER),
            Err(TrucoError::InvalidPlayerCount(3))
        );
        assert_eq!(
            deal_cards(&deck[..5], 2, CARDS_PER_PLAYER),
            Err(TrucoError::InsufficientCards {
                needed: 6,
                available: 5
            })
        );
    }
}
