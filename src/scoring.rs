/*
Envido and Flor hand values.

Envido: two cards of one suit score their sum plus 20, three of a suit
score the best two plus 20, and an unpaired hand scores its highest card.
Flor: three cards of one suit, all three values plus 20.
*/

use enum_iterator::all;

use crate::cards::{Card, Suit};
use crate::players::TeamSide;

/// Envido value of a single card: face value through 7, 0 for the
/// figures (10, 11, 12).
pub fn envido_value(card: &Card) -> i32 {
    if card.rank >= 10 {
        0
    } else {
        card.rank
    }
}

/// Best Envido score across the hand's suits, 0-33. An empty hand
/// scores 0.
pub fn envido_score(hand: &[Card]) -> i32 {
    let mut best = 0;
    for suit in all::<Suit>() {
        let mut values: Vec<i32> = hand
            .iter()
            .filter(|card| card.suit == suit)
            .map(envido_value)
            .collect();
        values.sort_unstable_by(|a, b| b.cmp(a));

        let candidate = match values.len() {
            0 => continue,
            1 => values[0],
            _ => values[0] + values[1] + 20,
        };
        best = best.max(candidate);
    }
    best
}

/// Three or more cards of one suit.
pub fn has_flor(hand: &[Card]) -> bool {
    if hand.len() < 3 {
        return false;
    }
    all::<Suit>().any(|suit| hand.iter().filter(|card| card.suit == suit).count() >= 3)
}

/// Flor score, 20-37, or `None` when the hand has no Flor. With more
/// than three cards of a suit, the first three in hand order count.
pub fn flor_score(hand: &[Card]) -> Option<i32> {
    if !has_flor(hand) {
        return None;
    }
    for suit in all::<Suit>() {
        let values: Vec<i32> = hand
            .iter()
            .filter(|card| card.suit == suit)
            .map(envido_value)
            .collect();
        if values.len() >= 3 {
            return Some(values[..3].iter().sum::<i32>() + 20);
        }
    }
    None
}

/// Winner of an Envido showdown. An exact tie goes to the side that did
/// not call.
pub fn envido_winner(score1: i32, score2: i32, caller: TeamSide) -> TeamSide {
    if score1 > score2 {
        TeamSide::Team1
    } else if score2 > score1 {
        TeamSide::Team2
    } else {
        caller.opponent()
    }
}

/// Winner of a Flor showdown, or `None` when neither side has Flor.
/// Holding Flor beats not holding it; between two Flors the higher score
/// wins, with ties going to team 1.
pub fn flor_winner(score1: Option<i32>, score2: Option<i32>) -> Option<TeamSide> {
    match (score1, score2) {
        (None, None) => None,
        (Some(_), None) => Some(TeamSide::Team1),
        (None, Some(_)) => Some(TeamSide::Team2),
        (Some(s1), Some(s2)) => {
            if s2 > s1 {
                Some(TeamSide::Team2)
            } else {
                Some(TeamSide::Team1)
            }
        }
    }
}
