/*
Tricks, hands, and their resolution.

A hand is up to three tricks. Two trick wins take the hand; a parda
(tied trick) goes to whoever won first, which is why a hand can end after
two tricks. All updates build new values; prior snapshots stay valid.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{compare_cards, winning_card_index, Card};
use crate::error::{Result, TrucoError};
use crate::players::{PlayerId, PlayerPosition, TeamId, TeamSide};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    Waiting,
    Dealing,
    Betting,
    Playing,
    Scoring,
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TrickResult {
    Team1Win,
    Team2Win,
    Parda,
}

impl TrickResult {
    pub fn winning_side(&self) -> Option<TeamSide> {
        match self {
            TrickResult::Team1Win => Some(TeamSide::Team1),
            TrickResult::Team2Win => Some(TeamSide::Team2),
            TrickResult::Parda => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub player_id: PlayerId,
    pub card: Card,
    pub position: PlayerPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    /// 1, 2, or 3.
    pub trick_number: usize,
    /// Cards in play order.
    pub played_cards: Vec<PlayedCard>,
    pub result: Option<TrickResult>,
    pub winner_position: Option<PlayerPosition>,
}

impl Trick {
    pub fn new(trick_number: usize) -> Self {
        Self {
            trick_number,
            played_cards: vec![],
            result: None,
            winner_position: None,
        }
    }

    pub fn with_card(&self, played_card: PlayedCard) -> Trick {
        let mut played_cards = self.played_cards.clone();
        played_cards.push(played_card);
        Trick {
            played_cards,
            ..self.clone()
        }
    }

    pub fn with_result(&self, result: TrickResult, winner_position: Option<PlayerPosition>) -> Trick {
        Trick {
            result: Some(result),
            winner_position,
            ..self.clone()
        }
    }

    pub fn is_complete(&self, num_players: usize) -> bool {
        self.played_cards.len() == num_players
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub hand_number: usize,
    /// 1 to 3 tricks; a new trick is appended only once the previous one
    /// has a result.
    pub tricks: Vec<Trick>,
    /// Index into `tricks`.
    pub current_trick: usize,
    pub winner: Option<TeamId>,
    /// Current Truco value of the hand.
    pub points_at_stake: i32,
}

impl Hand {
    pub fn new(hand_number: usize, points_at_stake: i32) -> Self {
        Self {
            hand_number,
            tricks: vec![Trick::new(1)],
            current_trick: 0,
            winner: None,
            points_at_stake,
        }
    }

    pub fn with_new_trick(&self) -> Hand {
        let mut tricks = self.tricks.clone();
        tricks.push(Trick::new(self.tricks.len() + 1));
        Hand {
            tricks,
            current_trick: self.current_trick + 1,
            ..self.clone()
        }
    }

    pub fn with_trick_replaced(&self, index: usize, trick: Trick) -> Hand {
        let mut tricks = self.tricks.clone();
        tricks[index] = trick;
        Hand {
            tricks,
            ..self.clone()
        }
    }

    pub fn with_winner(&self, winner: TeamId) -> Hand {
        Hand {
            winner: Some(winner),
            ..self.clone()
        }
    }

    pub fn with_points(&self, points_at_stake: i32) -> Hand {
        Hand {
            points_at_stake,
            ..self.clone()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }
}

/// Resolve a completed trick against a seat-to-team map.
///
/// The hierarchy scan gives the first-played card the lead on ties, but a
/// genuine tie between two different played cards is a parda with no
/// winner, regardless of order.
pub fn resolve_trick(
    trick: &Trick,
    position_to_team: &HashMap<PlayerPosition, TeamId>,
) -> Result<(TrickResult, Option<PlayerPosition>)> {
    if trick.played_cards.is_empty() {
        return Err(TrucoError::EmptyTrick);
    }

    let cards: Vec<Card> = trick.played_cards.iter().map(|pc| pc.card).collect();
    let winning_index = winning_card_index(&cards)?;
    let winning_card = cards[winning_index];

    for (index, card) in cards.iter().enumerate() {
        if index != winning_index
            && compare_cards(card, &winning_card) == std::cmp::Ordering::Equal
        {
            debug!(trick = trick.trick_number, "trick is a parda");
            return Ok((TrickResult::Parda, None));
        }
    }

    let winner_position = trick.played_cards[winning_index].position;
    let winner_team = position_to_team
        .get(&winner_position)
        .ok_or(TrucoError::NoTeamForPosition(winner_position))?;

    let result = if *winner_team == TeamSide::Team1.team_id() {
        TrickResult::Team1Win
    } else {
        TrickResult::Team2Win
    };
    debug!(
        trick = trick.trick_number,
        winner_position,
        ?result,
        "trick resolved"
    );
    Ok((result, Some(winner_position)))
}

/// Winner of the hand, or `None` while it is still undecided.
///
/// Two trick wins settle it immediately. One win plus a parda (with no
/// opposing win) settles it as soon as both results are in. A 1-1-1 split
/// goes to whoever won first. Three pardas go to the team of the player
/// who led the first trick (the mano), which is why this takes the same
/// seat-to-team map as [`resolve_trick`].
pub fn determine_hand_winner(
    hand: &Hand,
    position_to_team: &HashMap<PlayerPosition, TeamId>,
) -> Option<TeamId> {
    let completed_count = hand.tricks.iter().filter(|t| t.result.is_some()).count();
    if completed_count == 0 {
        return None;
    }

    let mut team1_wins = 0;
    let mut team2_wins = 0;
    let mut pardas = 0;
    let mut first_winner: Option<TeamSide> = None;

    // In trick order so the first winner is recorded correctly
    for trick in &hand.tricks {
        match trick.result {
            Some(TrickResult::Team1Win) => {
                team1_wins += 1;
                first_winner.get_or_insert(TeamSide::Team1);
            }
            Some(TrickResult::Team2Win) => {
                team2_wins += 1;
                first_winner.get_or_insert(TeamSide::Team2);
            }
            Some(TrickResult::Parda) => pardas += 1,
            None => {}
        }
    }

    if team1_wins >= 2 {
        return Some(TeamSide::Team1.team_id());
    }
    if team2_wins >= 2 {
        return Some(TeamSide::Team2.team_id());
    }

    if completed_count == 3 {
        // One win each plus a parda: whoever won first takes the hand
        if team1_wins == 1 && team2_wins == 1 && pardas == 1 {
            return first_winner.map(|side| side.team_id());
        }

        // Every trick tied: the hand goes to the mano's team
        if pardas == 3 {
            if let Some(first_play) = hand.tricks[0].played_cards.first() {
                return position_to_team.get(&first_play.position).cloned();
            }
        }
    }

    if completed_count >= 2 {
        // One win plus a parda with no opposing win ends the hand early
        if team1_wins == 1 && team2_wins == 0 && pardas >= 1 {
            return Some(TeamSide::Team1.team_id());
        }
        if team2_wins == 1 && team1_wins == 0 && pardas >= 1 {
            return Some(TeamSide::Team2.team_id());
        }
    }

    None
}

pub fn needs_another_trick(
    hand: &Hand,
    position_to_team: &HashMap<PlayerPosition, TeamId>,
) -> bool {
    if hand.winner.is_some() {
        return false;
    }
    if hand.tricks.len() >= 3 && hand.tricks[2].result.is_some() {
        return false;
    }
    determine_hand_winner(hand, position_to_team).is_none()
}

/// Who leads the current trick: the supplied leader for the first trick,
/// the previous trick's winner otherwise, or the same leader again after
/// a parda.
pub fn next_trick_leader(hand: &Hand, previous_leader: PlayerPosition) -> Result<PlayerPosition> {
    if hand.current_trick == 0 {
        return Ok(previous_leader);
    }

    let previous_trick = hand
        .tricks
        .get(hand.current_trick - 1)
        .ok_or(TrucoError::MissingTrickResult)?;
    let result = previous_trick.result.ok_or(TrucoError::MissingTrickResult)?;

    if result == TrickResult::Parda {
        return Ok(previous_leader);
    }
    previous_trick
        .winner_position
        .ok_or(TrucoError::MissingWinnerPosition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Suit, ANCHO_BASTOS, ANCHO_ESPADAS};

    fn two_team_map() -> HashMap<PlayerPosition, TeamId> {
        // Even seats team 1, odd seats team 2 (standard 4-player table)
        (0..4)
            .map(|position| {
                let side = if position % 2 == 0 {
                    TeamSide::Team1
                } else {
                    TeamSide::Team2
                };
                (position, side.team_id())
            })
            .collect()
    }

    fn played(position: PlayerPosition, card: Card) -> PlayedCard {
        PlayedCard {
            player_id: format!("player-{}", position),
            card,
            position,
        }
    }

    fn trick_with_cards(cards: &[(PlayerPosition, Card)]) -> Trick {
        let mut trick = Trick::new(1);
        for (position, card) in cards {
            trick = trick.with_card(played(*position, *card));
        }
        trick
    }

    fn hand_with_results(results: &[TrickResult]) -> Hand {
        let mut hand = Hand::new(1, 1);
        for (index, result) in results.iter().enumerate() {
            if index > 0 {
                hand = hand.with_new_trick();
            }
            // Winner position is irrelevant to hand-winner counting
            let resolved = hand.tricks[index].with_result(*result, Some(0));
            hand = hand.with_trick_replaced(index, resolved);
        }
        hand
    }

    #[test]
    fn test_resolve_trick_clear_winner() {
        let trick = trick_with_cards(&[
            (0, Card::new(4, Suit::Copas)),
            (1, ANCHO_ESPADAS),
            (2, Card::new(3, Suit::Oros)),
            (3, Card::new(12, Suit::Bastos)),
        ]);
        let (result, winner) = resolve_trick(&trick, &two_team_map()).unwrap();
        assert_eq!(result, TrickResult::Team2Win);
        assert_eq!(winner, Some(1));
    }

    #[test]
    fn test_resolve_trick_parda() {
        // Two 3s from opposite teams tie the trick even though the scan
        // would hand it to the first player
        let trick = trick_with_cards(&[
            (0, Card::new(3, Suit::Espadas)),
            (1, Card::new(3, Suit::Copas)),
            (2, Card::new(5, Suit::Oros)),
            (3, Card::new(6, Suit::Bastos)),
        ]);
        let (result, winner) = resolve_trick(&trick, &two_team_map()).unwrap();
        assert_eq!(result, TrickResult::Parda);
        assert_eq!(winner, None);
    }

    #[test]
    fn test_resolve_trick_specials_never_tie() {
        let trick = trick_with_cards(&[(0, ANCHO_ESPADAS), (1, ANCHO_BASTOS)]);
        let (result, winner) = resolve_trick(&trick, &two_team_map()).unwrap();
        assert_eq!(result, TrickResult::Team1Win);
        assert_eq!(winner, Some(0));
    }

    #[test]
    fn test_resolve_trick_errors() {
        assert_eq!(
            resolve_trick(&Trick::new(1), &two_team_map()),
            Err(TrucoError::EmptyTrick)
        );

        let trick = trick_with_cards(&[(5, ANCHO_ESPADAS)]);
        assert_eq!(
            resolve_trick(&trick, &two_team_map()),
            Err(TrucoError::NoTeamForPosition(5))
        );
    }

    #[derive(Debug)]
    struct HandWinnerTestCase {
        description: &'static str,
        results: Vec<TrickResult>,
        expected: Option<&'static str>,
    }

    #[test]
    fn test_determine_hand_winner() {
        let test_cases = [
            HandWinnerTestCase {
                description: "two straight wins",
                results: vec![TrickResult::Team1Win, TrickResult::Team1Win],
                expected: Some("team-1"),
            },
            HandWinnerTestCase {
                description: "win plus parda ends the hand at two tricks",
                results: vec![TrickResult::Team1Win, TrickResult::Parda],
                expected: Some("team-1"),
            },
            HandWinnerTestCase {
                description: "parda then win",
                results: vec![TrickResult::Parda, TrickResult::Team2Win],
                expected: Some("team-2"),
            },
            HandWinnerTestCase {
                description: "split after two tricks is undecided",
                results: vec![TrickResult::Team1Win, TrickResult::Team2Win],
                expected: None,
            },
            HandWinnerTestCase {
                description: "split plus parda goes to the first winner",
                results: vec![
                    TrickResult::Team1Win,
                    TrickResult::Team2Win,
                    TrickResult::Parda,
                ],
                expected: Some("team-1"),
            },
            HandWinnerTestCase {
                description: "split decided by the third trick",
                results: vec![
                    TrickResult::Team2Win,
                    TrickResult::Team1Win,
                    TrickResult::Team2Win,
                ],
                expected: Some("team-2"),
            },
            HandWinnerTestCase {
                description: "one trick resolved is undecided",
                results: vec![TrickResult::Team1Win],
                expected: None,
            },
            HandWinnerTestCase {
                description: "two pardas and a late win",
                results: vec![
                    TrickResult::Parda,
                    TrickResult::Parda,
                    TrickResult::Team2Win,
                ],
                expected: Some("team-2"),
            },
        ];

        for test_case in test_cases {
            let hand = hand_with_results(&test_case.results);
            assert_eq!(
                determine_hand_winner(&hand, &two_team_map()).as_deref(),
                test_case.expected,
                "{}",
                test_case.description
            );
        }
    }

    #[test]
    fn test_three_pardas_go_to_the_mano() {
        // Seat 1 (team 2) led the first trick; every trick tied
        let mut hand = hand_with_results(&[
            TrickResult::Parda,
            TrickResult::Parda,
            TrickResult::Parda,
        ]);
        let first = hand.tricks[0]
            .with_card(played(1, Card::new(3, Suit::Espadas)))
            .with_card(played(2, Card::new(3, Suit::Copas)));
        hand = hand.with_trick_replaced(0, first);

        assert_eq!(
            determine_hand_winner(&hand, &two_team_map()).as_deref(),
            Some("team-2")
        );
    }

    #[test]
    fn test_needs_another_trick() {
        let map = two_team_map();

        let undecided = hand_with_results(&[TrickResult::Team1Win, TrickResult::Team2Win]);
        assert!(needs_another_trick(&undecided, &map));

        let decided = hand_with_results(&[TrickResult::Team1Win, TrickResult::Parda]);
        assert!(!needs_another_trick(&decided, &map));

        let won = undecided.with_winner("team-1".to_string());
        assert!(!needs_another_trick(&won, &map));

        let all_played = hand_with_results(&[
            TrickResult::Team1Win,
            TrickResult::Team2Win,
            TrickResult::Parda,
        ]);
        assert!(!needs_another_trick(&all_played, &map));
    }

    #[test]
    fn test_next_trick_leader() {
        // First trick: the supplied leader
        let hand = Hand::new(1, 1);
        assert_eq!(next_trick_leader(&hand, 2).unwrap(), 2);

        // Winner of the previous trick leads
        let mut hand = Hand::new(1, 1);
        let resolved = hand.tricks[0].with_result(TrickResult::Team2Win, Some(3));
        hand = hand.with_trick_replaced(0, resolved).with_new_trick();
        assert_eq!(next_trick_leader(&hand, 2).unwrap(), 3);

        // Parda: same leader again
        let mut hand = Hand::new(1, 1);
        let resolved = hand.tricks[0].with_result(TrickResult::Parda, None);
        hand = hand.with_trick_replaced(0, resolved).with_new_trick();
        assert_eq!(next_trick_leader(&hand, 2).unwrap(), 2);
    }

    #[test]
    fn test_next_trick_leader_errors() {
        let hand = Hand::new(1, 1).with_new_trick();
        assert_eq!(
            next_trick_leader(&hand, 0),
            Err(TrucoError::MissingTrickResult)
        );

        let mut hand = Hand::new(1, 1);
        let resolved = hand.tricks[0].with_result(TrickResult::Team1Win, None);
        hand = hand.with_trick_replaced(0, resolved).with_new_trick();
        assert_eq!(
            next_trick_leader(&hand, 0),
            Err(TrucoError::MissingWinnerPosition)
        );
    }

    #[test]
    fn test_trick_completion_and_hand_snapshots() {
        let trick = trick_with_cards(&[(0, ANCHO_ESPADAS), (1, Card::new(4, Suit::Copas))]);
        assert!(trick.is_complete(2));
        assert!(!trick.is_complete(4));

        let hand = Hand::new(1, 1);
        let grown = hand.with_new_trick().with_new_trick();
        assert_eq!(hand.tricks.len(), 1, "original hand unchanged");
        assert_eq!(grown.tricks.len(), 3);
        assert_eq!(grown.current_trick, 2);
        assert_eq!(grown.tricks[2].trick_number, 3);

        let raised = hand.with_points(4);
        assert_eq!(hand.points_at_stake, 1);
        assert_eq!(raised.points_at_stake, 4);
        assert!(!raised.is_complete());
        assert!(raised.with_winner("team-1".to_string()).is_complete());
    }

    #[test]
    fn test_hand_serde_round_trip() {
        let hand = hand_with_results(&[TrickResult::Team1Win, TrickResult::Parda]);
        let json = serde_json::to_string(&hand).unwrap();
        let back: Hand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hand);
        assert!(json.contains("\"pointsAtStake\""), "camelCase wire names");
    }
}
