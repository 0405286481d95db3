/*
Game: Argentine Truco
Rules engine for 2, 4, or 6 players, including the Pica Pica variant.

A deterministic, replayable rules oracle: every operation is a pure
function from immutable state and an input to a new value or a plain
answer. The orchestrator (server, AI, replay tool) owns sequencing and
scorekeeping; this crate owns the rules.
*/

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod players;
pub mod scoring;
pub mod tricks;

// Re-export the main types and operations
pub use betting::{
    can_call_envido_bet, can_call_flor_bet, can_call_truco_bet, can_respond_to_bet,
    decline_points, envido_chain_points, falta_envido_points, next_truco_bet, Bet, BetResponse,
    BetStatus, BetType, BettingState, EnvidoBet, FlorBet, TrucoBet,
};
pub use cards::{
    card_value, compare_cards, compare_cards_with_order, winning_card_index, Card, Suit,
    ANCHO_BASTOS, ANCHO_ESPADAS, SIETE_ESPADAS, SIETE_OROS,
};
pub use config::{FaltaEnvidoMode, GameConfig};
pub use deck::{
    create_deck, create_shuffled_deck, deal_cards, shuffle_deck, DealResult, CARDS_PER_PLAYER,
    DECK_SIZE,
};
pub use error::{Result, TrucoError};
pub use players::{
    first_player, next_player, opposing_team, opposing_teams, player_at_position, player_team,
    players_in_turn_order, rotate_dealer, setup_game, team_players, GameSetup, Player, PlayerId,
    PlayerPosition, Team, TeamId, TeamSide,
};
pub use scoring::{envido_score, envido_value, envido_winner, flor_score, flor_winner, has_flor};
pub use tricks::{
    determine_hand_winner, needs_another_trick, next_trick_leader, resolve_trick, GamePhase,
    Hand, PlayedCard, Trick, TrickResult,
};
