/*
Errors raised when the engine is called with data that should have been
validated upstream. Rule questions ("may this bet be called now?") are
answered by the boolean predicates in `betting` and never error.
*/

use thiserror::Error;

use crate::players::{PlayerId, PlayerPosition, TeamId};

pub type Result<T> = std::result::Result<T, TrucoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrucoError {
    // Configuration
    #[error("truco must be played with 2, 4, or 6 players (got {0})")]
    InvalidPlayerCount(usize),
    #[error("pica pica mode requires 6 players (got {0})")]
    PicaPicaRequiresSixPlayers(usize),
    #[error("winning score must be positive (got {0})")]
    InvalidWinningScore(i32),
    #[error("las buenas threshold must be in 0..{winning_score} (got {threshold})")]
    InvalidThreshold { threshold: i32, winning_score: i32 },

    // Lookups
    #[error("no player at position {0}")]
    PlayerNotFound(PlayerPosition),
    #[error("team {0} not found")]
    TeamNotFound(TeamId),
    #[error("no team for player {0}")]
    NoTeamForPlayer(PlayerId),
    #[error("no team for position {0}")]
    NoTeamForPosition(PlayerPosition),
    #[error("opposing-team lookup requires exactly 2 teams (got {0})")]
    NotTwoTeams(usize),

    // State
    #[error("cannot pick a winning card from no cards")]
    EmptyCards,
    #[error("cannot resolve a trick with no cards played")]
    EmptyTrick,
    #[error("previous trick has no result")]
    MissingTrickResult,
    #[error("previous trick has a decisive result but no winner position")]
    MissingWinnerPosition,

    // Indexing and dealing
    #[error("card index {index} out of range for hand of {hand_size}")]
    InvalidCardIndex { index: usize, hand_size: usize },
    #[error("not enough cards in deck: need {needed}, have {available}")]
    InsufficientCards { needed: usize, available: usize },
}
