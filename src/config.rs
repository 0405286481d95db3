/*
Game configuration. Every option is explicit and the struct is passed by
value; there is no implicit global default object.
*/

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrucoError};

/// How many points a Falta Envido is worth.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FaltaEnvidoMode {
    /// Points the leading team still needs to win.
    ToLeader,
    /// Traditional: points the trailing team still needs, until the leader
    /// reaches Las Buenas.
    #[default]
    ToLoser,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Number of players: 2, 4, or 6.
    pub num_players: usize,
    /// Whether Flor bets are allowed.
    pub flor_enabled: bool,
    /// Whether Real Envido may be called repeatedly in one chain.
    pub real_envido_multiple: bool,
    pub falta_envido_mode: FaltaEnvidoMode,
    /// Score needed to win the game.
    pub winning_score: i32,
    /// Score at which a team enters Las Buenas.
    pub las_buenas_threshold: i32,
    /// 6-player variant where every player is their own team.
    pub pica_pica_mode: bool,
}

impl Default for GameConfig {
    /// Traditional Argentine rules: 4 players, Flor on, Real Envido once,
    /// Falta Envido to the loser, game to 30 with Las Buenas at 15.
    fn default() -> Self {
        Self {
            num_players: 4,
            flor_enabled: true,
            real_envido_multiple: false,
            falta_envido_mode: FaltaEnvidoMode::ToLoser,
            winning_score: 30,
            las_buenas_threshold: 15,
            pica_pica_mode: false,
        }
    }
}

impl GameConfig {
    pub fn traditional() -> Self {
        Self::default()
    }

    /// Head-to-head game, Flor off.
    pub fn two_player() -> Self {
        Self {
            num_players: 2,
            flor_enabled: false,
            ..Self::default()
        }
    }

    /// Short game to 15 points.
    pub fn quick() -> Self {
        Self {
            winning_score: 15,
            las_buenas_threshold: 8,
            ..Self::default()
        }
    }

    /// Real Envido callable multiple times per chain.
    pub fn flexible_envido() -> Self {
        Self {
            real_envido_multiple: true,
            ..Self::default()
        }
    }

    /// Falta Envido pays the leader's remaining points.
    pub fn falta_to_leader() -> Self {
        Self {
            falta_envido_mode: FaltaEnvidoMode::ToLeader,
            ..Self::default()
        }
    }

    /// Six players, all individual.
    pub fn pica_pica() -> Self {
        Self {
            num_players: 6,
            pica_pica_mode: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_players != 2 && self.num_players != 4 && self.num_players != 6 {
            return Err(TrucoError::InvalidPlayerCount(self.num_players));
        }
        if self.pica_pica_mode && self.num_players != 6 {
            return Err(TrucoError::PicaPicaRequiresSixPlayers(self.num_players));
        }
        if self.winning_score <= 0 {
            return Err(TrucoError::InvalidWinningScore(self.winning_score));
        }
        if self.las_buenas_threshold < 0 || self.las_buenas_threshold >= self.winning_score {
            return Err(TrucoError::InvalidThreshold {
                threshold: self.las_buenas_threshold,
                winning_score: self.winning_score,
            });
        }
        Ok(())
    }
}
