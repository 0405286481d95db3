/*
The three escalating bet ladders and their state machine.

Truco raises the value of the hand's tricks; Envido and Flor are side
bets settled before the first card is played. Each family keeps its own
chronological list of bets; only the newest entry of a list may be
pending. The `can_call_*` predicates answer rule questions with plain
booleans so an orchestrator can reject a player action without touching
engine state.
*/

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{FaltaEnvidoMode, GameConfig};
use crate::players::{PlayerId, TeamId};
use crate::tricks::GamePhase;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum TrucoBet {
    Truco,
    Retruco,
    ValeCuatro,
}

impl TrucoBet {
    /// Hand value when the bet is accepted.
    pub fn points(&self) -> i32 {
        match self {
            TrucoBet::Truco => 2,
            TrucoBet::Retruco => 3,
            TrucoBet::ValeCuatro => 4,
        }
    }

    /// Points the caller's side collects when the bet is declined: the
    /// value the hand already had, one less than the accept value.
    pub fn decline_points(&self) -> i32 {
        self.points() - 1
    }

    /// The next rung of the ladder, if any.
    pub fn next(&self) -> Option<TrucoBet> {
        match self {
            TrucoBet::Truco => Some(TrucoBet::Retruco),
            TrucoBet::Retruco => Some(TrucoBet::ValeCuatro),
            TrucoBet::ValeCuatro => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum EnvidoBet {
    Envido,
    EnvidoEnvido,
    RealEnvido,
    FaltaEnvido,
}

impl EnvidoBet {
    /// Points this bet adds to the Envido chain. Falta Envido is score
    /// dependent and reported as -1; see [`falta_envido_points`].
    pub fn chain_points(&self) -> i32 {
        match self {
            EnvidoBet::Envido => 2,
            EnvidoBet::EnvidoEnvido => 2,
            EnvidoBet::RealEnvido => 3,
            EnvidoBet::FaltaEnvido => -1,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum FlorBet {
    Flor,
    ContraFlor,
    ContraFlorAlResto,
}

impl FlorBet {
    /// Points for a declined Flor bet. Contra Flor al Resto is worth the
    /// loser's remaining points and is reported as -1; the orchestrator
    /// resolves it with [`falta_envido_points`].
    pub fn decline_points(&self) -> i32 {
        match self {
            FlorBet::Flor => 3,
            FlorBet::ContraFlor => 6,
            FlorBet::ContraFlorAlResto => -1,
        }
    }
}

/// A bet is exactly one rung of exactly one family's ladder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BetType {
    Truco(TrucoBet),
    Envido(EnvidoBet),
    Flor(FlorBet),
}

impl BetType {
    pub fn as_truco(&self) -> Option<TrucoBet> {
        match self {
            BetType::Truco(bet) => Some(*bet),
            _ => None,
        }
    }

    pub fn as_envido(&self) -> Option<EnvidoBet> {
        match self {
            BetType::Envido(bet) => Some(*bet),
            _ => None,
        }
    }

    pub fn as_flor(&self) -> Option<FlorBet> {
        match self {
            BetType::Flor(bet) => Some(*bet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BetResponse {
    Accept,
    Decline,
    Raise,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BetStatus {
    Pending,
    Accepted,
    Declined,
    Raised,
}

impl From<BetResponse> for BetStatus {
    fn from(response: BetResponse) -> Self {
        match response {
            BetResponse::Accept => BetStatus::Accepted,
            BetResponse::Decline => BetStatus::Declined,
            BetResponse::Raise => BetStatus::Raised,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub bet_type: BetType,
    pub caller_id: PlayerId,
    pub caller_team_id: TeamId,
    pub points_at_stake: i32,
    pub status: BetStatus,
    pub responder_id: Option<PlayerId>,
    pub response: Option<BetResponse>,
}

impl Bet {
    pub fn new(
        bet_type: BetType,
        caller_id: PlayerId,
        caller_team_id: TeamId,
        points_at_stake: i32,
    ) -> Self {
        Self {
            bet_type,
            caller_id,
            caller_team_id,
            points_at_stake,
            status: BetStatus::Pending,
            responder_id: None,
            response: None,
        }
    }

    /// A new bet recording `responder_id`'s answer.
    pub fn answered(&self, response: BetResponse, responder_id: PlayerId) -> Bet {
        trace!(bet_type = ?self.bet_type, response = ?response, "bet answered");
        Bet {
            status: response.into(),
            responder_id: Some(responder_id),
            response: Some(response),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BettingState {
    pub truco_bets: Vec<Bet>,
    pub envido_bets: Vec<Bet>,
    pub flor_bets: Vec<Bet>,
    pub current_truco_value: i32,
    pub envido_resolved: bool,
    pub flor_resolved: bool,
}

impl Default for BettingState {
    fn default() -> Self {
        Self {
            truco_bets: vec![],
            envido_bets: vec![],
            flor_bets: vec![],
            current_truco_value: 1,
            envido_resolved: false,
            flor_resolved: false,
        }
    }
}

impl BettingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bet` to its family's chain.
    pub fn with_bet(&self, bet: Bet) -> BettingState {
        trace!(bet_type = ?bet.bet_type, caller = %bet.caller_id, "bet added");
        let mut state = self.clone();
        match bet.bet_type {
            BetType::Truco(_) => state.truco_bets.push(bet),
            BetType::Envido(_) => state.envido_bets.push(bet),
            BetType::Flor(_) => state.flor_bets.push(bet),
        }
        state
    }

    /// Replace the newest bet of its family, recording a response.
    pub fn with_last_bet_answered(&self, response: BetResponse, responder_id: PlayerId, bet_type: BetType) -> BettingState {
        let mut state = self.clone();
        let bets = match bet_type {
            BetType::Truco(_) => &mut state.truco_bets,
            BetType::Envido(_) => &mut state.envido_bets,
            BetType::Flor(_) => &mut state.flor_bets,
        };
        if let Some(last) = bets.last_mut() {
            *last = last.answered(response, responder_id);
        }
        state
    }

    pub fn with_truco_value(&self, value: i32) -> BettingState {
        BettingState {
            current_truco_value: value,
            ..self.clone()
        }
    }

    pub fn with_envido_resolved(&self) -> BettingState {
        BettingState {
            envido_resolved: true,
            ..self.clone()
        }
    }

    pub fn with_flor_resolved(&self) -> BettingState {
        BettingState {
            flor_resolved: true,
            ..self.clone()
        }
    }

    pub fn last_truco_bet(&self) -> Option<&Bet> {
        self.truco_bets.last()
    }

    pub fn last_envido_bet(&self) -> Option<&Bet> {
        self.envido_bets.last()
    }

    pub fn last_flor_bet(&self) -> Option<&Bet> {
        self.flor_bets.last()
    }
}

fn accepted_or_raised(status: BetStatus) -> bool {
    status == BetStatus::Accepted || status == BetStatus::Raised
}

/// May `bet` be called on the Truco ladder right now?
pub fn can_call_truco_bet(state: &BettingState, bet: TrucoBet) -> bool {
    let last = state.last_truco_bet();
    match bet {
        // First call, or a re-call after the previous one was answered
        TrucoBet::Truco => last.map_or(true, |b| b.status != BetStatus::Pending),
        TrucoBet::Retruco => last.map_or(false, |b| {
            b.bet_type.as_truco() == Some(TrucoBet::Truco) && b.status == BetStatus::Accepted
        }),
        TrucoBet::ValeCuatro => last.map_or(false, |b| {
            b.bet_type.as_truco() == Some(TrucoBet::Retruco) && b.status == BetStatus::Accepted
        }),
    }
}

/// May `bet` be called on the Envido ladder right now?
///
/// Envido is only open before the first card of the hand is played and
/// until the chain is resolved.
pub fn can_call_envido_bet(
    state: &BettingState,
    bet: EnvidoBet,
    phase: GamePhase,
    config: &GameConfig,
) -> bool {
    if phase != GamePhase::Betting && phase != GamePhase::Dealing {
        return false;
    }
    if state.envido_resolved {
        return false;
    }

    let last = state.last_envido_bet();
    match bet {
        EnvidoBet::Envido => last.map_or(true, |b| b.status != BetStatus::Pending),
        EnvidoBet::EnvidoEnvido => last.map_or(false, |b| {
            b.bet_type.as_envido() == Some(EnvidoBet::Envido) && accepted_or_raised(b.status)
        }),
        EnvidoBet::RealEnvido => {
            if config.real_envido_multiple {
                last.map_or(false, |b| b.status != BetStatus::Pending)
            } else {
                last.map_or(false, |b| {
                    matches!(
                        b.bet_type.as_envido(),
                        Some(EnvidoBet::Envido) | Some(EnvidoBet::EnvidoEnvido)
                    ) && accepted_or_raised(b.status)
                })
            }
        }
        EnvidoBet::FaltaEnvido => last.map_or(false, |b| accepted_or_raised(b.status)),
    }
}

/// May `bet` be called on the Flor ladder right now?
///
/// Flor and Contra Flor both require the caller to actually hold three
/// cards of one suit; pass that fact as `player_has_flor`.
pub fn can_call_flor_bet(
    state: &BettingState,
    bet: FlorBet,
    phase: GamePhase,
    player_has_flor: bool,
    config: &GameConfig,
) -> bool {
    if !config.flor_enabled {
        return false;
    }
    if phase != GamePhase::Betting && phase != GamePhase::Dealing {
        return false;
    }
    if state.flor_resolved {
        return false;
    }

    let last = state.last_flor_bet();
    match bet {
        // No re-calling Flor, even after a decline
        FlorBet::Flor => player_has_flor && state.flor_bets.is_empty(),
        FlorBet::ContraFlor => {
            player_has_flor
                && last.map_or(false, |b| {
                    b.bet_type.as_flor() == Some(FlorBet::Flor) && b.status == BetStatus::Pending
                })
        }
        FlorBet::ContraFlorAlResto => last.map_or(false, |b| {
            b.bet_type.as_flor() == Some(FlorBet::ContraFlor) && b.status == BetStatus::Accepted
        }),
    }
}

/// May `player_id` answer the newest bet of `bet_type`'s family?
pub fn can_respond_to_bet(
    state: &BettingState,
    bet_type: BetType,
    player_id: &str,
    original_caller_id: &str,
) -> bool {
    if player_id == original_caller_id {
        return false;
    }
    let last = match bet_type {
        BetType::Truco(_) => state.last_truco_bet(),
        BetType::Envido(_) => state.last_envido_bet(),
        BetType::Flor(_) => state.last_flor_bet(),
    };
    last.map_or(false, |b| b.status == BetStatus::Pending)
}

/// Points the caller's side collects when `bet_type` is declined.
///
/// Truco pays the hand's previous value. Envido pays the chain as it
/// stood before the declined bet, minimum 1 once any bet exists. Flor
/// pays 3 or 6; a declined Contra Flor al Resto is score dependent and
/// reported as -1 for the orchestrator to settle via
/// [`falta_envido_points`].
pub fn decline_points(bet_type: BetType, state: &BettingState) -> i32 {
    match bet_type {
        BetType::Truco(bet) => bet.decline_points(),
        BetType::Envido(_) => {
            if state.envido_bets.is_empty() {
                return 0;
            }
            let total: i32 = state.envido_bets[..state.envido_bets.len() - 1]
                .iter()
                .filter_map(|b| b.bet_type.as_envido())
                .map(|b| b.chain_points())
                .filter(|points| *points > 0)
                .sum();
            if total == 0 {
                1
            } else {
                total
            }
        }
        BetType::Flor(bet) => bet.decline_points(),
    }
}

/// Total points at stake across every bet in the Envido chain.
pub fn envido_chain_points(state: &BettingState) -> i32 {
    state
        .envido_bets
        .iter()
        .filter_map(|b| b.bet_type.as_envido())
        .map(|b| b.chain_points())
        .filter(|points| *points > 0)
        .sum()
}

/// The next Truco bet available after `current`, if the ladder has one.
pub fn next_truco_bet(current: Option<TrucoBet>) -> Option<TrucoBet> {
    match current {
        None => Some(TrucoBet::Truco),
        Some(bet) => bet.next(),
    }
}

/// Value of a Falta Envido (or a declined Contra Flor al Resto) given
/// both team scores.
///
/// In `ToLoser` mode the bet pays the trailing team's remaining points
/// while the leader is still in Las Malas, and the leader's remaining
/// points once they reach Las Buenas. `ToLeader` mode always pays the
/// leader's remaining points.
pub fn falta_envido_points(team1_score: i32, team2_score: i32, config: &GameConfig) -> i32 {
    let leader = team1_score.max(team2_score);
    let trailer = team1_score.min(team2_score);
    let points = match config.falta_envido_mode {
        FaltaEnvidoMode::ToLeader => config.winning_score - leader,
        FaltaEnvidoMode::ToLoser => {
            if leader < config.las_buenas_threshold {
                config.winning_score - trailer
            } else {
                config.winning_score - leader
            }
        }
    };
    debug!(team1_score, team2_score, points, "falta envido valued");
    points
}
