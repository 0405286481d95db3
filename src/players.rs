/*
Players, teams, and table setup.

Seats are numbered clockwise; turn order is always "next position mod n".
Standard games have exactly two teams with alternating seats. Pica Pica
(6 players) gives every seat its own single-player team.
*/

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::config::GameConfig;
use crate::error::{Result, TrucoError};

pub type PlayerId = String;
pub type TeamId = String;
/// Seat around the table, 0..=5.
pub type PlayerPosition = usize;

/// The two-team axis used by trick results and Envido/Flor winners.
/// Pica Pica teams beyond the first two are addressed by `TeamId` instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn team_id(&self) -> TeamId {
        match self {
            TeamSide::Team1 => "team-1".to_string(),
            TeamSide::Team2 => "team-2".to_string(),
        }
    }

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub position: PlayerPosition,
    pub hand: Vec<Card>,
    pub is_dealer: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: String, team_id: TeamId, position: PlayerPosition) -> Self {
        Self {
            id,
            name,
            team_id,
            position,
            hand: vec![],
            is_dealer: false,
        }
    }

    pub fn with_hand(&self, hand: Vec<Card>) -> Player {
        Player {
            hand,
            ..self.clone()
        }
    }

    /// Remove the card at `index` from the hand, returning the new player.
    pub fn without_card(&self, index: usize) -> Result<Player> {
        if index >= self.hand.len() {
            return Err(TrucoError::InvalidCardIndex {
                index,
                hand_size: self.hand.len(),
            });
        }
        let mut hand = self.hand.clone();
        hand.remove(index);
        Ok(Player {
            hand,
            ..self.clone()
        })
    }

    pub fn with_dealer(&self, is_dealer: bool) -> Player {
        Player {
            is_dealer,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub player_ids: Vec<PlayerId>,
    pub score: i32,
}

impl Team {
    pub fn new(id: TeamId, name: String, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id,
            name,
            player_ids,
            score: 0,
        }
    }

    pub fn with_score(&self, score: i32) -> Team {
        Team {
            score,
            ..self.clone()
        }
    }

    pub fn with_points_added(&self, points: i32) -> Team {
        Team {
            score: self.score + points,
            ..self.clone()
        }
    }

    pub fn has_won(&self, winning_score: i32) -> bool {
        self.score >= winning_score
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub dealer_position: PlayerPosition,
}

fn player_name(names: &[&str], position: PlayerPosition) -> String {
    match names.get(position) {
        Some(name) if !name.is_empty() => (*name).to_string(),
        _ => format!("Player {}", position + 1),
    }
}

/// Build players and teams for a new game. Position 0 deals first.
///
/// Missing entries in `player_names` default to "Player N" (1-indexed).
pub fn setup_game(config: &GameConfig, player_names: &[&str]) -> Result<GameSetup> {
    config.validate()?;
    let num_players = config.num_players;

    let mut players = Vec::with_capacity(num_players);
    let mut teams;

    if config.pica_pica_mode {
        // Every seat is its own team, named after its player
        teams = Vec::with_capacity(num_players);
        for position in 0..num_players {
            let name = player_name(player_names, position);
            let player_id = format!("player-{}", position);
            let team_id = format!("team-{}", position);
            teams.push(Team::new(team_id.clone(), name.clone(), vec![player_id.clone()]));
            players.push(Player::new(player_id, name, team_id, position));
        }
    } else {
        // Even seats on team 1, odd seats on team 2
        for position in 0..num_players {
            let side = if position % 2 == 0 {
                TeamSide::Team1
            } else {
                TeamSide::Team2
            };
            players.push(Player::new(
                format!("player-{}", position),
                player_name(player_names, position),
                side.team_id(),
                position,
            ));
        }
        teams = vec![
            Team::new(TeamSide::Team1.team_id(), "Team 1".to_string(), vec![]),
            Team::new(TeamSide::Team2.team_id(), "Team 2".to_string(), vec![]),
        ];
        for team in teams.iter_mut() {
            team.player_ids = players
                .iter()
                .filter(|p| p.team_id == team.id)
                .map(|p| p.id.clone())
                .collect();
        }
    }

    let dealer_position: PlayerPosition = 0;
    let dealer = players[dealer_position].with_dealer(true);
    players[dealer_position] = dealer;

    debug!(
        num_players,
        pica_pica = config.pica_pica_mode,
        teams = teams.len(),
        "game set up"
    );
    Ok(GameSetup {
        players,
        teams,
        dealer_position,
    })
}

/// New player list with the dealer button moved one seat on.
pub fn rotate_dealer(players: &[Player], current_dealer_position: PlayerPosition) -> Vec<Player> {
    let next_dealer = (current_dealer_position + 1) % players.len();
    players
        .iter()
        .enumerate()
        .map(|(index, player)| player.with_dealer(index == next_dealer))
        .collect()
}

/// First to play in a hand: the seat after the dealer.
pub fn first_player(dealer_position: PlayerPosition, num_players: usize) -> PlayerPosition {
    (dealer_position + 1) % num_players
}

pub fn next_player(current_position: PlayerPosition, num_players: usize) -> PlayerPosition {
    (current_position + 1) % num_players
}

/// The seat list rotated so play starts at `start_position`.
pub fn players_in_turn_order(players: &[Player], start_position: PlayerPosition) -> Vec<Player> {
    let num_players = players.len();
    (0..num_players)
        .filter_map(|offset| {
            let position = (start_position + offset) % num_players;
            players.iter().find(|p| p.position == position).cloned()
        })
        .collect()
}

pub fn player_at_position(players: &[Player], position: PlayerPosition) -> Result<&Player> {
    players
        .iter()
        .find(|p| p.position == position)
        .ok_or(TrucoError::PlayerNotFound(position))
}

pub fn team_players<'a>(players: &'a [Player], team_id: &str) -> Vec<&'a Player> {
    players.iter().filter(|p| p.team_id == team_id).collect()
}

pub fn player_team<'a>(teams: &'a [Team], player_id: &str) -> Result<&'a Team> {
    teams
        .iter()
        .find(|t| t.player_ids.iter().any(|id| id == player_id))
        .ok_or_else(|| TrucoError::NoTeamForPlayer(player_id.to_string()))
}

/// Every team except `team_id`, in table order. Works for any team count,
/// so it covers Pica Pica as well as standard play.
pub fn opposing_teams<'a>(teams: &'a [Team], team_id: &str) -> Result<Vec<&'a Team>> {
    if !teams.iter().any(|t| t.id == team_id) {
        return Err(TrucoError::TeamNotFound(team_id.to_string()));
    }
    Ok(teams.iter().filter(|t| t.id != team_id).collect())
}

/// Two-team convenience over [`opposing_teams`].
pub fn opposing_team<'a>(teams: &'a [Team], team_id: &str) -> Result<&'a Team> {
    if teams.len() != 2 {
        return Err(TrucoError::NotTwoTeams(teams.len()));
    }
    let opponents = opposing_teams(teams, team_id)?;
    opponents
        .into_iter()
        .next()
        .ok_or_else(|| TrucoError::TeamNotFound(team_id.to_string()))
}
