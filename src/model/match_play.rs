use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::types::{MatchId, PlayerId, RoundId, TeamId};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MatchFormat {
    Singles,
    Foursomes,
    FourBall,
}

impl MatchFormat {
    #[must_use]
    pub fn players_per_side(self) -> usize {
        match self {
            MatchFormat::Singles => 1,
            MatchFormat::Foursomes | MatchFormat::FourBall => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HoleResult {
    TeamA,
    TeamB,
    Tie,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchResult {
    TeamA,
    TeamB,
    Tie,
    #[default]
    Ongoing,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchState {
    #[default]
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LeadingTeam {
    TeamA,
    TeamB,
    Tied,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchSide {
    pub team_id: TeamId,
    pub player_ids: Vec<PlayerId>,
}

/// Running status of a match after some number of holes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchStatusInfo {
    pub holes_played: u8,
    pub holes_remaining: u8,
    pub lead: u8,
    pub leading_team: LeadingTeam,
    pub is_completed: bool,
    /// From the trailing side's perspective.
    pub can_win: bool,
    pub is_dormie: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlayHole {
    pub hole_number: u8,
    pub team_a_score: u8,
    pub team_b_score: u8,
    pub result: HoleResult,
    #[serde(default)]
    pub match_status: Option<MatchStatusInfo>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct MatchPoints {
    pub team_a: f64,
    pub team_b: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlayRound {
    pub id: MatchId,
    pub round_id: RoundId,
    pub format: MatchFormat,
    pub team_a: MatchSide,
    pub team_b: MatchSide,
    pub total_holes: u8,
    #[serde(default)]
    pub holes: Vec<MatchPlayHole>,
    #[serde(default)]
    pub status: MatchState,
    #[serde(default)]
    pub result: MatchResult,
    #[serde(default)]
    pub points: MatchPoints,
    #[serde(default)]
    pub completed_at_hole: Option<u8>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MatchPlayRound {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MatchState::Completed
    }
}
