use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::score::PlayerScore;

pub type PlayerId = String;
pub type TeamId = String;
pub type RoundId = String;
pub type TourId = String;
pub type MatchId = String;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TourFormat {
    Individual,
    Team,
    RyderCup,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlayFormat {
    StrokePlay,
    MatchPlay,
    Foursomes,
    FourBall,
    Scramble,
    BestBall,
    AlternateShot,
    Skins,
}

impl PlayFormat {
    /// Formats where a team records one ball, and therefore one PlayerScore,
    /// per hole.
    #[must_use]
    pub fn has_shared_team_score(self) -> bool {
        matches!(
            self,
            PlayFormat::Scramble | PlayFormat::AlternateShot | PlayFormat::Foursomes
        )
    }
}

impl fmt::Display for PlayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayFormat::StrokePlay => "stroke play",
            PlayFormat::MatchPlay => "match play",
            PlayFormat::Foursomes => "foursomes",
            PlayFormat::FourBall => "four-ball",
            PlayFormat::Scramble => "scramble",
            PlayFormat::BestBall => "best ball",
            PlayFormat::AlternateShot => "alternate shot",
            PlayFormat::Skins => "skins",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    #[default]
    Created,
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialCompetition {
    ClosestToPin,
    LongestDrive,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HoleInfo {
    pub number: u8,
    pub par: u8,
    #[serde(default)]
    pub yardage: Option<u32>,
    /// Stroke index, 1 = hardest hole on the course.
    #[serde(default)]
    pub handicap_rank: Option<u8>,
    #[serde(default)]
    pub competitions: Vec<SpecialCompetition>,
}

impl HoleInfo {
    #[must_use]
    pub fn new(number: u8, par: u8, handicap_rank: Option<u8>) -> Self {
        Self {
            number,
            par,
            yardage: None,
            handicap_rank,
            competitions: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Course handicap. Negative for plus players.
    #[serde(default)]
    pub handicap: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub player_ids: Vec<PlayerId>,
    /// Handicap used for shared-ball formats.
    #[serde(default)]
    pub handicap: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Round {
    pub id: RoundId,
    pub name: String,
    pub format: PlayFormat,
    pub holes: Vec<HoleInfo>,
    #[serde(default)]
    pub status: RoundStatus,
    /// Teams competing in this round, for team and Ryder Cup tours.
    #[serde(default)]
    pub team_ids: Vec<TeamId>,
    #[serde(default)]
    pub scores: BTreeMap<PlayerId, PlayerScore>,
}

impl Round {
    #[must_use]
    pub fn new(id: &str, name: &str, format: PlayFormat, holes: Vec<HoleInfo>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            format,
            holes,
            status: RoundStatus::Created,
            team_ids: Vec::new(),
            scores: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn pars(&self) -> Vec<u8> {
        self.holes.iter().map(|h| h.par).collect()
    }

    #[must_use]
    pub fn score_for(&self, player_id: &str) -> Option<&PlayerScore> {
        self.scores.get(player_id)
    }

    /// Shared score recorded for a team, for scramble-style formats.
    #[must_use]
    pub fn team_score(&self, team_id: &str) -> Option<&PlayerScore> {
        self.scores
            .values()
            .find(|s| s.team_id.as_deref() == Some(team_id))
    }

    pub fn start(&mut self) {
        if self.status == RoundStatus::Created {
            self.status = RoundStatus::InProgress;
        }
    }

    pub fn complete(&mut self) {
        self.status = RoundStatus::Completed;
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub format: TourFormat,
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Tour {
    #[must_use]
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    #[must_use]
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    #[must_use]
    pub fn round(&self, round_id: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == round_id)
    }

    pub fn round_mut(&mut self, round_id: &str) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.id == round_id)
    }

    #[must_use]
    pub fn team_of(&self, player_id: &str) -> Option<&Team> {
        self.teams
            .iter()
            .find(|t| t.player_ids.iter().any(|p| p == player_id))
    }
}
