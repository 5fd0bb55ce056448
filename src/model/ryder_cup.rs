use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::match_play::{MatchFormat, MatchPlayRound};
use crate::model::types::{MatchId, TeamId, TourId};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RyderCupSession {
    Day1Foursomes,
    Day1Fourball,
    Day2Foursomes,
    Day2Fourball,
    Day3Singles,
}

impl RyderCupSession {
    pub const ALL: [RyderCupSession; 5] = [
        RyderCupSession::Day1Foursomes,
        RyderCupSession::Day1Fourball,
        RyderCupSession::Day2Foursomes,
        RyderCupSession::Day2Fourball,
        RyderCupSession::Day3Singles,
    ];

    #[must_use]
    pub fn match_format(self) -> MatchFormat {
        match self {
            RyderCupSession::Day1Foursomes | RyderCupSession::Day2Foursomes => {
                MatchFormat::Foursomes
            }
            RyderCupSession::Day1Fourball | RyderCupSession::Day2Fourball => MatchFormat::FourBall,
            RyderCupSession::Day3Singles => MatchFormat::Singles,
        }
    }
}

impl fmt::Display for RyderCupSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RyderCupSession::Day1Foursomes => "day1-foursomes",
            RyderCupSession::Day1Fourball => "day1-fourball",
            RyderCupSession::Day2Foursomes => "day2-foursomes",
            RyderCupSession::Day2Fourball => "day2-fourball",
            RyderCupSession::Day3Singles => "day3-singles",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RyderCupTournament {
    pub tour_id: TourId,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub target_points: f64,
    /// Cached totals; always overwritten by a full recompute.
    #[serde(default)]
    pub team_a_points: f64,
    #[serde(default)]
    pub team_b_points: f64,
    #[serde(default)]
    pub matches: Vec<MatchPlayRound>,
    #[serde(default)]
    pub sessions: BTreeMap<RyderCupSession, Vec<MatchId>>,
}

impl RyderCupTournament {
    #[must_use]
    pub fn new(tour_id: &str, team_a_id: &str, team_b_id: &str, target_points: f64) -> Self {
        Self {
            tour_id: tour_id.to_string(),
            team_a_id: team_a_id.to_string(),
            team_b_id: team_b_id.to_string(),
            target_points,
            team_a_points: 0.0,
            team_b_points: 0.0,
            matches: Vec::new(),
            sessions: BTreeMap::new(),
        }
    }

    /// Adds a match and files it under `session`.
    pub fn add_match(&mut self, session: RyderCupSession, m: MatchPlayRound) {
        self.sessions.entry(session).or_default().push(m.id.clone());
        self.matches.push(m);
    }

    #[must_use]
    pub fn find_match(&self, match_id: &str) -> Option<&MatchPlayRound> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Replaces the stored copy of a match. Returns false when the id is unknown.
    pub fn replace_match(&mut self, updated: MatchPlayRound) -> bool {
        match self.matches.iter_mut().find(|m| m.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }
}
