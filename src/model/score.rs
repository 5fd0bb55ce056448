use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::types::{PlayerId, RoundId, TeamId};

/// Hole-by-hole card for one player (or one team ball) in a round. Totals are
/// always derived from `strokes`; nothing else stores them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    /// Set when this card is a team's shared ball.
    #[serde(default)]
    pub team_id: Option<TeamId>,
    /// One slot per hole; `None` means not yet played.
    pub strokes: Vec<Option<u8>>,
    /// Playing handicap for this round, when handicaps apply.
    #[serde(default)]
    pub handicap_strokes: Option<i32>,
}

impl PlayerScore {
    #[must_use]
    pub fn new(player_id: &str, hole_count: usize) -> Self {
        Self {
            player_id: player_id.to_string(),
            team_id: None,
            strokes: vec![None; hole_count],
            handicap_strokes: None,
        }
    }

    #[must_use]
    pub fn for_team(player_id: &str, team_id: &str, hole_count: usize) -> Self {
        Self {
            team_id: Some(team_id.to_string()),
            ..Self::new(player_id, hole_count)
        }
    }

    #[must_use]
    pub fn with_handicap(mut self, handicap: i32) -> Self {
        self.handicap_strokes = Some(handicap);
        self
    }

    /// Strokes on a 1-based hole, if recorded.
    #[must_use]
    pub fn hole(&self, hole_number: u8) -> Option<u8> {
        let idx = usize::from(hole_number).checked_sub(1)?;
        self.strokes.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn holes_played(&self) -> usize {
        self.strokes.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn has_scores(&self) -> bool {
        self.strokes.iter().any(Option::is_some)
    }

    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.strokes.iter().flatten().map(|&s| i32::from(s)).sum()
    }

    /// Total minus par, counting par only for holes with a recorded score.
    #[must_use]
    pub fn total_to_par(&self, pars: &[u8]) -> i32 {
        self.strokes
            .iter()
            .zip(pars)
            .filter_map(|(s, &par)| s.map(|s| i32::from(s) - i32::from(par)))
            .sum()
    }

    /// Sum of par over the recorded holes only.
    #[must_use]
    pub fn par_played(&self, pars: &[u8]) -> i32 {
        self.strokes
            .iter()
            .zip(pars)
            .filter(|(s, _)| s.is_some())
            .map(|(_, &par)| i32::from(par))
            .sum()
    }

    pub(crate) fn set_hole(&mut self, hole_number: u8, strokes: Option<u8>) {
        let idx = usize::from(hole_number) - 1;
        if idx >= self.strokes.len() {
            self.strokes.resize(idx + 1, None);
        }
        self.strokes[idx] = strokes;
    }
}

/// A single write from the sync layer. `strokes: None` clears the hole.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    pub hole_number: i32,
    pub strokes: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreDisplay {
    DoubleCondor,
    Condor,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    QuadrupleBogey,
    QuintupleBogey,
    SextupleBogey,
    SeptupleBogey,
    OctupleBogey,
    NonupleBogey,
    DodecupleBogey,
}

impl ScoreDisplay {
    /// Classifies a hole by strokes relative to par.
    #[must_use]
    pub fn from_to_par(to_par: i32) -> Self {
        match to_par {
            i32::MIN..=-5 => Self::DoubleCondor,
            -4 => Self::Condor,
            -3 => Self::Albatross,
            -2 => Self::Eagle,
            -1 => Self::Birdie,
            0 => Self::Par,
            1 => Self::Bogey,
            2 => Self::DoubleBogey,
            3 => Self::TripleBogey,
            4 => Self::QuadrupleBogey,
            5 => Self::QuintupleBogey,
            6 => Self::SextupleBogey,
            7 => Self::SeptupleBogey,
            8 => Self::OctupleBogey,
            9 => Self::NonupleBogey,
            _ => Self::DodecupleBogey,
        }
    }
}
