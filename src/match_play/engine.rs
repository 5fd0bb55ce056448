use chrono::{DateTime, Utc};

use crate::error::ScoringError;
use crate::model::{
    HoleResult, LeadingTeam, MatchFormat, MatchPlayHole, MatchPlayRound, MatchPoints,
    MatchResult, MatchSide, MatchState, MatchStatusInfo, Round, Tour,
};

/// Lower score wins the hole.
#[must_use]
pub fn hole_result(team_a: u8, team_b: u8) -> HoleResult {
    match team_a.cmp(&team_b) {
        std::cmp::Ordering::Less => HoleResult::TeamA,
        std::cmp::Ordering::Greater => HoleResult::TeamB,
        std::cmp::Ordering::Equal => HoleResult::Tie,
    }
}

/// Running status after the given holes. A match is over once the lead is
/// larger than the holes left, or when no holes are left.
#[must_use]
pub fn match_status(holes: &[MatchPlayHole], total_holes: u8) -> MatchStatusInfo {
    let played = u8::try_from(holes.len()).unwrap_or(u8::MAX);
    let remaining = total_holes.saturating_sub(played);
    let a_wins = holes.iter().filter(|h| h.result == HoleResult::TeamA).count();
    let b_wins = holes.iter().filter(|h| h.result == HoleResult::TeamB).count();
    let lead = u8::try_from(a_wins.abs_diff(b_wins)).unwrap_or(u8::MAX);
    let leading_team = match a_wins.cmp(&b_wins) {
        std::cmp::Ordering::Greater => LeadingTeam::TeamA,
        std::cmp::Ordering::Less => LeadingTeam::TeamB,
        std::cmp::Ordering::Equal => LeadingTeam::Tied,
    };
    MatchStatusInfo {
        holes_played: played,
        holes_remaining: remaining,
        lead,
        leading_team,
        is_completed: lead > remaining || remaining == 0,
        can_win: lead <= remaining,
        is_dormie: lead > 0 && lead == remaining,
    }
}

impl MatchStatusInfo {
    /// Scoreboard text: "AS", "2 UP", "Dormie 3 UP" while live; "4&3",
    /// "1 UP" or "Halved" once finished. The side is in `leading_team`.
    #[must_use]
    pub fn display(&self) -> String {
        match (self.is_completed, self.lead) {
            (true, 0) => "Halved".to_string(),
            (true, lead) if self.holes_remaining == 0 => format!("{lead} UP"),
            (true, lead) => format!("{lead}&{}", self.holes_remaining),
            (false, 0) => "AS".to_string(),
            (false, lead) if self.is_dormie => format!("Dormie {lead} UP"),
            (false, lead) => format!("{lead} UP"),
        }
    }

    #[must_use]
    pub fn final_result(&self) -> MatchResult {
        if !self.is_completed {
            return MatchResult::Ongoing;
        }
        match self.leading_team {
            LeadingTeam::TeamA => MatchResult::TeamA,
            LeadingTeam::TeamB => MatchResult::TeamB,
            LeadingTeam::Tied => MatchResult::Tie,
        }
    }
}

/// One point to the winner, a half each for a halved match.
#[must_use]
pub fn points_for(result: MatchResult) -> MatchPoints {
    match result {
        MatchResult::TeamA => MatchPoints {
            team_a: 1.0,
            team_b: 0.0,
        },
        MatchResult::TeamB => MatchPoints {
            team_a: 0.0,
            team_b: 1.0,
        },
        MatchResult::Tie => MatchPoints {
            team_a: 0.5,
            team_b: 0.5,
        },
        MatchResult::Ongoing => MatchPoints::default(),
    }
}

/// Sets up a match between two sides of a round, checking every reference.
///
/// # Errors
/// `UnknownTeam`, `UnknownPlayer`, `PlayerNotInTeam`, `PlayerNotInRound` or
/// `InvalidMatchSide` when the pairing does not fit the tour and format.
pub fn create_match(
    tour: &Tour,
    round: &Round,
    match_id: &str,
    format: MatchFormat,
    team_a: MatchSide,
    team_b: MatchSide,
) -> Result<MatchPlayRound, ScoringError> {
    if team_a.team_id == team_b.team_id {
        return Err(ScoringError::InvalidMatchSide(format!(
            "both sides are team {}",
            team_a.team_id
        )));
    }
    for side in [&team_a, &team_b] {
        validate_side(tour, round, format, side)?;
    }
    if let Some(p) = team_a
        .player_ids
        .iter()
        .find(|p| team_b.player_ids.contains(p))
    {
        return Err(ScoringError::InvalidMatchSide(format!(
            "player {p} is on both sides"
        )));
    }
    let total_holes = u8::try_from(round.hole_count())
        .map_err(|_| ScoringError::InvalidHoleLayout(format!("round {} is too long", round.id)))?;

    Ok(MatchPlayRound {
        id: match_id.to_string(),
        round_id: round.id.clone(),
        format,
        team_a,
        team_b,
        total_holes,
        holes: Vec::new(),
        status: MatchState::InProgress,
        result: MatchResult::Ongoing,
        points: MatchPoints::default(),
        completed_at_hole: None,
        completed_at: None,
    })
}

fn validate_side(
    tour: &Tour,
    round: &Round,
    format: MatchFormat,
    side: &MatchSide,
) -> Result<(), ScoringError> {
    let team = tour
        .team(&side.team_id)
        .ok_or_else(|| ScoringError::UnknownTeam(side.team_id.clone()))?;
    if side.player_ids.len() != format.players_per_side() {
        return Err(ScoringError::InvalidMatchSide(format!(
            "team {} fields {} players, {:?} needs {}",
            side.team_id,
            side.player_ids.len(),
            format,
            format.players_per_side()
        )));
    }
    let shared_card = format == MatchFormat::Foursomes && round.team_score(&team.id).is_some();
    for player_id in &side.player_ids {
        if tour.player(player_id).is_none() {
            return Err(ScoringError::UnknownPlayer(player_id.clone()));
        }
        if !team.player_ids.contains(player_id) {
            return Err(ScoringError::PlayerNotInTeam {
                player_id: player_id.clone(),
                team_id: team.id.clone(),
            });
        }
        if !shared_card && round.score_for(player_id).is_none() {
            return Err(ScoringError::PlayerNotInRound {
                player_id: player_id.clone(),
                round_id: round.id.clone(),
            });
        }
    }
    Ok(())
}

impl MatchPlayRound {
    #[must_use]
    pub fn status(&self) -> MatchStatusInfo {
        match_status(&self.holes, self.total_holes)
    }

    /// Records the next hole. Holes must arrive in order and stop being
    /// accepted the moment the match is decided.
    ///
    /// # Errors
    /// `MatchAlreadyDecided`, `HoleOutOfOrder` or `InvalidStrokes`.
    pub fn record_hole(
        &mut self,
        hole_number: u8,
        team_a_score: u8,
        team_b_score: u8,
        at: Option<DateTime<Utc>>,
    ) -> Result<&MatchPlayHole, ScoringError> {
        if self.is_completed() {
            return Err(ScoringError::MatchAlreadyDecided(self.id.clone()));
        }
        let expected = u8::try_from(self.holes.len() + 1).unwrap_or(u8::MAX);
        if hole_number != expected {
            return Err(ScoringError::HoleOutOfOrder {
                expected,
                got: hole_number,
            });
        }
        for score in [team_a_score, team_b_score] {
            if score == 0 {
                return Err(ScoringError::InvalidStrokes(0));
            }
        }

        self.holes.push(MatchPlayHole {
            hole_number,
            team_a_score,
            team_b_score,
            result: hole_result(team_a_score, team_b_score),
            match_status: None,
        });
        let status = self.status();
        if status.is_completed {
            self.status = MatchState::Completed;
            self.result = status.final_result();
            self.points = points_for(self.result);
            self.completed_at_hole = Some(hole_number);
            self.completed_at = at;
            tracing::info!(
                match_id = %self.id,
                result = ?self.result,
                score = %status.display(),
                hole = hole_number,
                "match decided"
            );
        }
        let last = self.holes.len() - 1;
        self.holes[last].match_status = Some(status);
        Ok(&self.holes[last])
    }
}

/// The side's score on a hole: the single player in singles, the side's one
/// ball in foursomes, the better ball in four-ball.
#[must_use]
pub fn side_hole_score(
    format: MatchFormat,
    side: &MatchSide,
    round: &Round,
    hole_number: u8,
) -> Option<u8> {
    let player_hole = |id: &String| round.score_for(id).and_then(|c| c.hole(hole_number));
    match format {
        MatchFormat::Singles => side.player_ids.first().and_then(player_hole),
        MatchFormat::Foursomes => round
            .team_score(&side.team_id)
            .and_then(|c| c.hole(hole_number))
            .or_else(|| side.player_ids.iter().find_map(player_hole)),
        MatchFormat::FourBall => side.player_ids.iter().filter_map(player_hole).min(),
    }
}

/// Replays the match from the round's cards, starting from a blank match.
/// Replay stops at the first hole either side has not scored, or when the
/// match is decided. `at` stamps a completion that was not already known.
///
/// # Errors
/// `RoundMismatch` when the match belongs to a different round.
pub fn rebuild_from_round(
    current: &MatchPlayRound,
    round: &Round,
    at: Option<DateTime<Utc>>,
) -> Result<MatchPlayRound, ScoringError> {
    if current.round_id != round.id {
        return Err(ScoringError::RoundMismatch {
            expected: current.round_id.clone(),
            got: round.id.clone(),
        });
    }
    let mut fresh = MatchPlayRound {
        holes: Vec::new(),
        status: MatchState::InProgress,
        result: MatchResult::Ongoing,
        points: MatchPoints::default(),
        completed_at_hole: None,
        completed_at: None,
        ..current.clone()
    };
    for hole_number in 1..=current.total_holes {
        if fresh.is_completed() {
            break;
        }
        let a = side_hole_score(current.format, &current.team_a, round, hole_number);
        let b = side_hole_score(current.format, &current.team_b, round, hole_number);
        let (Some(a), Some(b)) = (a, b) else {
            break;
        };
        let stamp = if current.completed_at_hole == Some(hole_number) {
            current.completed_at.or(at)
        } else {
            at
        };
        fresh.record_hole(hole_number, a, b, stamp)?;
    }
    Ok(fresh)
}
