use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use super::engine::points_for;
use crate::error::{MembershipProblem, ScoringError};
use crate::model::{MatchPoints, RyderCupSession, RyderCupTournament, TeamId, TourId};
use crate::score::team_leaderboard::{TeamPoints, team_points};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentOutcome {
    Undecided,
    TeamA,
    TeamB,
    Tied,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionStanding {
    pub session: RyderCupSession,
    pub team_a_points: f64,
    pub team_b_points: f64,
    pub matches_completed: usize,
    pub matches_total: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TournamentStanding {
    pub tour_id: TourId,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub team_a_points: f64,
    pub team_b_points: f64,
    pub target_points: f64,
    pub matches_completed: usize,
    pub matches_remaining: usize,
    pub sessions: Vec<SessionStanding>,
    pub outcome: TournamentOutcome,
}

impl TournamentStanding {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.outcome != TournamentOutcome::Undecided
    }

    /// Points keyed by team id, for the team leaderboard.
    #[must_use]
    pub fn team_points(&self) -> TeamPoints {
        team_points(&[
            (self.team_a_id.clone(), self.team_a_points),
            (self.team_b_id.clone(), self.team_b_points),
        ])
    }
}

/// Every match must sit in exactly one session, and sessions may only list
/// matches the tournament holds. Side A of every match belongs to the
/// tournament's team A, and each match is played in its session's format.
///
/// # Errors
/// `SessionMembership`, `SessionTeamMismatch` or `SessionFormatMismatch`
/// naming the offending match.
pub fn validate_sessions(tournament: &RyderCupTournament) -> Result<(), ScoringError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for ids in tournament.sessions.values() {
        for id in ids {
            *seen.entry(id.as_str()).or_insert(0) += 1;
        }
    }
    for ids in tournament.sessions.values() {
        for id in ids {
            if tournament.find_match(id).is_none() {
                return Err(ScoringError::SessionMembership {
                    match_id: id.clone(),
                    problem: MembershipProblem::Unknown,
                });
            }
            if seen.get(id.as_str()).copied().unwrap_or(0) > 1 {
                return Err(ScoringError::SessionMembership {
                    match_id: id.clone(),
                    problem: MembershipProblem::Duplicate,
                });
            }
        }
    }
    for m in &tournament.matches {
        if !seen.contains_key(m.id.as_str()) {
            return Err(ScoringError::SessionMembership {
                match_id: m.id.clone(),
                problem: MembershipProblem::Unassigned,
            });
        }
        if m.team_a.team_id != tournament.team_a_id || m.team_b.team_id != tournament.team_b_id {
            return Err(ScoringError::SessionTeamMismatch {
                match_id: m.id.clone(),
                team_a: m.team_a.team_id.clone(),
                team_b: m.team_b.team_id.clone(),
                expected_a: tournament.team_a_id.clone(),
                expected_b: tournament.team_b_id.clone(),
            });
        }
    }
    for (session, ids) in &tournament.sessions {
        for m in ids.iter().filter_map(|id| tournament.find_match(id)) {
            if m.format != session.match_format() {
                return Err(ScoringError::SessionFormatMismatch {
                    match_id: m.id.clone(),
                    format: m.format,
                    session: *session,
                });
            }
        }
    }
    Ok(())
}

/// Totals the tournament from scratch. Points come from each match's result,
/// so a corrected match can never leave a stale total behind.
///
/// # Errors
/// `InvalidTargetPoints` or a session membership error.
pub fn tournament_standing(
    tournament: &RyderCupTournament,
) -> Result<TournamentStanding, ScoringError> {
    if !tournament.target_points.is_finite() || tournament.target_points <= 0.0 {
        return Err(ScoringError::InvalidTargetPoints(tournament.target_points));
    }
    validate_sessions(tournament)?;

    let mut sessions = Vec::with_capacity(RyderCupSession::ALL.len());
    let mut total = MatchPoints::default();
    let mut completed = 0;
    for session in RyderCupSession::ALL {
        let ids = tournament.sessions.get(&session).map(Vec::as_slice).unwrap_or(&[]);
        let mut standing = SessionStanding {
            session,
            team_a_points: 0.0,
            team_b_points: 0.0,
            matches_completed: 0,
            matches_total: ids.len(),
        };
        for m in ids.iter().filter_map(|id| tournament.find_match(id)) {
            let points = points_for(m.result);
            standing.team_a_points += points.team_a;
            standing.team_b_points += points.team_b;
            if m.is_completed() {
                standing.matches_completed += 1;
            }
        }
        total.team_a += standing.team_a_points;
        total.team_b += standing.team_b_points;
        completed += standing.matches_completed;
        sessions.push(standing);
    }

    let remaining = tournament.matches.len() - completed;
    let outcome = decide(total, remaining, tournament.target_points);
    tracing::debug!(
        tour_id = %tournament.tour_id,
        team_a = total.team_a,
        team_b = total.team_b,
        remaining,
        ?outcome,
        "tournament standing recomputed"
    );
    Ok(TournamentStanding {
        tour_id: tournament.tour_id.clone(),
        team_a_id: tournament.team_a_id.clone(),
        team_b_id: tournament.team_b_id.clone(),
        team_a_points: total.team_a,
        team_b_points: total.team_b,
        target_points: tournament.target_points,
        matches_completed: completed,
        matches_remaining: remaining,
        sessions,
        outcome,
    })
}

/// A side has won once the other side cannot reach the target even by
/// winning every unfinished match.
fn decide(points: MatchPoints, remaining: usize, target: f64) -> TournamentOutcome {
    let open = remaining as f64;
    let a_max = points.team_a + open;
    let b_max = points.team_b + open;
    if b_max < target && points.team_a > b_max {
        return TournamentOutcome::TeamA;
    }
    if a_max < target && points.team_b > a_max {
        return TournamentOutcome::TeamB;
    }
    if remaining == 0 {
        return match points.team_a.partial_cmp(&points.team_b) {
            Some(std::cmp::Ordering::Greater) => TournamentOutcome::TeamA,
            Some(std::cmp::Ordering::Less) => TournamentOutcome::TeamB,
            _ => TournamentOutcome::Tied,
        };
    }
    TournamentOutcome::Undecided
}

/// Rewrites the cached totals on the tournament from a full recompute.
///
/// # Errors
/// See [`tournament_standing`].
pub fn recompute_totals(
    tournament: &mut RyderCupTournament,
) -> Result<TournamentStanding, ScoringError> {
    let standing = tournament_standing(tournament)?;
    if standing.is_decided()
        && (tournament.team_a_points, tournament.team_b_points)
            != (standing.team_a_points, standing.team_b_points)
    {
        tracing::info!(
            tour_id = %tournament.tour_id,
            outcome = ?standing.outcome,
            "tournament decided"
        );
    }
    tournament.team_a_points = standing.team_a_points;
    tournament.team_b_points = standing.team_b_points;
    Ok(standing)
}
