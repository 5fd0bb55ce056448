use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

use super::handicap::net_card;
use super::leaderboard::{LeaderboardOptions, Totals};
use super::sort_utils::{PositionMap, position_change, position_map, rank_by_key};
use crate::error::ScoringError;
use crate::model::{PlayFormat, PlayerScore, Round, Team, TeamId, Tour};

/// Ryder Cup points per team id, as produced by the session aggregator.
pub type TeamPoints = HashMap<TeamId, f64>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeamLeaderboardEntry {
    pub team_id: TeamId,
    pub team_name: String,
    pub position: usize,
    pub total_score: i32,
    pub total_to_par: i32,
    pub net_score: Option<i32>,
    pub net_to_par: Option<i32>,
    pub holes_played: usize,
    pub players_with_scores: usize,
    pub total_players: usize,
    pub ryder_cup_points: Option<f64>,
    pub position_change: Option<i32>,
}

/// Team standings for one round, or across the tour when `round_id` is `None`.
///
/// With `ryder_points` the board is ordered by points (most first); otherwise by
/// net or gross to-par like the individual board.
///
/// # Errors
/// `UnknownRound` for a bad id; allocation errors when handicaps are requested
/// on a course without difficulty ranks.
pub fn team_leaderboard(
    tour: &Tour,
    round_id: Option<&str>,
    options: LeaderboardOptions,
    ryder_points: Option<&TeamPoints>,
    previous: Option<&[TeamLeaderboardEntry]>,
) -> Result<Vec<TeamLeaderboardEntry>, ScoringError> {
    let rounds: Vec<&Round> = match round_id {
        Some(id) => vec![
            tour.round(id)
                .ok_or_else(|| ScoringError::UnknownRound(id.to_string()))?,
        ],
        None => tour
            .rounds
            .iter()
            .filter(|r| r.is_completed() || options.include_in_progress)
            .collect(),
    };

    let teams: Vec<&Team> = match rounds.as_slice() {
        [single] if round_id.is_some() && !single.team_ids.is_empty() => single
            .team_ids
            .iter()
            .map(|id| {
                tour.team(id)
                    .ok_or_else(|| ScoringError::UnknownTeam(id.clone()))
            })
            .collect::<Result<_, _>>()?,
        _ => tour.teams.iter().collect(),
    };

    let mut entries = Vec::with_capacity(teams.len());
    for team in teams {
        let mut totals = Totals::default();
        let mut scored: HashSet<&str> = HashSet::new();
        for round in &rounds {
            add_team_round(&mut totals, &mut scored, team, round, options)?;
        }
        entries.push(TeamLeaderboardEntry {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            position: 0,
            total_score: totals.total_score,
            total_to_par: totals.total_to_par,
            net_score: options.handicapped.then_some(totals.net_score),
            net_to_par: options.handicapped.then_some(totals.net_to_par),
            holes_played: totals.holes_played,
            players_with_scores: scored.len(),
            total_players: team.player_ids.len(),
            ryder_cup_points: ryder_points.map(|p| p.get(&team.id).copied().unwrap_or(0.0)),
            position_change: None,
        });
    }

    let prior: Option<PositionMap> =
        previous.map(|p| position_map(p.iter().map(|e| (e.team_id.as_str(), e.position))));
    let ranked = rank_by_key(entries, |e| match e.ryder_cup_points {
        // points come in halves, so doubling gives an exact integer key
        Some(points) => Some(-((points * 2.0).round() as i64)),
        None => (e.holes_played > 0)
            .then(|| i64::from(e.net_to_par.unwrap_or(e.total_to_par))),
    });
    let board: Vec<TeamLeaderboardEntry> = ranked
        .into_iter()
        .map(|(position, mut e)| {
            e.position = position;
            e.position_change = position_change(prior.as_ref(), &e.team_id, position);
            e
        })
        .collect();
    tracing::debug!(teams = board.len(), rounds = rounds.len(), "team leaderboard recomputed");
    Ok(board)
}

fn add_team_round<'a>(
    totals: &mut Totals,
    scored: &mut HashSet<&'a str>,
    team: &'a Team,
    round: &Round,
    options: LeaderboardOptions,
) -> Result<(), ScoringError> {
    if round.format.has_shared_team_score() {
        if let Some(card) = round.team_score(&team.id) {
            totals.add_card(&handicap_view(card, options), round)?;
            if card.has_scores() {
                scored.extend(team.player_ids.iter().map(String::as_str));
            }
        }
        return Ok(());
    }

    let members: Vec<(&'a str, &PlayerScore)> = team
        .player_ids
        .iter()
        .filter_map(|id| {
            round
                .score_for(id)
                .filter(|c| c.team_id.is_none())
                .map(|c| (id.as_str(), c))
        })
        .collect();
    for (id, card) in &members {
        if card.has_scores() {
            scored.insert(*id);
        }
    }

    if round.format == PlayFormat::BestBall {
        add_best_ball(totals, &members, round, options)
    } else {
        for (_, card) in &members {
            totals.add_card(&handicap_view(card, options), round)?;
        }
        Ok(())
    }
}

/// Per hole, the member with the lowest (net when handicapped) score counts.
fn add_best_ball(
    totals: &mut Totals,
    members: &[(&str, &PlayerScore)],
    round: &Round,
    options: LeaderboardOptions,
) -> Result<(), ScoringError> {
    let nets = members
        .iter()
        .map(|(_, card)| net_card(&handicap_view(card, options), round))
        .collect::<Result<Vec<_>, _>>()?;

    let mut counted = 0;
    for (idx, hole) in round.holes.iter().enumerate() {
        let best = members
            .iter()
            .zip(&nets)
            .filter_map(|((_, card), net)| {
                let gross = i32::from(card.strokes.get(idx).copied().flatten()?);
                let net = net.get(idx).copied().flatten()?;
                Some((net, gross))
            })
            .min();
        if let Some((net, gross)) = best {
            let par = i32::from(hole.par);
            totals.total_score += gross;
            totals.total_to_par += gross - par;
            totals.net_score += net;
            totals.net_to_par += net - par;
            totals.holes_played += 1;
            counted += 1;
        }
    }
    if counted > 0 {
        totals.rounds_played += 1;
    }
    Ok(())
}

fn handicap_view(card: &PlayerScore, options: LeaderboardOptions) -> PlayerScore {
    if options.handicapped {
        card.clone()
    } else {
        PlayerScore {
            handicap_strokes: None,
            ..card.clone()
        }
    }
}

/// Converts per-team points into the lookup used by [`team_leaderboard`].
#[must_use]
pub fn team_points(pairs: &[(TeamId, f64)]) -> TeamPoints {
    let mut points = TeamPoints::new();
    for (team, p) in pairs {
        *points.entry(team.clone()).or_insert(0.0) += p;
    }
    points
}
