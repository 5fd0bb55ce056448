use serde::{Deserialize, Serialize};

use super::handicap::net_totals;
use super::sort_utils::{PositionMap, position_change, position_map, rank_by_key};
use crate::error::ScoringError;
use crate::model::{PlayerId, PlayerScore, Round, TeamId, Tour};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeaderboardOptions {
    pub handicapped: bool,
    /// Count in-progress rounds in tour-wide totals, not just completed ones.
    #[serde(default)]
    pub include_in_progress: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: Option<TeamId>,
    pub position: usize,
    pub total_score: i32,
    pub total_to_par: i32,
    pub net_score: Option<i32>,
    pub net_to_par: Option<i32>,
    pub holes_played: usize,
    pub rounds_played: usize,
    pub position_change: Option<i32>,
}

impl LeaderboardEntry {
    /// The value the board is sorted by.
    #[must_use]
    pub fn ranking_to_par(&self) -> i32 {
        self.net_to_par.unwrap_or(self.total_to_par)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Totals {
    pub total_score: i32,
    pub total_to_par: i32,
    pub net_score: i32,
    pub net_to_par: i32,
    pub holes_played: usize,
    pub rounds_played: usize,
}

impl Totals {
    pub(crate) fn add_card(&mut self, card: &PlayerScore, round: &Round) -> Result<(), ScoringError> {
        let pars = round.pars();
        let gross = card.total_score();
        let to_par = card.total_to_par(&pars);
        let net = net_totals(card, round)?;
        self.total_score += gross;
        self.total_to_par += to_par;
        self.net_score += net.map_or(gross, |n| n.net_score);
        self.net_to_par += net.map_or(to_par, |n| n.net_to_par);
        let holes = card.holes_played();
        self.holes_played += holes;
        if holes > 0 {
            self.rounds_played += 1;
        }
        Ok(())
    }
}

/// Leaderboard for a single round.
///
/// # Errors
/// `UnknownRound` for a bad id; allocation errors when handicaps are requested
/// on a course without difficulty ranks.
pub fn round_leaderboard(
    tour: &Tour,
    round_id: &str,
    options: LeaderboardOptions,
    previous: Option<&[LeaderboardEntry]>,
) -> Result<Vec<LeaderboardEntry>, ScoringError> {
    let round = tour
        .round(round_id)
        .ok_or_else(|| ScoringError::UnknownRound(round_id.to_string()))?;
    build(tour, &[round], options, previous, |player_id| {
        round.score_for(player_id).is_some_and(|c| c.team_id.is_none())
    })
}

/// Leaderboard across the tour's completed rounds (plus in-progress rounds
/// when `include_in_progress` is set). Every roster player appears.
///
/// # Errors
/// Allocation errors when handicaps are requested on a course without
/// difficulty ranks.
pub fn tour_leaderboard(
    tour: &Tour,
    options: LeaderboardOptions,
    previous: Option<&[LeaderboardEntry]>,
) -> Result<Vec<LeaderboardEntry>, ScoringError> {
    let rounds: Vec<&Round> = tour
        .rounds
        .iter()
        .filter(|r| r.is_completed() || options.include_in_progress)
        .collect();
    build(tour, &rounds, options, previous, |_| true)
}

fn build(
    tour: &Tour,
    rounds: &[&Round],
    options: LeaderboardOptions,
    previous: Option<&[LeaderboardEntry]>,
    include: impl Fn(&str) -> bool,
) -> Result<Vec<LeaderboardEntry>, ScoringError> {
    let mut entries = Vec::new();
    for player in tour.players.iter().filter(|p| include(&p.id)) {
        let mut totals = Totals::default();
        for round in rounds {
            if let Some(card) = round.score_for(&player.id).filter(|c| c.team_id.is_none()) {
                if options.handicapped {
                    totals.add_card(card, round)?;
                } else {
                    totals.add_card(&without_handicap(card), round)?;
                }
            }
        }
        entries.push(LeaderboardEntry {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            team_id: tour.team_of(&player.id).map(|t| t.id.clone()),
            position: 0,
            total_score: totals.total_score,
            total_to_par: totals.total_to_par,
            net_score: options.handicapped.then_some(totals.net_score),
            net_to_par: options.handicapped.then_some(totals.net_to_par),
            holes_played: totals.holes_played,
            rounds_played: totals.rounds_played,
            position_change: None,
        });
    }

    let prior: Option<PositionMap> =
        previous.map(|p| position_map(p.iter().map(|e| (e.player_id.as_str(), e.position))));

    let ranked = rank_by_key(entries, |e| (e.holes_played > 0).then(|| e.ranking_to_par()));
    let board: Vec<LeaderboardEntry> = ranked
        .into_iter()
        .map(|(position, mut e)| {
            e.position = position;
            e.position_change = position_change(prior.as_ref(), &e.player_id, position);
            e
        })
        .collect();
    tracing::debug!(
        players = board.len(),
        rounds = rounds.len(),
        handicapped = options.handicapped,
        "leaderboard recomputed"
    );
    Ok(board)
}

fn without_handicap(card: &PlayerScore) -> PlayerScore {
    PlayerScore {
        handicap_strokes: None,
        ..card.clone()
    }
}
