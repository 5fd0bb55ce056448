use chrono::{DateTime, Utc};

use super::entry::apply_score_entry;
use super::leaderboard::{LeaderboardEntry, LeaderboardOptions, round_leaderboard, tour_leaderboard};
use super::skins::{SkinsResult, skins};
use super::stats::{PlayerStatistics, player_statistics};
use super::team_leaderboard::{TeamLeaderboardEntry, team_leaderboard};
use crate::error::CoreError;
use crate::match_play::{TournamentStanding, rebuild_from_round, recompute_totals, tournament_standing};
use crate::model::{
    MatchPlayRound, MatchStatusInfo, PlayerScore, Round, RyderCupTournament, ScoreEntry, Tour,
};
use crate::storage::{ScoringAuthorizer, Storage};

/// Load the leaderboard for one round.
///
/// # Errors
/// Returns an error if the round cannot be loaded or scored.
pub async fn load_round_leaderboard(
    storage: &dyn Storage,
    round_id: &str,
    options: LeaderboardOptions,
    previous: Option<&[LeaderboardEntry]>,
) -> Result<Vec<LeaderboardEntry>, CoreError> {
    let tour = storage.get_tour_for_round(round_id).await?;
    Ok(round_leaderboard(&tour, round_id, options, previous)?)
}

/// Load the tour-wide individual leaderboard.
///
/// # Errors
/// Returns an error if the tour cannot be loaded or scored.
pub async fn load_tour_leaderboard(
    storage: &dyn Storage,
    tour_id: &str,
    options: LeaderboardOptions,
    previous: Option<&[LeaderboardEntry]>,
) -> Result<Vec<LeaderboardEntry>, CoreError> {
    let tour = storage.get_tour(tour_id).await?;
    Ok(tour_leaderboard(&tour, options, previous)?)
}

/// Load team standings, with Ryder Cup points when the tour has a cup.
///
/// # Errors
/// Returns an error if the tour cannot be loaded or its cup is misconfigured.
pub async fn load_team_leaderboard(
    storage: &dyn Storage,
    tour_id: &str,
    round_id: Option<&str>,
    options: LeaderboardOptions,
    previous: Option<&[TeamLeaderboardEntry]>,
) -> Result<Vec<TeamLeaderboardEntry>, CoreError> {
    let tour = storage.get_tour(tour_id).await?;
    let points = match storage.get_ryder_cup(tour_id).await? {
        Some(cup) => Some(tournament_standing(&cup)?.team_points()),
        None => None,
    };
    Ok(team_leaderboard(
        &tour,
        round_id,
        options,
        points.as_ref(),
        previous,
    )?)
}

/// Current status of a match, recomputed from its recorded holes.
///
/// # Errors
/// Returns an error if the match does not exist.
pub async fn load_match_status(
    storage: &dyn Storage,
    match_id: &str,
) -> Result<MatchStatusInfo, CoreError> {
    Ok(storage.get_match(match_id).await?.status())
}

/// Ryder Cup totals and decided state for a tour.
///
/// # Errors
/// Returns `NotFound` if the tour has no cup, or a scoring error if its
/// session layout is inconsistent.
pub async fn load_tournament_status(
    storage: &dyn Storage,
    tour_id: &str,
) -> Result<TournamentStanding, CoreError> {
    let cup = storage
        .get_ryder_cup(tour_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("ryder cup for tour {tour_id}")))?;
    Ok(tournament_standing(&cup)?)
}

/// # Errors
/// Returns an error if the round or the player's card is missing.
pub async fn load_player_statistics(
    storage: &dyn Storage,
    round_id: &str,
    player_id: &str,
) -> Result<PlayerStatistics, CoreError> {
    let tour = storage.get_tour_for_round(round_id).await?;
    let round = find_round(&tour, round_id)?;
    Ok(player_statistics(round, player_id)?)
}

/// # Errors
/// Returns an error if the round is missing or cannot be scored.
pub async fn load_skins(
    storage: &dyn Storage,
    round_id: &str,
    handicapped: bool,
) -> Result<SkinsResult, CoreError> {
    let tour = storage.get_tour_for_round(round_id).await?;
    let round = find_round(&tour, round_id)?;
    Ok(skins(round, handicapped)?)
}

/// Accept one score entry: check the principal may score the player, rebuild
/// every match on the round and the tour's Ryder Cup totals from the updated
/// card, then write the card, the changed matches and the cup.
///
/// Nothing is written unless every rebuild and recompute succeeds.
///
/// # Errors
/// `Unauthorized`, a scoring error for a rejected entry or a misconfigured
/// cup, or a storage error.
pub async fn record_score(
    storage: &dyn Storage,
    authorizer: &dyn ScoringAuthorizer,
    principal: &str,
    entry: &ScoreEntry,
) -> Result<PlayerScore, CoreError> {
    let tour = storage.get_tour_for_round(&entry.round_id).await?;
    let round = find_round(&tour, &entry.round_id)?;

    if !authorizer
        .scorable_players(principal, round)
        .contains(&entry.player_id)
    {
        tracing::warn!(
            principal,
            player_id = %entry.player_id,
            round_id = %entry.round_id,
            "score entry refused for principal"
        );
        return Err(CoreError::Unauthorized {
            principal: principal.to_string(),
            player_id: entry.player_id.clone(),
        });
    }

    let card = apply_score_entry(round, entry).inspect_err(|e| {
        tracing::warn!(
            player_id = %entry.player_id,
            hole = entry.hole_number,
            error = %e,
            "score entry rejected"
        );
    })?;

    let mut updated = round.clone();
    updated.scores.insert(card.player_id.clone(), card.clone());
    let changed = rebuild_round_matches(storage, &updated, Some(entry.timestamp)).await?;
    let cup = if changed.is_empty() {
        None
    } else {
        recomputed_cup(storage, &tour.id, &changed).await?
    };

    storage.store_player_score(&round.id, &card).await?;
    tracing::info!(
        round_id = %round.id,
        format = %round.format,
        player_id = %card.player_id,
        hole = entry.hole_number,
        strokes = ?entry.strokes,
        "score stored"
    );
    for m in &changed {
        storage.store_match(m).await?;
    }
    if let Some(cup) = cup {
        storage.store_ryder_cup(&cup).await?;
    }
    Ok(card)
}

/// Record a hole result directly on a match, for events that enter match
/// results rather than stroke cards. The match and the cup are only written
/// once the cup recomputes cleanly.
///
/// # Errors
/// Returns an error if the match is missing, the hole is rejected, or the
/// tour's cup cannot be recomputed.
pub async fn record_match_hole(
    storage: &dyn Storage,
    match_id: &str,
    hole_number: u8,
    team_a_score: u8,
    team_b_score: u8,
    at: Option<DateTime<Utc>>,
) -> Result<MatchPlayRound, CoreError> {
    let mut m = storage.get_match(match_id).await?;
    m.record_hole(hole_number, team_a_score, team_b_score, at)?;
    let tour = storage.get_tour_for_round(&m.round_id).await?;
    let cup = recomputed_cup(storage, &tour.id, std::slice::from_ref(&m)).await?;

    storage.store_match(&m).await?;
    if let Some(cup) = cup {
        storage.store_ryder_cup(&cup).await?;
    }
    Ok(m)
}

/// Matches on the round whose replay differs from what storage holds.
async fn rebuild_round_matches(
    storage: &dyn Storage,
    round: &Round,
    at: Option<DateTime<Utc>>,
) -> Result<Vec<MatchPlayRound>, CoreError> {
    let mut changed = Vec::new();
    for current in storage.get_matches_for_round(&round.id).await? {
        let rebuilt = rebuild_from_round(&current, round, at)?;
        if rebuilt != current {
            changed.push(rebuilt);
        }
    }
    Ok(changed)
}

/// The tour's cup with `changed` swapped in and its totals recomputed.
async fn recomputed_cup(
    storage: &dyn Storage,
    tour_id: &str,
    changed: &[MatchPlayRound],
) -> Result<Option<RyderCupTournament>, CoreError> {
    let Some(mut cup) = storage.get_ryder_cup(tour_id).await? else {
        return Ok(None);
    };
    for m in changed {
        cup.replace_match(m.clone());
    }
    recompute_totals(&mut cup)?;
    Ok(Some(cup))
}

fn find_round<'a>(tour: &'a Tour, round_id: &str) -> Result<&'a Round, CoreError> {
    tour.round(round_id)
        .ok_or_else(|| CoreError::NotFound(format!("round {round_id}")))
}
