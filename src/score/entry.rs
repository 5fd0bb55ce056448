use crate::error::ScoringError;
use crate::model::{PlayerScore, Round, RoundStatus, ScoreEntry, Tour};

/// Checks an entry against the round and returns the validated hole number and
/// stroke value. The round is never touched.
///
/// # Errors
/// Rejects a foreign round id, a completed round, a hole outside the round,
/// a non-positive stroke count and a player without a card in the round.
pub fn validate_entry(round: &Round, entry: &ScoreEntry) -> Result<(u8, Option<u8>), ScoringError> {
    if entry.round_id != round.id {
        return Err(ScoringError::RoundMismatch {
            expected: round.id.clone(),
            got: entry.round_id.clone(),
        });
    }
    if round.is_completed() {
        return Err(ScoringError::RoundCompleted(round.id.clone()));
    }
    let holes = round.hole_count();
    let hole = u8::try_from(entry.hole_number)
        .ok()
        .filter(|h| *h >= 1 && usize::from(*h) <= holes)
        .ok_or(ScoringError::InvalidHoleNumber {
            hole: entry.hole_number,
            holes,
        })?;
    let strokes = match entry.strokes {
        None => None,
        Some(s) if s <= 0 => return Err(ScoringError::InvalidStrokes(s)),
        Some(s) => Some(u8::try_from(s).map_err(|_| ScoringError::InvalidStrokes(s))?),
    };
    if !round.scores.contains_key(&entry.player_id) {
        return Err(ScoringError::PlayerNotInRound {
            player_id: entry.player_id.clone(),
            round_id: round.id.clone(),
        });
    }
    Ok((hole, strokes))
}

/// Produces the player's updated card for a single entry.
///
/// # Errors
/// See [`validate_entry`].
pub fn apply_score_entry(round: &Round, entry: &ScoreEntry) -> Result<PlayerScore, ScoringError> {
    let (hole, strokes) = validate_entry(round, entry)?;
    let mut card = round.scores[&entry.player_id].clone();
    card.set_hole(hole, strokes);
    Ok(card)
}

/// Applies a batch of entries, oldest first, and returns the resulting round.
/// Entries with the same timestamp keep their input order, so the last one
/// written wins. Nothing is applied unless every entry is valid.
///
/// # Errors
/// The first invalid entry, see [`validate_entry`].
pub fn apply_score_entries(round: &Round, entries: &[ScoreEntry]) -> Result<Round, ScoringError> {
    let mut validated = entries
        .iter()
        .map(|e| validate_entry(round, e).map(|(hole, strokes)| (e, hole, strokes)))
        .collect::<Result<Vec<_>, _>>()?;
    validated.sort_by_key(|(e, _, _)| e.timestamp);

    let mut updated = round.clone();
    for (entry, hole, strokes) in validated {
        if let Some(card) = updated.scores.get_mut(&entry.player_id) {
            card.set_hole(hole, strokes);
        }
    }
    if !entries.is_empty() {
        updated.start();
    }
    Ok(updated)
}

/// Gives a roster player an empty card on the round.
///
/// # Errors
/// `UnknownPlayer` if the player is not on the tour.
pub fn attach_player(round: &mut Round, tour: &Tour, player_id: &str) -> Result<(), ScoringError> {
    let player = tour
        .player(player_id)
        .ok_or_else(|| ScoringError::UnknownPlayer(player_id.to_string()))?;
    let mut card = PlayerScore::new(player_id, round.hole_count());
    card.handicap_strokes = player.handicap;
    round.scores.entry(player_id.to_string()).or_insert(card);
    Ok(())
}

/// Gives a team one shared card, keyed by the team id.
///
/// # Errors
/// `UnknownTeam` if the team does not exist in the tour.
pub fn attach_team(round: &mut Round, tour: &Tour, team_id: &str) -> Result<(), ScoringError> {
    let team = tour
        .team(team_id)
        .ok_or_else(|| ScoringError::UnknownTeam(team_id.to_string()))?;
    let mut card = PlayerScore::for_team(team_id, team_id, round.hole_count());
    card.handicap_strokes = team.handicap;
    round.scores.entry(team_id.to_string()).or_insert(card);
    if !round.team_ids.iter().any(|t| t == team_id) {
        round.team_ids.push(team_id.to_string());
    }
    Ok(())
}

/// Checks every cross reference in a tour: team rosters, round teams, score
/// cards and hole numbering.
///
/// # Errors
/// The first broken reference found.
pub fn validate_tour(tour: &Tour) -> Result<(), ScoringError> {
    for team in &tour.teams {
        for player_id in &team.player_ids {
            if tour.player(player_id).is_none() {
                return Err(ScoringError::UnknownPlayer(player_id.clone()));
            }
        }
    }
    for round in &tour.rounds {
        validate_round(tour, round)?;
    }
    Ok(())
}

fn validate_round(tour: &Tour, round: &Round) -> Result<(), ScoringError> {
    if round.holes.is_empty() {
        return Err(ScoringError::InvalidHoleLayout(format!(
            "round {} has no holes",
            round.id
        )));
    }
    for (idx, hole) in round.holes.iter().enumerate() {
        if usize::from(hole.number) != idx + 1 || hole.par == 0 {
            return Err(ScoringError::InvalidHoleLayout(format!(
                "round {} hole {} at position {}",
                round.id,
                hole.number,
                idx + 1
            )));
        }
    }
    for team_id in &round.team_ids {
        if tour.team(team_id).is_none() {
            return Err(ScoringError::UnknownTeam(team_id.clone()));
        }
    }
    for (key, card) in &round.scores {
        if card.strokes.len() != round.hole_count() {
            return Err(ScoringError::InvalidHoleLayout(format!(
                "card {key} has {} slots for {} holes",
                card.strokes.len(),
                round.hole_count()
            )));
        }
        match &card.team_id {
            Some(team_id) => {
                let team = tour
                    .team(team_id)
                    .ok_or_else(|| ScoringError::UnknownTeam(team_id.clone()))?;
                if key != team_id && !team.player_ids.contains(key) {
                    return Err(ScoringError::PlayerNotInTeam {
                        player_id: key.clone(),
                        team_id: team_id.clone(),
                    });
                }
            }
            None => {
                if tour.player(key).is_none() {
                    return Err(ScoringError::UnknownPlayer(key.clone()));
                }
            }
        }
    }
    if round.status == RoundStatus::Created && round.scores.values().any(PlayerScore::has_scores) {
        tracing::debug!(round_id = %round.id, "round has scores but was never started");
    }
    Ok(())
}
