use crate::error::ScoringError;
use crate::model::{PlayerScore, Round};

/// Spreads a course handicap over holes by difficulty rank (1 = hardest).
///
/// A positive handicap gives strokes to the hardest holes first, wrapping for
/// a second (third, ...) stroke once every hole has one. A negative handicap
/// takes strokes back from the easiest holes first. The result is signed per
/// hole and its absolute values always sum to `|handicap|`.
///
/// # Errors
/// Returns `InvalidHoleHandicaps` if `ranks` is not a permutation of `1..=n`,
/// or `InvalidHandicap` for a handicap with no absolute value in `i32`.
pub fn allocate_strokes(handicap: i32, ranks: &[u8]) -> Result<Vec<i32>, ScoringError> {
    validate_ranks(ranks)?;
    let n = i32::try_from(ranks.len()).map_err(|_| ScoringError::InvalidHoleHandicaps(ranks.len()))?;
    let magnitude = handicap
        .checked_abs()
        .ok_or(ScoringError::InvalidHandicap(handicap))?;
    let base = magnitude / n;
    let extra = magnitude % n;

    Ok(ranks
        .iter()
        .map(|&rank| {
            let rank = i32::from(rank);
            let bonus = if handicap >= 0 {
                rank <= extra
            } else {
                rank > n - extra
            };
            let strokes = base + i32::from(bonus);
            if handicap >= 0 { strokes } else { -strokes }
        })
        .collect())
}

fn validate_ranks(ranks: &[u8]) -> Result<(), ScoringError> {
    let n = ranks.len();
    if n == 0 {
        return Err(ScoringError::InvalidHoleHandicaps(0));
    }
    let mut seen = vec![false; n];
    for &rank in ranks {
        let idx = usize::from(rank);
        if idx == 0 || idx > n || seen[idx - 1] {
            return Err(ScoringError::InvalidHoleHandicaps(n));
        }
        seen[idx - 1] = true;
    }
    Ok(())
}

/// Difficulty ranks for every hole of the round, in hole order.
///
/// # Errors
/// Returns `MissingHoleHandicaps` when any hole lacks a rank.
pub fn hole_ranks(round: &Round) -> Result<Vec<u8>, ScoringError> {
    round
        .holes
        .iter()
        .map(|h| h.handicap_rank)
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| ScoringError::MissingHoleHandicaps(round.id.clone()))
}

/// Per-hole strokes received for a handicap on this round's course.
///
/// # Errors
/// Propagates missing or malformed difficulty ranks.
pub fn round_allocation(round: &Round, handicap: i32) -> Result<Vec<i32>, ScoringError> {
    allocate_strokes(handicap, &hole_ranks(round)?)
}

/// Handicap strokes received on the holes this card has recorded.
/// `None` when the card carries no handicap.
///
/// # Errors
/// Propagates allocation errors.
pub fn strokes_received(score: &PlayerScore, round: &Round) -> Result<Option<i32>, ScoringError> {
    let Some(handicap) = score.handicap_strokes else {
        return Ok(None);
    };
    let allocation = round_allocation(round, handicap)?;
    Ok(Some(
        score
            .strokes
            .iter()
            .zip(&allocation)
            .filter(|(s, _)| s.is_some())
            .map(|(_, &a)| a)
            .sum(),
    ))
}

/// Net strokes per hole; `None` for unplayed holes. Without a handicap the
/// gross strokes are returned unchanged.
///
/// # Errors
/// Propagates allocation errors.
pub fn net_card(score: &PlayerScore, round: &Round) -> Result<Vec<Option<i32>>, ScoringError> {
    let allocation = match score.handicap_strokes {
        Some(h) => round_allocation(round, h)?,
        None => vec![0; round.hole_count()],
    };
    Ok(score
        .strokes
        .iter()
        .enumerate()
        .map(|(i, s)| s.map(|s| i32::from(s) - allocation.get(i).copied().unwrap_or(0)))
        .collect())
}

/// Net score and net-to-par over recorded holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetTotals {
    pub net_score: i32,
    pub net_to_par: i32,
}

/// # Errors
/// Propagates allocation errors.
pub fn net_totals(score: &PlayerScore, round: &Round) -> Result<Option<NetTotals>, ScoringError> {
    let Some(received) = strokes_received(score, round)? else {
        return Ok(None);
    };
    let net_score = score.total_score() - received;
    Ok(Some(NetTotals {
        net_score,
        net_to_par: net_score - score.par_played(&round.pars()),
    }))
}
