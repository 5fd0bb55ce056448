use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{PlayerId, PlayerScore, Round, RoundId, ScoreDisplay};

const MIN_STREAK: usize = 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub eagles_or_better: usize,
    pub birdies: usize,
    pub pars: usize,
    pub bogeys: usize,
    pub double_bogeys_or_worse: usize,
}

impl CategoryCounts {
    fn add(&mut self, to_par: i32) {
        match to_par {
            i32::MIN..=-2 => self.eagles_or_better += 1,
            -1 => self.birdies += 1,
            0 => self.pars += 1,
            1 => self.bogeys += 1,
            _ => self.double_bogeys_or_worse += 1,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StreakKind {
    Birdie,
    Par,
    Bogey,
    UnderPar,
    OverPar,
    None,
}

impl StreakKind {
    fn matches(self, to_par: i32) -> bool {
        match self {
            StreakKind::Birdie => to_par == -1,
            StreakKind::Par => to_par == 0,
            StreakKind::Bogey => to_par == 1,
            StreakKind::UnderPar => to_par < 0,
            StreakKind::OverPar => to_par > 0,
            StreakKind::None => false,
        }
    }

    /// Kinds a hole belongs to, exact kinds first.
    fn candidates(to_par: i32) -> Vec<StreakKind> {
        let mut kinds = Vec::with_capacity(2);
        match to_par {
            -1 => kinds.push(StreakKind::Birdie),
            0 => kinds.push(StreakKind::Par),
            1 => kinds.push(StreakKind::Bogey),
            _ => {}
        }
        if to_par < 0 {
            kinds.push(StreakKind::UnderPar);
        } else if to_par > 0 {
            kinds.push(StreakKind::OverPar);
        }
        kinds
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: usize,
}

impl Streak {
    const NONE: Streak = Streak {
        kind: StreakKind::None,
        length: 0,
    };
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoleHighlight {
    pub hole_number: u8,
    pub strokes: u8,
    pub to_par: i32,
    pub display: ScoreDisplay,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NineSummary {
    pub score: i32,
    pub to_par: i32,
    pub holes_played: usize,
    pub counts: CategoryCounts,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatistics {
    pub player_id: PlayerId,
    pub round_id: RoundId,
    pub holes_played: usize,
    pub counts: CategoryCounts,
    pub best_hole: Option<HoleHighlight>,
    pub worst_hole: Option<HoleHighlight>,
    pub current_streak: Streak,
    pub front_nine: NineSummary,
    /// Absent for rounds of nine holes or fewer.
    pub back_nine: Option<NineSummary>,
}

/// Statistics for one player's card in a round.
///
/// # Errors
/// `PlayerNotInRound` when the player has no card.
pub fn player_statistics(round: &Round, player_id: &str) -> Result<PlayerStatistics, ScoringError> {
    let card = round
        .score_for(player_id)
        .ok_or_else(|| ScoringError::PlayerNotInRound {
            player_id: player_id.to_string(),
            round_id: round.id.clone(),
        })?;
    Ok(card_statistics(card, round))
}

#[must_use]
pub fn card_statistics(card: &PlayerScore, round: &Round) -> PlayerStatistics {
    // (hole number, strokes, to par) in hole order; None for unplayed holes
    let holes: Vec<Option<(u8, u8, i32)>> = round
        .holes
        .iter()
        .enumerate()
        .map(|(idx, hole)| {
            let strokes = card.strokes.get(idx).copied().flatten()?;
            Some((hole.number, strokes, i32::from(strokes) - i32::from(hole.par)))
        })
        .collect();

    let mut counts = CategoryCounts::default();
    let mut best: Option<HoleHighlight> = None;
    let mut worst: Option<HoleHighlight> = None;
    for &(number, strokes, to_par) in holes.iter().flatten() {
        counts.add(to_par);
        let highlight = HoleHighlight {
            hole_number: number,
            strokes,
            to_par,
            display: ScoreDisplay::from_to_par(to_par),
        };
        // strict comparisons keep the earliest hole on ties
        if best.is_none_or(|b| to_par < b.to_par) {
            best = Some(highlight);
        }
        if worst.is_none_or(|w| to_par > w.to_par) {
            worst = Some(highlight);
        }
    }

    let split = holes.len().min(9);
    PlayerStatistics {
        player_id: card.player_id.clone(),
        round_id: round.id.clone(),
        holes_played: card.holes_played(),
        counts,
        best_hole: best,
        worst_hole: worst,
        current_streak: current_streak(&holes),
        front_nine: nine_summary(&holes[..split]),
        back_nine: (holes.len() > 9).then(|| nine_summary(&holes[split..])),
    }
}

fn nine_summary(holes: &[Option<(u8, u8, i32)>]) -> NineSummary {
    let mut summary = NineSummary::default();
    for &(_, strokes, to_par) in holes.iter().flatten() {
        summary.score += i32::from(strokes);
        summary.to_par += to_par;
        summary.holes_played += 1;
        summary.counts.add(to_par);
    }
    summary
}

/// Longest run of one kind ending at the last played hole. A run stops at an
/// unplayed hole. Runs shorter than two holes are not streaks.
fn current_streak(holes: &[Option<(u8, u8, i32)>]) -> Streak {
    let Some(last) = holes.iter().rposition(Option::is_some) else {
        return Streak::NONE;
    };
    let Some((_, _, last_to_par)) = holes[last] else {
        return Streak::NONE;
    };

    let mut streak = Streak::NONE;
    for kind in StreakKind::candidates(last_to_par) {
        let length = holes[..=last]
            .iter()
            .rev()
            .take_while(|h| h.is_some_and(|(_, _, to_par)| kind.matches(to_par)))
            .count();
        if length > streak.length {
            streak = Streak { kind, length };
        }
    }
    if streak.length < MIN_STREAK {
        Streak::NONE
    } else {
        streak
    }
}
