use serde::{Deserialize, Serialize};

use super::handicap::net_card;
use crate::error::ScoringError;
use crate::model::{PlayerId, PlayerScore, Round};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SkinHole {
    pub hole_number: u8,
    /// `None` when the hole was tied and the skin carried over.
    pub winner: Option<PlayerId>,
    pub skins: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SkinsTotal {
    pub player_id: PlayerId,
    pub skins: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SkinsResult {
    pub holes: Vec<SkinHole>,
    pub totals: Vec<SkinsTotal>,
    /// Skins still in the pot after the last decided hole.
    pub carried_over: usize,
}

/// Settles skins hole by hole. A hole counts only once every player has a
/// score on it; the first incomplete hole ends the evaluation.
///
/// # Errors
/// Allocation errors when `handicapped` is set on a course without ranks.
pub fn skins(round: &Round, handicapped: bool) -> Result<SkinsResult, ScoringError> {
    let players: Vec<&PlayerScore> = round.scores.values().filter(|c| c.team_id.is_none()).collect();
    let cards = players
        .iter()
        .map(|card| {
            if handicapped {
                net_card(card, round)
            } else {
                Ok(card.strokes.iter().map(|s| s.map(i32::from)).collect())
            }
        })
        .collect::<Result<Vec<Vec<Option<i32>>>, _>>()?;

    let mut totals: Vec<SkinsTotal> = players
        .iter()
        .map(|c| SkinsTotal {
            player_id: c.player_id.clone(),
            skins: 0,
        })
        .collect();
    let mut holes = Vec::new();
    let mut carry = 0;

    if !players.is_empty() {
        for (idx, hole) in round.holes.iter().enumerate() {
            let Some(scores) = cards
                .iter()
                .map(|c| c.get(idx).copied().flatten())
                .collect::<Option<Vec<i32>>>()
            else {
                break;
            };
            let pot = carry + 1;
            let Some(low) = scores.iter().min().copied() else {
                break;
            };
            let mut lowest = scores.iter().enumerate().filter(|(_, s)| **s == low);
            match (lowest.next(), lowest.next()) {
                (Some((winner, _)), None) => {
                    totals[winner].skins += pot;
                    carry = 0;
                    holes.push(SkinHole {
                        hole_number: hole.number,
                        winner: Some(players[winner].player_id.clone()),
                        skins: pot,
                    });
                }
                _ => {
                    carry = pot;
                    holes.push(SkinHole {
                        hole_number: hole.number,
                        winner: None,
                        skins: 0,
                    });
                }
            }
        }
    }

    Ok(SkinsResult {
        holes,
        totals,
        carried_over: carry,
    })
}
