use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{Storage, StorageError};
use crate::match_play::validate_sessions;
use crate::model::{MatchPlayRound, PlayerScore, RyderCupTournament, Tour};
use crate::score::validate_tour;

/// Everything the engine reads, as one serializable document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub tours: Vec<Tour>,
    /// Matches outside any Ryder Cup.
    #[serde(default)]
    pub matches: Vec<MatchPlayRound>,
    #[serde(default)]
    pub ryder_cups: Vec<RyderCupTournament>,
}

impl Snapshot {
    /// Checks every tour's cross references and every cup's session layout.
    ///
    /// # Errors
    /// `StorageError::Invalid` naming the first tour or cup that fails.
    pub fn validate(&self) -> Result<(), StorageError> {
        for tour in &self.tours {
            validate_tour(tour)
                .map_err(|e| StorageError::Invalid(format!("tour {}: {e}", tour.id)))?;
        }
        for cup in &self.ryder_cups {
            if !self.tours.iter().any(|t| t.id == cup.tour_id) {
                return Err(StorageError::Invalid(format!(
                    "ryder cup for unknown tour {}",
                    cup.tour_id
                )));
            }
            validate_sessions(cup)
                .map_err(|e| StorageError::Invalid(format!("ryder cup {}: {e}", cup.tour_id)))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Snapshot>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Loads a snapshot only after [`Snapshot::validate`] accepts it.
    ///
    /// # Errors
    /// `StorageError::Invalid` for a snapshot with broken references.
    pub fn validated(snapshot: Snapshot) -> Result<Self, StorageError> {
        snapshot.validate()?;
        Ok(Self::new(snapshot))
    }

    /// # Errors
    /// Returns an error if the JSON does not describe a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::validated(snapshot)
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_tour(&self, tour_id: &str) -> Result<Tour, StorageError> {
        let guard = self.inner.read().await;
        guard
            .tours
            .iter()
            .find(|t| t.id == tour_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("tour {tour_id}")))
    }

    async fn get_tour_for_round(&self, round_id: &str) -> Result<Tour, StorageError> {
        let guard = self.inner.read().await;
        guard
            .tours
            .iter()
            .find(|t| t.round(round_id).is_some())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("round {round_id}")))
    }

    async fn get_match(&self, match_id: &str) -> Result<MatchPlayRound, StorageError> {
        let guard = self.inner.read().await;
        guard
            .ryder_cups
            .iter()
            .flat_map(|r| r.matches.iter())
            .chain(guard.matches.iter())
            .find(|m| m.id == match_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("match {match_id}")))
    }

    async fn get_matches_for_round(
        &self,
        round_id: &str,
    ) -> Result<Vec<MatchPlayRound>, StorageError> {
        let guard = self.inner.read().await;
        Ok(guard
            .ryder_cups
            .iter()
            .flat_map(|r| r.matches.iter())
            .chain(guard.matches.iter())
            .filter(|m| m.round_id == round_id)
            .cloned()
            .collect())
    }

    async fn get_ryder_cup(
        &self,
        tour_id: &str,
    ) -> Result<Option<RyderCupTournament>, StorageError> {
        let guard = self.inner.read().await;
        Ok(guard
            .ryder_cups
            .iter()
            .find(|r| r.tour_id == tour_id)
            .cloned())
    }

    async fn store_player_score(
        &self,
        round_id: &str,
        score: &PlayerScore,
    ) -> Result<(), StorageError> {
        let mut guard = self.inner.write().await;
        let round = guard
            .tours
            .iter_mut()
            .find_map(|t| t.round_mut(round_id))
            .ok_or_else(|| StorageError::NotFound(format!("round {round_id}")))?;
        round
            .scores
            .insert(score.player_id.clone(), score.clone());
        if score.has_scores() {
            round.start();
        }
        Ok(())
    }

    async fn store_match(&self, m: &MatchPlayRound) -> Result<(), StorageError> {
        let mut guard = self.inner.write().await;
        for cup in &mut guard.ryder_cups {
            if cup.replace_match(m.clone()) {
                return Ok(());
            }
        }
        match guard.matches.iter().position(|x| x.id == m.id) {
            Some(idx) => guard.matches[idx] = m.clone(),
            None => guard.matches.push(m.clone()),
        }
        Ok(())
    }

    async fn store_ryder_cup(&self, tournament: &RyderCupTournament) -> Result<(), StorageError> {
        let mut guard = self.inner.write().await;
        match guard
            .ryder_cups
            .iter()
            .position(|r| r.tour_id == tournament.tour_id)
        {
            Some(idx) => guard.ryder_cups[idx] = tournament.clone(),
            None => guard.ryder_cups.push(tournament.clone()),
        }
        Ok(())
    }
}
