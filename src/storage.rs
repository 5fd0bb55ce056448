pub mod memory;

use crate::model::{MatchPlayRound, PlayerId, PlayerScore, Round, RyderCupTournament, Tour};
use ahash::HashSet;
use async_trait::async_trait;
use thiserror::Error;

pub use memory::{MemoryStorage, Snapshot};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Backend(String),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::Backend(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::Backend(value.to_string())
    }
}

/// Where tours, matches and Ryder Cup records live. The engine reads whole
/// records and writes back only the records a score entry changed.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_tour(&self, tour_id: &str) -> Result<Tour, StorageError>;
    async fn get_tour_for_round(&self, round_id: &str) -> Result<Tour, StorageError>;
    async fn get_match(&self, match_id: &str) -> Result<MatchPlayRound, StorageError>;
    async fn get_matches_for_round(
        &self,
        round_id: &str,
    ) -> Result<Vec<MatchPlayRound>, StorageError>;
    /// `Ok(None)` when the tour has no Ryder Cup attached.
    async fn get_ryder_cup(&self, tour_id: &str)
    -> Result<Option<RyderCupTournament>, StorageError>;
    async fn store_player_score(
        &self,
        round_id: &str,
        score: &PlayerScore,
    ) -> Result<(), StorageError>;
    async fn store_match(&self, m: &MatchPlayRound) -> Result<(), StorageError>;
    async fn store_ryder_cup(&self, tournament: &RyderCupTournament) -> Result<(), StorageError>;
}

/// Decides which players a principal may enter scores for. The engine only
/// consults it; identity is the caller's problem.
pub trait ScoringAuthorizer: Send + Sync {
    fn scorable_players(&self, principal: &str, round: &Round) -> HashSet<PlayerId>;
}

/// Lets anyone score anyone. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl ScoringAuthorizer for AllowAll {
    fn scorable_players(&self, _principal: &str, round: &Round) -> HashSet<PlayerId> {
        round.scores.keys().cloned().collect()
    }
}

/// A fixed principal -> players table.
#[derive(Debug, Default, Clone)]
pub struct FixedAuthorizer {
    grants: Vec<(String, PlayerId)>,
}

impl FixedAuthorizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grant(mut self, principal: &str, player_id: &str) -> Self {
        self.grants.push((principal.to_string(), player_id.to_string()));
        self
    }
}

impl ScoringAuthorizer for FixedAuthorizer {
    fn scorable_players(&self, principal: &str, round: &Round) -> HashSet<PlayerId> {
        self.grants
            .iter()
            .filter(|(p, player)| p == principal && round.scores.contains_key(player))
            .map(|(_, player)| player.clone())
            .collect()
    }
}
