use crate::model::{MatchFormat, RyderCupSession};
use crate::storage::StorageError;
use thiserror::Error;

/// Why a Ryder Cup session partition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipProblem {
    /// The match id appears in more than one session (or twice in one).
    Duplicate,
    /// The match exists in the tournament but no session lists it.
    Unassigned,
    /// A session lists a match id the tournament does not contain.
    Unknown,
}

impl std::fmt::Display for MembershipProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MembershipProblem::Duplicate => "assigned to more than one session",
            MembershipProblem::Unassigned => "not assigned to any session",
            MembershipProblem::Unknown => "not part of the tournament",
        };
        write!(f, "{s}")
    }
}

/// Errors raised by the scoring engine itself. Every variant is distinct so
/// callers can tell bad input apart from configuration problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("hole {hole} is outside 1..={holes}")]
    InvalidHoleNumber { hole: i32, holes: usize },
    #[error("stroke count must be positive, got {0}")]
    InvalidStrokes(i32),
    #[error("round {0} is completed and can no longer be scored")]
    RoundCompleted(String),
    #[error("entry targets round {got} but was applied to round {expected}")]
    RoundMismatch { expected: String, got: String },
    #[error("round {0} not found in tour")]
    UnknownRound(String),
    #[error("player {player_id} is not attached to round {round_id}")]
    PlayerNotInRound { player_id: String, round_id: String },
    #[error("player {0} is not on the tour roster")]
    UnknownPlayer(String),
    #[error("team {0} does not exist in the tour")]
    UnknownTeam(String),
    #[error("player {player_id} is not a member of team {team_id}")]
    PlayerNotInTeam { player_id: String, team_id: String },
    #[error("invalid match side: {0}")]
    InvalidMatchSide(String),
    #[error("round {0} has no hole difficulty ranks for handicap allocation")]
    MissingHoleHandicaps(String),
    #[error("hole difficulty ranks are not a permutation of 1..={0}")]
    InvalidHoleHandicaps(usize),
    #[error("invalid hole layout: {0}")]
    InvalidHoleLayout(String),
    #[error("expected hole {expected}, got hole {got}")]
    HoleOutOfOrder { expected: u8, got: u8 },
    #[error("match {0} is already decided")]
    MatchAlreadyDecided(String),
    #[error("match {match_id} is {problem}")]
    SessionMembership {
        match_id: String,
        problem: MembershipProblem,
    },
    #[error("match {match_id} is {team_a} vs {team_b}, expected {expected_a} vs {expected_b}")]
    SessionTeamMismatch {
        match_id: String,
        team_a: String,
        team_b: String,
        expected_a: String,
        expected_b: String,
    },
    #[error("match {match_id} is {format:?} but filed under {session}")]
    SessionFormatMismatch {
        match_id: String,
        format: MatchFormat,
        session: RyderCupSession,
    },
    #[error("target points must be positive, got {0}")]
    InvalidTargetPoints(f64),
    #[error("handicap {0} is out of range")]
    InvalidHandicap(i32),
}

/// Errors surfaced by the query/command layer.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("db error: {0}")]
    Db(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("principal {principal} may not score player {player_id}")]
    Unauthorized {
        principal: String,
        player_id: String,
    },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("{0}")]
    Other(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::NotFound(what),
            StorageError::Invalid(why) => Self::Parse(why),
            other => Self::Db(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for CoreError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
