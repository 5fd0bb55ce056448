#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rusty_golf_scoring::model::{
    HoleInfo, MatchFormat, MatchPlayRound, MatchSide, PlayFormat, Player, PlayerScore, Round,
    ScoreEntry, Team, Tour, TourFormat,
};
use rusty_golf_scoring::match_play::create_match;

pub const PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5, 4, 4, 3, 4, 5];
pub const RANKS: [u8; 18] = [7, 1, 17, 11, 3, 9, 15, 5, 13, 8, 18, 2, 12, 4, 10, 16, 6, 14];

pub fn holes18() -> Vec<HoleInfo> {
    PARS.iter()
        .zip(RANKS)
        .enumerate()
        .map(|(i, (&par, rank))| HoleInfo::new(i as u8 + 1, par, Some(rank)))
        .collect()
}

/// Card with the given strokes on the first holes and nothing after.
pub fn card(player_id: &str, strokes: &[u8]) -> PlayerScore {
    let mut c = PlayerScore::new(player_id, 18);
    for (slot, s) in c.strokes.iter_mut().zip(strokes) {
        *slot = Some(*s);
    }
    c
}

/// Card where each played hole is par plus the given offset.
pub fn card_to_par(player_id: &str, offsets: &[i8]) -> PlayerScore {
    let strokes: Vec<u8> = offsets
        .iter()
        .zip(PARS)
        .map(|(o, par)| (i16::from(par) + i16::from(*o)) as u8)
        .collect();
    card(player_id, &strokes)
}

pub fn player(id: &str, handicap: Option<i32>) -> Player {
    Player {
        id: id.to_string(),
        name: format!("Player {id}"),
        handicap,
    }
}

pub fn round_with(id: &str, format: PlayFormat, cards: Vec<PlayerScore>) -> Round {
    let mut round = Round::new(id, &format!("Round {id}"), format, holes18());
    for c in cards {
        round.scores.insert(c.player_id.clone(), c);
    }
    round
}

/// Individual stroke-play tour with one player per card and the given rounds.
pub fn individual_tour(players: Vec<Player>, rounds: Vec<Round>) -> Tour {
    Tour {
        id: "tour".to_string(),
        name: "Club Championship".to_string(),
        format: TourFormat::Individual,
        players,
        teams: vec![],
        rounds,
    }
}

pub fn team(id: &str, players: &[&str]) -> Team {
    Team {
        id: id.to_string(),
        name: id.to_uppercase(),
        player_ids: players.iter().map(|p| p.to_string()).collect(),
        handicap: None,
    }
}

/// Two four-player teams, `eu` (e1..e4) and `us` (u1..u4), with one singles
/// round where everyone has an empty card.
pub fn ryder_tour() -> Tour {
    let eu = ["e1", "e2", "e3", "e4"];
    let us = ["u1", "u2", "u3", "u4"];
    let players = eu.iter().chain(us.iter()).map(|p| player(p, None)).collect();
    let mut round = round_with(
        "singles",
        PlayFormat::MatchPlay,
        eu.iter().chain(us.iter()).map(|p| card(p, &[])).collect(),
    );
    round.team_ids = vec!["eu".to_string(), "us".to_string()];
    Tour {
        id: "cup".to_string(),
        name: "Ryder Cup".to_string(),
        format: TourFormat::RyderCup,
        players,
        teams: vec![team("eu", &eu), team("us", &us)],
        rounds: vec![round],
    }
}

pub fn side(team_id: &str, players: &[&str]) -> MatchSide {
    MatchSide {
        team_id: team_id.to_string(),
        player_ids: players.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn singles(tour: &Tour, id: &str, a: &str, b: &str) -> MatchPlayRound {
    let round = &tour.rounds[0];
    create_match(
        tour,
        round,
        id,
        MatchFormat::Singles,
        side("eu", &[a]),
        side("us", &[b]),
    )
    .expect("valid singles pairing")
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_750_000_000 + secs, 0)
        .single()
        .expect("valid timestamp")
}

pub fn entry(round_id: &str, player_id: &str, hole: i32, strokes: Option<i32>, secs: i64) -> ScoreEntry {
    ScoreEntry {
        round_id: round_id.to_string(),
        player_id: player_id.to_string(),
        hole_number: hole,
        strokes,
        timestamp: at(secs),
    }
}
