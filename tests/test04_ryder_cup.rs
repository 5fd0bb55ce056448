mod common;

use rusty_golf_scoring::ScoringError;
use rusty_golf_scoring::match_play::{
    TournamentOutcome, recompute_totals, tournament_standing, validate_sessions,
};
use rusty_golf_scoring::match_play::create_match;
use rusty_golf_scoring::model::{
    MatchFormat, MatchPlayRound, MatchPoints, MatchResult, RyderCupSession, RyderCupTournament,
    Tour,
};

use common::{ryder_tour, side, singles};

/// A singles match played out until one side wins, or halved over 18.
fn played(tour: &Tour, id: &str, result: MatchResult) -> MatchPlayRound {
    play_out(singles(tour, id, "e1", "u1"), result)
}

/// A pairs match in the format the session calls for.
fn played_in(
    tour: &Tour,
    session: RyderCupSession,
    id: &str,
    result: MatchResult,
) -> MatchPlayRound {
    let m = match session.match_format() {
        MatchFormat::Singles => singles(tour, id, "e1", "u1"),
        format => create_match(
            tour,
            &tour.rounds[0],
            id,
            format,
            side("eu", &["e1", "e2"]),
            side("us", &["u1", "u2"]),
        )
        .expect("valid pairs match"),
    };
    play_out(m, result)
}

fn play_out(mut m: MatchPlayRound, result: MatchResult) -> MatchPlayRound {
    for hole in 1..=18u8 {
        if m.is_completed() {
            break;
        }
        let (a, b) = match result {
            MatchResult::TeamA => (3, 4),
            MatchResult::TeamB => (4, 3),
            MatchResult::Tie | MatchResult::Ongoing => (4, 4),
        };
        if result == MatchResult::Ongoing && hole > 5 {
            break;
        }
        m.record_hole(hole, a, b, None).expect("hole accepted");
    }
    m
}

/// 28 matches: 4 in each team session, 12 singles.
fn full_cup(tour: &Tour, results: &[MatchResult]) -> RyderCupTournament {
    let mut cup = RyderCupTournament::new(&tour.id, "eu", "us", 14.5);
    let layout = [
        (RyderCupSession::Day1Foursomes, 4),
        (RyderCupSession::Day1Fourball, 4),
        (RyderCupSession::Day2Foursomes, 4),
        (RyderCupSession::Day2Fourball, 4),
        (RyderCupSession::Day3Singles, 12),
    ];
    let mut i = 0;
    for (session, count) in layout {
        for _ in 0..count {
            let result = results.get(i).copied().unwrap_or(MatchResult::Ongoing);
            cup.add_match(session, played_in(tour, session, &format!("m{i:02}"), result));
            i += 1;
        }
    }
    cup
}

#[test]
fn win_halve_loss_is_level() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let mut cup = RyderCupTournament::new("cup", "eu", "us", 1.5);
    cup.add_match(RyderCupSession::Day3Singles, played(&tour, "a", MatchResult::TeamA));
    cup.add_match(RyderCupSession::Day3Singles, played(&tour, "b", MatchResult::Tie));
    cup.add_match(RyderCupSession::Day3Singles, played(&tour, "c", MatchResult::TeamB));
    let standing = tournament_standing(&cup)?;
    assert_eq!(standing.team_a_points, 1.5);
    assert_eq!(standing.team_b_points, 1.5);
    assert_eq!(standing.matches_remaining, 0);
    assert_eq!(standing.outcome, TournamentOutcome::Tied);
    Ok(())
}

#[test]
fn fourteen_points_is_not_enough() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let results = vec![MatchResult::TeamA; 14];
    let cup = full_cup(&tour, &results);
    let standing = tournament_standing(&cup)?;
    assert_eq!(standing.team_a_points, 14.0);
    assert_eq!(standing.matches_remaining, 14);
    assert_eq!(standing.outcome, TournamentOutcome::Undecided);
    assert!(!standing.is_decided());

    let results = vec![MatchResult::TeamA; 15];
    let standing = tournament_standing(&full_cup(&tour, &results))?;
    assert_eq!(standing.outcome, TournamentOutcome::TeamA);
    assert_eq!(standing.sessions.len(), 5);
    assert_eq!(standing.sessions[4].matches_completed, 0);
    assert_eq!(standing.sessions[3].team_a_points, 3.0);
    Ok(())
}

#[test]
fn points_follow_results_not_cached_fields() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let mut cup = full_cup(&tour, &[MatchResult::TeamB, MatchResult::Tie]);
    cup.matches[0].points = MatchPoints {
        team_a: 7.0,
        team_b: 0.0,
    };
    cup.team_a_points = 99.0;
    let standing = recompute_totals(&mut cup)?;
    assert_eq!(standing.team_a_points, 0.5);
    assert_eq!(standing.team_b_points, 1.5);
    assert_eq!(cup.team_a_points, 0.5);
    assert_eq!(standing.sessions[0].matches_completed, 2);
    assert_eq!(standing.sessions[0].matches_total, 4);
    Ok(())
}

#[test]
fn recompute_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let mut cup = full_cup(&tour, &[MatchResult::TeamA, MatchResult::TeamB, MatchResult::Tie]);
    let first = recompute_totals(&mut cup)?;
    let snapshot = cup.clone();
    let second = recompute_totals(&mut cup)?;
    assert_eq!(first, second);
    assert_eq!(cup, snapshot);
    Ok(())
}

#[test]
fn sessions_must_cover_each_match_once() {
    let tour = ryder_tour();
    let mut cup = RyderCupTournament::new("cup", "eu", "us", 14.5);
    cup.add_match(RyderCupSession::Day3Singles, played(&tour, "a", MatchResult::TeamA));
    cup.sessions
        .entry(RyderCupSession::Day3Singles)
        .or_default()
        .push("ghost".into());
    assert!(matches!(
        validate_sessions(&cup),
        Err(ScoringError::SessionMembership { .. })
    ));
}

#[test]
fn target_must_be_positive() {
    let cup = RyderCupTournament::new("cup", "eu", "us", 0.0);
    assert_eq!(
        tournament_standing(&cup).err(),
        Some(ScoringError::InvalidTargetPoints(0.0))
    );
}

#[test]
fn reversed_pairing_is_rejected() {
    let tour = ryder_tour();
    let mut cup = RyderCupTournament::new("cup", "eu", "us", 14.5);
    let m = create_match(
        &tour,
        &tour.rounds[0],
        "flip",
        MatchFormat::Singles,
        side("us", &["u1"]),
        side("eu", &["e1"]),
    )
    .expect("valid singles pairing");
    cup.add_match(RyderCupSession::Day3Singles, play_out(m, MatchResult::TeamA));
    assert!(matches!(
        tournament_standing(&cup),
        Err(ScoringError::SessionTeamMismatch { ref match_id, .. }) if match_id == "flip"
    ));
    assert!(recompute_totals(&mut cup).is_err());
    assert_eq!(cup.team_a_points, 0.0);
    assert_eq!(cup.team_b_points, 0.0);
}

#[test]
fn session_format_must_match() {
    let tour = ryder_tour();
    let mut cup = RyderCupTournament::new("cup", "eu", "us", 14.5);
    cup.add_match(RyderCupSession::Day1Foursomes, played(&tour, "s1", MatchResult::TeamA));
    assert_eq!(
        validate_sessions(&cup),
        Err(ScoringError::SessionFormatMismatch {
            match_id: "s1".into(),
            format: MatchFormat::Singles,
            session: RyderCupSession::Day1Foursomes,
        })
    );
}
