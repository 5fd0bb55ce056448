mod common;

use rusty_golf_scoring::ScoringError;
use rusty_golf_scoring::match_play::{create_match, rebuild_from_round};
use rusty_golf_scoring::model::{
    LeadingTeam, MatchFormat, MatchResult, MatchState, PlayerScore,
};
use rusty_golf_scoring::score::attach_team;

use common::{at, card, ryder_tour, side, singles};

#[test]
fn four_and_three() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let mut m = singles(&tour, "m1", "e1", "u1");
    // A wins 1-4, halves 5-15
    for hole in 1..=15u8 {
        let (a, b) = if hole <= 4 { (3, 4) } else { (4, 4) };
        m.record_hole(hole, a, b, Some(at(i64::from(hole))))?;
    }
    let status = m.status();
    assert!(status.is_completed);
    assert_eq!(status.display(), "4&3");
    assert_eq!(m.result, MatchResult::TeamA);
    assert_eq!(m.completed_at_hole, Some(15));
    assert_eq!(m.completed_at, Some(at(15)));
    assert_eq!(m.points.team_a, 1.0);
    assert!(matches!(
        m.record_hole(16, 4, 3, None),
        Err(ScoringError::MatchAlreadyDecided(_))
    ));
    Ok(())
}

#[test]
fn dormie_then_halved_on_the_last() -> Result<(), Box<dyn std::error::Error>> {
    let tour = ryder_tour();
    let mut m = singles(&tour, "m1", "e1", "u1");
    m.record_hole(1, 5, 4, None)?;
    for hole in 2..=17u8 {
        m.record_hole(hole, 4, 4, None)?;
    }
    let status = m.status();
    assert!(status.is_dormie);
    assert_eq!(status.leading_team, LeadingTeam::TeamB);
    assert_eq!(status.display(), "Dormie 1 UP");
    assert!(!status.is_completed);

    m.record_hole(18, 3, 4, None)?;
    assert_eq!(m.result, MatchResult::Tie);
    assert_eq!(m.status().display(), "Halved");
    assert_eq!((m.points.team_a, m.points.team_b), (0.5, 0.5));
    Ok(())
}

#[test]
fn holes_must_arrive_in_order() {
    let tour = ryder_tour();
    let mut m = singles(&tour, "m1", "e1", "u1");
    assert_eq!(
        m.record_hole(2, 4, 4, None).err(),
        Some(ScoringError::HoleOutOfOrder {
            expected: 1,
            got: 2
        })
    );
    assert!(m.holes.is_empty());
}

#[test]
fn pairing_is_checked_against_the_tour() {
    let tour = ryder_tour();
    let round = &tour.rounds[0];
    let wrong_team = create_match(
        &tour,
        round,
        "m",
        MatchFormat::Singles,
        side("eu", &["u1"]),
        side("us", &["u2"]),
    );
    assert!(matches!(
        wrong_team,
        Err(ScoringError::PlayerNotInTeam { .. })
    ));

    let short_side = create_match(
        &tour,
        round,
        "m",
        MatchFormat::FourBall,
        side("eu", &["e1"]),
        side("us", &["u1", "u2"]),
    );
    assert!(matches!(short_side, Err(ScoringError::InvalidMatchSide(_))));

    let ghost = create_match(
        &tour,
        round,
        "m",
        MatchFormat::Singles,
        side("eu", &["e1"]),
        side("nobody", &["u1"]),
    );
    assert_eq!(ghost.err(), Some(ScoringError::UnknownTeam("nobody".into())));
}

#[test]
fn four_ball_takes_the_better_ball() -> Result<(), Box<dyn std::error::Error>> {
    let mut tour = ryder_tour();
    let m = create_match(
        &tour,
        &tour.rounds[0],
        "fb",
        MatchFormat::FourBall,
        side("eu", &["e1", "e2"]),
        side("us", &["u1", "u2"]),
    )?;
    let round = &mut tour.rounds[0];
    round.scores.insert("e1".into(), card("e1", &[5, 4, 6]));
    round.scores.insert("e2".into(), card("e2", &[3, 5]));
    round.scores.insert("u1".into(), card("u1", &[4, 4, 3]));
    round.scores.insert("u2".into(), card("u2", &[4, 5, 4]));

    let rebuilt = rebuild_from_round(&m, round, Some(at(0)))?;
    let results: Vec<(u8, u8)> = rebuilt
        .holes
        .iter()
        .map(|h| (h.team_a_score, h.team_b_score))
        .collect();
    // e2 has not finished hole 3 but e1 has, so the side still has a ball
    assert_eq!(results, vec![(3, 4), (4, 4), (6, 3)]);
    assert_eq!(rebuilt.status().display(), "AS");
    Ok(())
}

#[test]
fn foursomes_uses_the_shared_team_card() -> Result<(), Box<dyn std::error::Error>> {
    let mut tour = ryder_tour();
    let mut round = tour.rounds[0].clone();
    attach_team(&mut round, &tour, "eu")?;
    attach_team(&mut round, &tour, "us")?;
    tour.rounds[0] = round;

    let m = create_match(
        &tour,
        &tour.rounds[0],
        "fs",
        MatchFormat::Foursomes,
        side("eu", &["e1", "e2"]),
        side("us", &["u1", "u2"]),
    )?;
    let round = &mut tour.rounds[0];
    let mut eu_card = PlayerScore::for_team("eu", "eu", 18);
    eu_card.strokes[0] = Some(4);
    let mut us_card = PlayerScore::for_team("us", "us", 18);
    us_card.strokes[0] = Some(5);
    round.scores.insert("eu".into(), eu_card);
    round.scores.insert("us".into(), us_card);

    let rebuilt = rebuild_from_round(&m, round, None)?;
    assert_eq!(rebuilt.holes.len(), 1);
    assert_eq!(rebuilt.status().display(), "1 UP");
    assert_eq!(rebuilt.status().leading_team, LeadingTeam::TeamA);
    Ok(())
}

#[test]
fn rebuild_is_idempotent_and_keeps_completion_time() -> Result<(), Box<dyn std::error::Error>> {
    let mut tour = ryder_tour();
    let m = singles(&tour, "m1", "e1", "u1");
    let round = &mut tour.rounds[0];
    round.scores.insert("e1".into(), card("e1", &[3; 18]));
    round.scores.insert("u1".into(), card("u1", &[4; 18]));

    let first = rebuild_from_round(&m, round, Some(at(100)))?;
    assert_eq!(first.status, MatchState::Completed);
    assert_eq!(first.completed_at_hole, Some(10));
    assert_eq!(first.status().display(), "10&8");
    assert_eq!(first.holes.len(), 10);

    let second = rebuild_from_round(&first, round, Some(at(500)))?;
    assert_eq!(second, first);
    assert_eq!(second.completed_at, Some(at(100)));
    Ok(())
}

#[test]
fn rebuild_rejects_a_foreign_round() {
    let tour = ryder_tour();
    let mut m = singles(&tour, "m1", "e1", "u1");
    m.round_id = "other".into();
    assert!(matches!(
        rebuild_from_round(&m, &tour.rounds[0], None),
        Err(ScoringError::RoundMismatch { .. })
    ));
}
