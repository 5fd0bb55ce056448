mod common;

use proptest::prelude::*;
use rusty_golf_scoring::model::PlayFormat;
use rusty_golf_scoring::score::{LeaderboardOptions, round_leaderboard, tour_leaderboard};

use common::{card, card_to_par, individual_tour, player, round_with};

const GROSS: LeaderboardOptions = LeaderboardOptions {
    handicapped: false,
    include_in_progress: false,
};

#[test]
fn ties_share_a_position_and_skip_the_next() -> Result<(), Box<dyn std::error::Error>> {
    let round = round_with(
        "r1",
        PlayFormat::StrokePlay,
        vec![
            card_to_par("a", &[-1, -1]),
            card_to_par("b", &[0, 0]),
            card_to_par("c", &[-2, 0]),
        ],
    );
    let tour = individual_tour(
        vec![player("a", None), player("b", None), player("c", None)],
        vec![round],
    );
    let board = round_leaderboard(&tour, "r1", GROSS, None)?;
    let positions: Vec<(&str, usize, i32)> = board
        .iter()
        .map(|e| (e.player_id.as_str(), e.position, e.total_to_par))
        .collect();
    assert_eq!(positions, vec![("a", 1, -2), ("c", 1, -2), ("b", 3, 0)]);
    Ok(())
}

#[test]
fn players_without_scores_go_last_in_roster_order() -> Result<(), Box<dyn std::error::Error>> {
    let round = round_with(
        "r1",
        PlayFormat::StrokePlay,
        vec![
            card("z", &[]),
            card_to_par("a", &[2]),
            card("y", &[]),
            card_to_par("b", &[0]),
        ],
    );
    let tour = individual_tour(
        vec![
            player("z", None),
            player("a", None),
            player("y", None),
            player("b", None),
        ],
        vec![round],
    );
    let board = round_leaderboard(&tour, "r1", GROSS, None)?;
    let ids: Vec<&str> = board.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "z", "y"]);
    assert_eq!(board[2].position, 3);
    assert_eq!(board[3].position, 4);
    assert_eq!(board[3].holes_played, 0);
    Ok(())
}

#[test]
fn handicap_reorders_the_board() -> Result<(), Box<dyn std::error::Error>> {
    // 18 holes each: a shoots 80, b shoots 75 off 10
    let a = card_to_par("a", &[1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).with_handicap(18);
    let b = card_to_par("b", &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).with_handicap(2);
    let round = round_with("r1", PlayFormat::StrokePlay, vec![a, b]);
    let tour = individual_tour(vec![player("a", Some(18)), player("b", Some(2))], vec![round]);

    let gross = round_leaderboard(&tour, "r1", GROSS, None)?;
    assert_eq!(gross[0].player_id, "b");
    assert_eq!(gross[0].net_to_par, None);

    let options = LeaderboardOptions {
        handicapped: true,
        ..GROSS
    };
    let net = round_leaderboard(&tour, "r1", options, None)?;
    assert_eq!(net[0].player_id, "a");
    assert_eq!(net[0].net_to_par, Some(-10));
    assert_eq!(net[1].net_to_par, Some(1));
    assert_eq!(net[0].total_to_par, 8);
    Ok(())
}

#[test]
fn position_change_compares_with_previous_board() -> Result<(), Box<dyn std::error::Error>> {
    let mut tour = individual_tour(
        vec![player("a", None), player("b", None)],
        vec![round_with(
            "r1",
            PlayFormat::StrokePlay,
            vec![card_to_par("a", &[-1]), card_to_par("b", &[0])],
        )],
    );
    let before = round_leaderboard(&tour, "r1", GROSS, None)?;
    assert!(before.iter().all(|e| e.position_change.is_none()));

    tour.rounds[0].scores.insert("b".into(), card_to_par("b", &[0, -1, -1]));
    let after = round_leaderboard(&tour, "r1", GROSS, Some(&before))?;
    assert_eq!(after[0].player_id, "b");
    assert_eq!(after[0].position_change, Some(1));
    assert_eq!(after[1].position_change, Some(-1));
    Ok(())
}

#[test]
fn tour_board_skips_unfinished_rounds_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let mut done = round_with(
        "r1",
        PlayFormat::StrokePlay,
        vec![card_to_par("a", &[0; 18]), card_to_par("b", &[1; 18])],
    );
    done.complete();
    let mut live = round_with(
        "r2",
        PlayFormat::StrokePlay,
        vec![card_to_par("a", &[3, 3]), card_to_par("b", &[-1, -1])],
    );
    live.start();
    let tour = individual_tour(vec![player("a", None), player("b", None)], vec![done, live]);

    let completed_only = tour_leaderboard(&tour, GROSS, None)?;
    assert_eq!(completed_only[0].player_id, "a");
    assert_eq!(completed_only[0].rounds_played, 1);

    let options = LeaderboardOptions {
        include_in_progress: true,
        ..GROSS
    };
    let all = tour_leaderboard(&tour, options, None)?;
    let a = all.iter().find(|e| e.player_id == "a").unwrap();
    let b = all.iter().find(|e| e.player_id == "b").unwrap();
    assert_eq!(a.total_to_par, 6);
    assert_eq!(b.total_to_par, 16);
    assert_eq!(a.rounds_played, 2);
    assert_eq!(a.holes_played, 20);
    Ok(())
}

#[test]
fn unknown_round_is_an_error() {
    let tour = individual_tour(vec![], vec![]);
    assert!(round_leaderboard(&tour, "nope", GROSS, None).is_err());
}

proptest! {
    #[test]
    fn totals_match_the_sum_over_played_holes(
        offsets in prop::collection::vec(-2i8..=4, 0..=18),
    ) {
        let c = card_to_par("p", &offsets);
        let expected_to_par: i32 = offsets.iter().map(|o| i32::from(*o)).sum();
        let tour = individual_tour(
            vec![player("p", None)],
            vec![round_with("r1", PlayFormat::StrokePlay, vec![c.clone()])],
        );
        let board = round_leaderboard(&tour, "r1", GROSS, None).unwrap();
        prop_assert_eq!(board[0].total_to_par, expected_to_par);
        prop_assert_eq!(board[0].total_score, c.strokes.iter().flatten().map(|s| i32::from(*s)).sum::<i32>());
        prop_assert_eq!(board[0].holes_played, offsets.len());
    }

    #[test]
    fn equal_scores_always_share_a_position(
        to_par in prop::collection::vec(-3i8..=5, 1..=8),
    ) {
        let players: Vec<_> = (0..to_par.len()).map(|i| player(&format!("p{i}"), None)).collect();
        let cards = to_par
            .iter()
            .enumerate()
            .map(|(i, o)| card_to_par(&format!("p{i}"), &[*o]))
            .collect();
        let tour = individual_tour(players, vec![round_with("r1", PlayFormat::StrokePlay, cards)]);
        let board = round_leaderboard(&tour, "r1", GROSS, None).unwrap();
        for (i, e) in board.iter().enumerate() {
            let better = board.iter().filter(|o| o.total_to_par < e.total_to_par).count();
            prop_assert_eq!(e.position, better + 1);
            if i > 0 {
                prop_assert!(board[i - 1].total_to_par <= e.total_to_par);
            }
        }
    }
}
