use chrono::Utc;
use rusty_golf_scoring::args::{self, CleanArgs, Command};
use rusty_golf_scoring::error::CoreError;
use rusty_golf_scoring::logging;
use rusty_golf_scoring::model::ScoreEntry;
use rusty_golf_scoring::score::{
    LeaderboardEntry, TeamLeaderboardEntry, load_player_statistics, load_round_leaderboard,
    load_skins, load_team_leaderboard, load_tour_leaderboard, load_tournament_status,
    record_score,
};
use rusty_golf_scoring::storage::{AllowAll, MemoryStorage, Storage};
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();
    let args = args::args_checks()?;
    let output = run(args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(args: CleanArgs) -> Result<Value, CoreError> {
    let storage = MemoryStorage::new(args.snapshot);
    let options = args.options;

    let value = match args.command {
        Command::Leaderboard { tour, round } => {
            let previous: Option<Vec<LeaderboardEntry>> =
                args.previous.map(serde_json::from_value).transpose()?;
            let board = match (round, tour) {
                (Some(round), _) => {
                    load_round_leaderboard(&storage, &round, options, previous.as_deref()).await?
                }
                (None, Some(tour)) => {
                    load_tour_leaderboard(&storage, &tour, options, previous.as_deref()).await?
                }
                (None, None) => return Err(CoreError::Other("pass --tour or --round".into())),
            };
            serde_json::to_value(board)?
        }
        Command::Teams { tour, round } => {
            let previous: Option<Vec<TeamLeaderboardEntry>> =
                args.previous.map(serde_json::from_value).transpose()?;
            let board = load_team_leaderboard(
                &storage,
                &tour,
                round.as_deref(),
                options,
                previous.as_deref(),
            )
            .await?;
            serde_json::to_value(board)?
        }
        Command::Match { id } => {
            let m = storage.get_match(&id).await?;
            let status = m.status();
            json!({
                "match": m,
                "status": status,
                "display": status.display(),
            })
        }
        Command::Tournament { tour } => {
            serde_json::to_value(load_tournament_status(&storage, &tour).await?)?
        }
        Command::Stats { round, player } => {
            serde_json::to_value(load_player_statistics(&storage, &round, &player).await?)?
        }
        Command::Skins { round } => {
            serde_json::to_value(load_skins(&storage, &round, options.handicapped).await?)?
        }
        Command::Score {
            round,
            player,
            hole,
            strokes,
            principal,
            save,
        } => {
            let entry = ScoreEntry {
                round_id: round,
                player_id: player,
                hole_number: hole,
                strokes,
                timestamp: Utc::now(),
            };
            let card = record_score(&storage, &AllowAll, &principal, &entry).await?;
            if let Some(path) = save {
                let snapshot = storage.snapshot().await;
                std::fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;
                tracing::info!(path = %path, "snapshot saved");
            }
            serde_json::to_value(card)?
        }
    };
    Ok(value)
}
