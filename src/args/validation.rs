use serde_json::Value;
use std::{fs, path::PathBuf};

fn read_json(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("The json file '{file}' is not valid json: {e}"))
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a snapshot
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let json = read_json(file)?;
    validate_json_format(&json)?;
    Ok(json)
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a leaderboard
pub fn check_readable_leaderboard_json(file: &str) -> Result<Value, String> {
    let json = read_json(file)?;
    validate_leaderboard_format(&json)?;
    Ok(json)
}

/// Validate the snapshot format
/// format we expect is this:
/// { "tours": [{ "id": "...", "name": "...", "format": "...", "players": [...], "teams": [...], "rounds": [...] }]
/// , "matches": [...]
/// , "ryder_cups": [...]
/// }
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(object) = json.as_object() else {
        return Err("The json file is not in the correct format. Expected an object.".to_string());
    };

    let expected_keys = ["tours", "matches", "ryder_cups"];
    for key in object.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The json file is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }
    for key in expected_keys {
        if object.get(key).is_some_and(|v| !v.is_array()) {
            return Err(format!(
                "The json key {key} is not in the correct format. Expected an array."
            ));
        }
    }

    let tours = object.get("tours").and_then(Value::as_array);
    for tour in tours.into_iter().flatten() {
        if !tour["id"].is_string() || !tour["name"].is_string() {
            return Err(
                "The json key tours is not in the correct format. Expected objects with keys id and name."
                    .to_string(),
            );
        }
        let rounds = tour.get("rounds").and_then(Value::as_array);
        for round in rounds.into_iter().flatten() {
            if !round["id"].is_string() || !round["holes"].is_array() {
                return Err(
                    "The json key rounds is not in the correct format. Expected objects with keys id and holes."
                        .to_string(),
                );
            }
        }
    }

    let matches = object.get("matches").and_then(Value::as_array);
    for m in matches.into_iter().flatten() {
        if !m["id"].is_string() || !m["round_id"].is_string() {
            return Err(
                "The json key matches is not in the correct format. Expected objects with keys id and round_id."
                    .to_string(),
            );
        }
    }

    let cups = object.get("ryder_cups").and_then(Value::as_array);
    for cup in cups.into_iter().flatten() {
        if !cup["tour_id"].is_string() || !cup["target_points"].is_number() {
            return Err(
                "The json key ryder_cups is not in the correct format. Expected objects with keys tour_id and target_points."
                    .to_string(),
            );
        }
    }

    Ok(())
}

/// A previous leaderboard is an array of entries, each with a numeric
/// `position` and a `player_id` or `team_id`.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_leaderboard_format(json: &Value) -> Result<(), String> {
    let Some(entries) = json.as_array() else {
        return Err("The previous leaderboard is not in the correct format. Expected an array.".to_string());
    };
    for entry in entries {
        if !entry["position"].is_u64() {
            return Err(
                "The json key position is not in the correct format. Expected a positive number."
                    .to_string(),
            );
        }
        if !entry["player_id"].is_string() && !entry["team_id"].is_string() {
            return Err(
                "The previous leaderboard entries need a player_id or a team_id.".to_string(),
            );
        }
    }
    Ok(())
}
