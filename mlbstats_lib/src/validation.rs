use chrono::{Datelike, NaiveDate, Utc};
use mlbstats_api::types::{GameType, StatGroup, StatType};

use crate::error::MlbStatsError;

pub const MAX_SEARCH_LENGTH: usize = 100;

/// First season with data in the Stats API.
pub const FIRST_SEASON: i32 = 1876;

/// Situation codes accepted by `sitCodes`, with their meaning.
pub const SIT_CODES: &[(&str, &str)] = &[
    ("h", "Home Games"),
    ("a", "Away Games"),
    ("d", "Day Games"),
    ("n", "Night Games"),
    ("g", "Grass"),
    ("t", "Turf"),
    ("w", "Wins"),
    ("l", "Losses"),
    ("vl", "vs Left"),
    ("vr", "vs Right"),
    ("sp", "Starting Pitchers"),
    ("rp", "Relief Pitchers"),
    ("risp", "Runners In Scoring Position"),
    ("r0", "Bases Empty"),
    ("r1", "Runner On 1st"),
    ("ron", "Men On Base"),
    ("risp2", "RISP With 2 Outs"),
    ("lo", "Leadoff Inning"),
    ("i01", "1st Inning"),
    ("i02", "2nd Inning"),
    ("i03", "3rd Inning"),
    ("i04", "4th Inning"),
    ("i05", "5th Inning"),
    ("i06", "6th Inning"),
    ("i07", "7th Inning"),
    ("i08", "8th Inning"),
    ("i09", "9th Inning"),
    ("ix", "Extra Innings"),
    ("b1", "Batting 1st"),
    ("b2", "Batting 2nd"),
    ("b3", "Batting 3rd"),
    ("b4", "Batting 4th"),
    ("b5", "Batting 5th"),
    ("b6", "Batting 6th"),
    ("b7", "Batting 7th"),
    ("b8", "Batting 8th"),
    ("b9", "Batting 9th"),
    ("preas", "Pre All-Star"),
    ("posas", "Post All-Star"),
    ("m03", "March"),
    ("m04", "April"),
    ("m05", "May"),
    ("m06", "June"),
    ("m07", "July"),
    ("m08", "August"),
    ("m09", "September"),
    ("m10", "October"),
];

/// Trim, strip ASCII control characters and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, MlbStatsError> {
    if input.len() > max_len {
        return Err(MlbStatsError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect();
    Ok(cleaned.trim().to_string())
}

/// Team or venue name fragment for the reference searches.
pub fn validate_search(input: &str) -> Result<String, MlbStatsError> {
    let cleaned = sanitize_text(input, MAX_SEARCH_LENGTH)?;
    if cleaned.is_empty() {
        return Err(MlbStatsError::InvalidInput(
            "search text must not be empty".to_string(),
        ));
    }
    Ok(cleaned)
}

pub fn validate_date(input: &str) -> Result<NaiveDate, MlbStatsError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        MlbStatsError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2021-06-01)",
            trimmed
        ))
    })
}

/// Start and end must come together, and start must not be after end.
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<(NaiveDate, NaiveDate)>, MlbStatsError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = validate_date(start)?;
            let end = validate_date(end)?;
            if start > end {
                return Err(MlbStatsError::InvalidInput(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
            Ok(Some((start, end)))
        }
        _ => Err(MlbStatsError::InvalidInput(
            "start and end dates must be given together".to_string(),
        )),
    }
}

/// Season between 1876 and next year.
pub fn validate_season(season: i32) -> Result<i32, MlbStatsError> {
    let max = Utc::now().year() + 1;
    if !(FIRST_SEASON..=max).contains(&season) {
        return Err(MlbStatsError::InvalidInput(format!(
            "season must be between {} and {}, got {}",
            FIRST_SEASON, max, season
        )));
    }
    Ok(season)
}

pub fn validate_month(month: u32) -> Result<u32, MlbStatsError> {
    if !(1..=12).contains(&month) {
        return Err(MlbStatsError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(month)
}

/// First and last day of a month.
pub fn month_bounds(season: i32, month: u32) -> Result<(NaiveDate, NaiveDate), MlbStatsError> {
    validate_month(month)?;
    let invalid = || MlbStatsError::InvalidInput(format!("invalid month {}-{}", season, month));
    let start = NaiveDate::from_ymd_opt(season, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(season + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(season, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((start, next.pred_opt().unwrap_or(start)))
}

pub fn validate_group(input: &str) -> Result<StatGroup, MlbStatsError> {
    input.parse().map_err(MlbStatsError::InvalidInput)
}

/// Comma-separated stat types, e.g. `season,seasonAdvanced`.
pub fn validate_stat_types(input: &str) -> Result<Vec<StatType>, MlbStatsError> {
    let types = input
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<StatType>().map_err(MlbStatsError::InvalidInput))
        .collect::<Result<Vec<_>, _>>()?;
    if types.is_empty() {
        return Err(MlbStatsError::InvalidInput(
            "at least one stat type is required".to_string(),
        ));
    }
    Ok(types)
}

/// Comma-separated game type codes. `ALL` expands to every code.
pub fn validate_game_types(input: &str) -> Result<Vec<GameType>, MlbStatsError> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(GameType::ALL.to_vec());
    }
    input
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<GameType>().map_err(MlbStatsError::InvalidInput))
        .collect()
}

/// Lowercases sit codes and rejects unknown ones.
pub fn validate_sit_codes(codes: &[&str]) -> Result<Vec<String>, MlbStatsError> {
    codes
        .iter()
        .map(|code| {
            let code = code.trim().to_lowercase();
            if SIT_CODES.iter().any(|(c, _)| *c == code) {
                Ok(code)
            } else {
                Err(MlbStatsError::InvalidInput(format!(
                    "unknown situation code '{}'",
                    code
                )))
            }
        })
        .collect()
}

/// `all`, `AL`/`american`/`103` or `NL`/`national`/`104` to league IDs.
pub fn validate_league(input: &str) -> Result<Vec<i64>, MlbStatsError> {
    match input.trim().to_lowercase().as_str() {
        "all" | "" => Ok(vec![103, 104]),
        "al" | "american" | "103" => Ok(vec![103]),
        "nl" | "national" | "104" => Ok(vec![104]),
        other => Err(MlbStatsError::InvalidInput(format!(
            "unknown league '{}'. Expected AL, NL or all",
            other
        ))),
    }
}

/// Description of a sit code, if known.
pub fn sit_code_description(code: &str) -> Option<&'static str> {
    SIT_CODES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, desc)| *desc)
}

/// vsTeam types need an opposing team; vsPlayer types need a player or a team;
/// date range types need both dates.
pub fn validate_stat_requirements(
    stat_types: &[StatType],
    opposing_team: Option<i64>,
    opposing_player: Option<i64>,
    has_date_range: bool,
) -> Result<(), MlbStatsError> {
    for st in stat_types {
        if st.is_vs_team() && opposing_team.is_none() {
            return Err(MlbStatsError::InvalidInput(format!(
                "stat type '{}' requires an opposing team id",
                st
            )));
        }
        if st.is_vs_player() && opposing_team.is_none() && opposing_player.is_none() {
            return Err(MlbStatsError::InvalidInput(format!(
                "stat type '{}' requires an opposing player or team id",
                st
            )));
        }
        if st.needs_date_range() && !has_date_range {
            return Err(MlbStatsError::InvalidInput(format!(
                "stat type '{}' requires a start and end date",
                st
            )));
        }
    }
    Ok(())
}
