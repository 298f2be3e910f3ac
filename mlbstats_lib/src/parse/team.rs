//! Flatteners for `/teams/{id}` responses: team info, next/previous games
//! and franchise standings.

use serde_json::Value;

use mlbstats_api::types::{Schedule, Team, TeamRecord, TeamsResponse};

use crate::parse::{entity_id, entity_name, int, text, text_or, win_loss};
use crate::reference::{ReferenceData, PLACEHOLDER};
use crate::table::Table;

pub const TEAM_INFO_COLUMNS: &[&str] = &[
    "mlbam",
    "full_name",
    "location_name",
    "franchise_name",
    "team_name",
    "club_name",
    "short_name",
    "venue_mlbam",
    "venue_name",
    "first_year",
    "league_mlbam",
    "league_name",
    "league_short",
    "league_abbrv",
    "div_mlbam",
    "div_name",
    "div_short",
    "div_abbrv",
    "season",
];

pub const GAME_LIST_COLUMNS: &[&str] = &[
    "season",
    "date",
    "gamePk",
    "game_type",
    "away_mlbam",
    "away_name",
    "home_mlbam",
    "home_name",
    "double_header",
    "series_game",
    "series_length",
];

pub const RECORD_COLUMNS: &[&str] = &[
    "season",
    "mlbam",
    "abbrv",
    "name_full",
    "lg_div_short",
    "gp",
    "W",
    "L",
    "pct",
    "runs",
    "runs_allowed",
    "run_diff",
    "gb",
    "wc_gb",
    "div_gb",
    "lg_gb",
    "sp_gb",
];

/// Columns of the record splits table; every split is a `"W-L"` string.
pub const RECORD_SPLIT_COLUMNS: &[&str] = &[
    "season",
    "mlbam",
    "name",
    "lg_mlbam",
    "lg_abbrv",
    "div_mlbam",
    "div_short",
    "gp",
    "W",
    "L",
    "pct",
    "R",
    "RA",
    "diff",
    "American League",
    "National League",
    "east",
    "central",
    "west",
    "home",
    "away",
    "right",
    "left",
    "lastTen",
    "extraInning",
    "oneRun",
    "winners",
    "day",
    "night",
    "grass",
    "turf",
];

const SPLIT_COLUMNS_START: usize = 14;

/// `[mlbam, name, name_short, abbreviation]` of a league or division,
/// resolved through the reference table. A missing ID yields placeholders
/// without a warning; an unknown one is logged.
pub(crate) fn league_cells(refs: &ReferenceData, id: Option<i64>) -> [Value; 4] {
    match id {
        Some(id) => {
            let row = refs.league_or_placeholder(id);
            [
                Value::from(id),
                Value::from(row.name),
                Value::from(row.name_short),
                Value::from(row.abbreviation),
            ]
        }
        None => [
            Value::Null,
            Value::from(PLACEHOLDER),
            Value::from(PLACEHOLDER),
            Value::from(PLACEHOLDER),
        ],
    }
}

/// One-row table describing `team`, joined to the league table.
pub fn team_info(team: &Team, refs: &ReferenceData) -> Table {
    let mut row = vec![
        int(team.id),
        text(team.name.as_deref()),
        text(team.location_name.as_deref()),
        text(team.franchise_name.as_deref()),
        text(team.team_name.as_deref()),
        text(team.club_name.as_deref()),
        text(team.short_name.as_deref()),
        int(entity_id(team.venue.as_ref())),
        text_or(entity_name(team.venue.as_ref()), ""),
        int(team.first_year_of_play),
    ];
    row.extend(league_cells(refs, entity_id(team.league.as_ref())));
    row.extend(league_cells(refs, entity_id(team.division.as_ref())));
    row.push(int(team.season));

    let mut table = Table::new(TEAM_INFO_COLUMNS);
    table.push_row(row);
    table
}

/// First team of a `/teams/{id}` response.
pub fn first_team(resp: &TeamsResponse) -> Option<&Team> {
    resp.teams.first()
}

/// Compact game list, as embedded in `previousGameSchedule` and
/// `nextGameSchedule`.
pub fn game_list(schedule: Option<&Schedule>) -> Table {
    let mut table = Table::new(GAME_LIST_COLUMNS);
    let Some(schedule) = schedule else {
        return table;
    };
    for (date, game) in schedule.games() {
        let away = &game.teams.away.team;
        let home = &game.teams.home.team;
        table.push_row(vec![
            text(game.season.as_deref()),
            text(date.date.as_deref()),
            int(game.game_pk),
            text(game.game_type.as_deref()),
            int(away.id),
            text(away.name.as_deref()),
            int(home.id),
            text(home.name.as_deref()),
            Value::Bool(game.double_header.as_deref() != Some("N")),
            int(game.series_game_number),
            int(game.games_in_series),
        ]);
    }
    table
}

/// Maps a division name ("American League West") to its standings key.
fn division_key(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    ["east", "central", "west"]
        .into_iter()
        .find(|part| lower.contains(part))
}

fn split_cells(record: &TeamRecord) -> Vec<Value> {
    let names = &RECORD_SPLIT_COLUMNS[SPLIT_COLUMNS_START..];
    let mut cells: Vec<Value> = vec![Value::from(PLACEHOLDER); names.len()];
    let mut set = |key: &str, value: String| {
        if let Some(i) = names.iter().position(|n| *n == key) {
            cells[i] = Value::from(value);
        }
    };
    for lg in &record.records.league_records {
        if let Some(name) = lg.league.name.as_deref() {
            set(name, win_loss(lg.wins, lg.losses));
        }
    }
    for div in &record.records.division_records {
        if let Some(key) = div.division.name.as_deref().and_then(division_key) {
            set(key, win_loss(div.wins, div.losses));
        }
    }
    for split in &record.records.split_records {
        if let Some(key) = split.split_type.as_deref() {
            set(key, win_loss(split.wins, split.losses));
        }
    }
    cells
}

/// Standings tables built from one `hydrate=standings` response per
/// season: `(records, splits)`, both sorted by season descending.
/// Seasons without a record are skipped.
pub fn franchise_standings(seasons: &[TeamsResponse], refs: &ReferenceData) -> (Table, Table) {
    let mut records = Table::new(RECORD_COLUMNS);
    let mut splits = Table::new(RECORD_SPLIT_COLUMNS);

    for team in seasons.iter().filter_map(first_team) {
        let Some(rec) = team.record.as_ref() else {
            tracing::debug!("no record for team {:?} season {:?}", team.id, team.season);
            continue;
        };
        let lg_mlbam = entity_id(team.league.as_ref());
        let div_mlbam = entity_id(team.division.as_ref());
        let lg_abbrv = refs.league_abbreviation(lg_mlbam);
        let (lg_div_short, div_short) = match div_mlbam {
            Some(id) => {
                let div = refs.league_or_placeholder(id);
                (div.name_short, div.div_part)
            }
            None => (lg_abbrv.clone(), PLACEHOLDER.to_string()),
        };
        let gb = |v: &Option<String>| text_or(v.as_deref(), "-");

        records.push_row(vec![
            int(team.season),
            int(team.id),
            text(team.abbreviation.as_deref()),
            text(team.name.as_deref()),
            Value::from(lg_div_short),
            int(rec.games_played),
            int(rec.wins),
            int(rec.losses),
            text(rec.winning_percentage.as_deref()),
            int(rec.runs_scored),
            int(rec.runs_allowed),
            int(rec.run_differential),
            gb(&rec.games_back),
            gb(&rec.wild_card_games_back),
            gb(&rec.division_games_back),
            gb(&rec.league_games_back),
            gb(&rec.sport_games_back),
        ]);

        let mut row = vec![
            int(team.season),
            int(team.id),
            text(team.name.as_deref()),
            Value::from(lg_mlbam.unwrap_or(0)),
            Value::from(lg_abbrv),
            Value::from(div_mlbam.unwrap_or(0)),
            Value::from(div_short),
            int(rec.games_played),
            int(rec.wins),
            int(rec.losses),
            text(rec.winning_percentage.as_deref()),
            int(rec.runs_scored),
            int(rec.runs_allowed),
            int(rec.run_differential),
        ];
        row.extend(split_cells(rec));
        splits.push_row(row);
    }

    records.sort_by("season", true);
    splits.sort_by("season", true);
    (records, splits)
}
