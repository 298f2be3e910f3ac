//! Flatteners for `/teams/{id}/roster` responses.

use serde_json::Value;

use mlbstats_api::types::{RosterEntry, RosterResponse, StatGroup, StatType};

use crate::parse::{int, pos_abbreviation, renamed_stat, team_id, team_name, text, text_or, Record};
use crate::statdict::with_prefix;
use crate::table::Table;

pub const ROSTER_COLUMNS: &[&str] = &[
    "mlbam",
    "name",
    "name_first",
    "name_last",
    "name_lastfirst",
    "jersey_number",
    "pos",
    "status",
    "status_code",
];

pub const ALL_TIME_COLUMNS: &[&str] =
    &["mlbam", "name", "jersey_number", "pos", "status", "status_code"];

pub const COACH_COLUMNS: &[&str] = &[
    "job",
    "job_title",
    "job_id",
    "jersey_number_coach",
    "jersey_number_primary",
    "name",
    "birth_date",
    "age",
    "pos",
    "mlb_debut",
    "last_played",
];

const ROSTER_STAT_PREFIX: &[&str] = &["status", "mlbam", "playerName", "primaryPosition"];

const SEASON_STAT_PREFIX: &[&str] = &[
    "season",
    "mlbam",
    "name",
    "slug",
    "jersey_number",
    "pos",
    "game_type",
    "tm_mlbam",
    "tm_name",
];

const SPLIT_STAT_PREFIX: &[&str] = &[
    "season",
    "mlbam",
    "name",
    "slug",
    "jersey_number",
    "ptype",
    "pos",
    "game_type",
    "tm_mlbam",
    "tm_name",
];

fn status(entry: &RosterEntry) -> (Option<&str>, Option<&str>) {
    match entry.status.as_ref() {
        Some(s) => (s.description.as_deref(), s.code.as_deref()),
        None => (None, None),
    }
}

/// Plain roster, sorted by name.
pub fn roster(resp: &RosterResponse) -> Table {
    let mut table = Table::new(ROSTER_COLUMNS);
    for entry in &resp.roster {
        let p = &entry.person;
        let (desc, code) = status(entry);
        table.push_row(vec![
            int(p.id),
            text(p.display_name()),
            text(p.first_name.as_deref()),
            text(p.last_name.as_deref()),
            text(p.last_first_name.as_deref()),
            text(entry.jersey_number.as_deref()),
            text(pos_abbreviation(entry.position.as_ref())),
            text(desc),
            text(code),
        ]);
    }
    table.sort_by("name", false);
    table
}

/// All-time roster as used by the franchise view, sorted by name.
pub fn all_time_roster(resp: &RosterResponse) -> Table {
    roster(resp).select(ALL_TIME_COLUMNS)
}

pub fn coaches(resp: &RosterResponse) -> Table {
    let mut table = Table::new(COACH_COLUMNS);
    for entry in &resp.roster {
        let p = &entry.person;
        table.push_row(vec![
            text_or(entry.job.as_deref(), "-"),
            text_or(entry.title.as_deref(), "-"),
            text_or(entry.job_id.as_deref(), "-"),
            text_or(entry.jersey_number.as_deref(), "-"),
            text_or(p.primary_number.as_deref(), "-"),
            text(p.display_name()),
            text_or(p.birth_date.as_deref(), "-"),
            int(p.current_age),
            text(pos_abbreviation(p.primary_position.as_ref())),
            text_or(p.mlb_debut_date.as_deref(), "-"),
            text_or(p.last_played_date.as_deref(), "-"),
        ]);
    }
    table
}

/// Roster-level season stats: one row per player who has a `season` (or
/// `seasonAdvanced`) line for `group` in the hydrated person stats.
pub fn roster_stats(resp: &RosterResponse, group: StatGroup, advanced: bool) -> Table {
    let wanted = if advanced {
        StatType::SeasonAdvanced
    } else {
        StatType::Season
    };
    let mut records = Vec::new();
    for entry in &resp.roster {
        let p = &entry.person;
        for block in &p.stats {
            if block.group.as_str() != group.as_str()
                || block.stat_type.as_str() != wanted.as_str()
            {
                continue;
            }
            let Some(split) = block.splits.first() else { continue };
            let mut rec = renamed_stat(&split.stat);
            rec.insert("status".into(), text(status(entry).0));
            rec.insert("mlbam".into(), int(p.id));
            rec.insert("playerName".into(), text(p.display_name()));
            rec.insert(
                "primaryPosition".into(),
                text(pos_abbreviation(p.primary_position.as_ref())),
            );
            records.push(rec);
        }
    }
    Table::from_records(&records, &with_prefix(ROSTER_STAT_PREFIX, group, advanced))
}

fn entry_record(entry: &RosterEntry, split: &mlbstats_api::types::StatSplit) -> Record {
    let p = &entry.person;
    let slug = p
        .name_slug
        .clone()
        .or_else(|| p.id.map(|id| id.to_string()));
    let mut rec = renamed_stat(&split.stat);
    rec.insert("season".into(), text_or(split.season.as_deref(), "-"));
    rec.insert("mlbam".into(), int(p.id));
    rec.insert("name".into(), text_or(p.display_name(), "-"));
    rec.insert("slug".into(), text(slug.as_deref()));
    rec.insert("jersey_number".into(), text_or(entry.jersey_number.as_deref(), "-"));
    rec.insert("pos".into(), text_or(pos_abbreviation(entry.position.as_ref()), "-"));
    rec.insert("game_type".into(), text(split.game_type.as_deref()));
    rec.insert("tm_mlbam".into(), int(team_id(split.team.as_ref())));
    rec.insert("tm_name".into(), text(team_name(split.team.as_ref())));
    rec
}

/// Every hydrated stat split of every player, as used by the team bulk view.
pub fn roster_season_stats(resp: &RosterResponse, group: StatGroup, advanced: bool) -> Table {
    let records: Vec<Record> = resp
        .roster
        .iter()
        .flat_map(|entry| {
            entry
                .person
                .stats
                .iter()
                .flat_map(|b| b.splits.iter())
                .map(move |split| entry_record(entry, split))
        })
        .collect();
    Table::from_records(&records, &with_prefix(SEASON_STAT_PREFIX, group, advanced))
}

/// Pitching sit-code splits (`sp`/`rp`) per player. `ptype` is the upper-cased code.
pub fn roster_pitching_splits(resp: &RosterResponse, advanced: bool) -> Table {
    let records: Vec<Record> = resp
        .roster
        .iter()
        .flat_map(|entry| {
            entry
                .person
                .stats
                .iter()
                .flat_map(|b| b.splits.iter())
                .map(move |split| {
                    let mut rec = entry_record(entry, split);
                    let code = split
                        .split
                        .as_ref()
                        .and_then(|s| s.code.as_deref())
                        .unwrap_or("P")
                        .to_uppercase();
                    rec.insert("ptype".into(), Value::from(code));
                    rec
                })
        })
        .collect();
    Table::from_records(
        &records,
        &with_prefix(SPLIT_STAT_PREFIX, StatGroup::Pitching, advanced),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roster_fixture() -> RosterResponse {
        serde_json::from_value(json!({
            "roster": [
                {"person": {"id": 2, "fullName": "Yoan Moncada", "firstName": "Yoan", "lastName": "Moncada",
                            "nameSlug": "yoan-moncada-660162",
                            "primaryPosition": {"abbreviation": "3B"},
                            "stats": [
                                {"type": {"displayName": "season"}, "group": {"displayName": "hitting"},
                                 "splits": [{"season": "2021", "gameType": "R",
                                             "team": {"id": 145, "name": "Chicago White Sox"},
                                             "stat": {"homeRuns": 14, "avg": ".263"}}]}
                            ]},
                 "jerseyNumber": "10", "position": {"abbreviation": "3B"},
                 "status": {"code": "A", "description": "Active"}},
                {"person": {"id": 1, "fullName": "Jose Abreu", "primaryPosition": {"abbreviation": "1B"}},
                 "jerseyNumber": "79", "position": {"abbreviation": "1B"},
                 "status": {"code": "A", "description": "Active"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn roster_sorted_by_name() {
        let table = roster(&roster_fixture());
        assert_eq!(table.columns(), ROSTER_COLUMNS);
        assert_eq!(table.cell(0, "name"), Some(&json!("Jose Abreu")));
        assert_eq!(table.cell(1, "jersey_number"), Some(&json!("10")));
        assert_eq!(all_time_roster(&roster_fixture()).columns(), ALL_TIME_COLUMNS);
    }

    #[test]
    fn roster_stats_skip_players_without_lines() {
        let table = roster_stats(&roster_fixture(), StatGroup::Hitting, false);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "playerName"), Some(&json!("Yoan Moncada")));
        assert_eq!(table.cell(0, "HR"), Some(&json!(14)));
        assert!(roster_stats(&roster_fixture(), StatGroup::Pitching, false).is_empty());
    }

    #[test]
    fn season_stats_carry_slug_and_team() {
        let table = roster_season_stats(&roster_fixture(), StatGroup::Hitting, false);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "slug"), Some(&json!("yoan-moncada-660162")));
        assert_eq!(table.cell(0, "tm_name"), Some(&json!("Chicago White Sox")));
        assert_eq!(table.cell(0, "pos"), Some(&json!("3B")));
    }

    #[test]
    fn coaches_fill_placeholders() {
        let resp: RosterResponse = serde_json::from_value(json!({
            "roster": [{"person": {"id": 9, "fullName": "Tony La Russa"}, "job": "Manager", "jobId": "MNGR", "title": "Manager"}]
        }))
        .unwrap();
        let table = coaches(&resp);
        assert_eq!(table.cell(0, "job_id"), Some(&json!("MNGR")));
        assert_eq!(table.cell(0, "jersey_number_coach"), Some(&json!("-")));
        assert_eq!(table.cell(0, "age"), Some(&Value::Null));
    }
}
