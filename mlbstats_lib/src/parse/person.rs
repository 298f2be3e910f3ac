//! Flatteners for `/people/{id}` with the `currentTeam`, `rosterEntries`,
//! `education` and `draft` hydrations.

use serde_json::Value;

use mlbstats_api::types::{Person, StatGroup, StatsResponse};

use crate::parse::team::league_cells;
use crate::parse::transactions::draft_picks;
use crate::parse::{entity_id, entity_name, flag, int, pos_abbreviation, text, text_or};
use crate::reference::{ReferenceData, PLACEHOLDER};
use crate::statdict::{columns_for, WO_SEASON};
use crate::table::Table;

use super::stats::career_and_seasons;

pub const INFO_COLUMNS: &[&str] = &[
    "mlbam",
    "primary_position",
    "givenName",
    "fullName",
    "firstName",
    "middleName",
    "lastName",
    "nickName",
    "pronunciation",
    "primary_number",
    "birthDate",
    "currentAge",
    "birthCity",
    "birthState",
    "birthCountry",
    "deathDate",
    "deathCity",
    "deathState",
    "deathCountry",
    "weight",
    "height",
    "bats",
    "throws",
    "zoneTop",
    "zoneBot",
    "is_active",
    "team_mlbam",
    "team_name",
    "first_game",
    "last_game",
    "first_year",
    "last_year",
];

pub const EDUCATION_COLUMNS: &[&str] = &["type", "school", "city", "state"];

pub const ROSTER_ENTRY_COLUMNS: &[&str] = &[
    "jersey",
    "position",
    "status",
    "team",
    "tm_mlbam",
    "from_date",
    "to_date",
    "status_date",
    "forty_man",
    "active",
];

pub const PAST_TEAM_COLUMNS: &[&str] = &[
    "mlbam",
    "full",
    "season",
    "location",
    "franchise",
    "mascot",
    "club",
    "short",
    "lg_mlbam",
    "lg_name_full",
    "lg_name_short",
    "lg_abbrv",
    "div_mlbam",
    "div_name_full",
    "div_name_short",
    "div_abbrv",
    "venue_mlbam",
    "venue_name",
];

/// Biographical tables for one person.
#[derive(Clone, Debug, Default)]
pub struct PlayerInfo {
    /// Single row, see [`INFO_COLUMNS`].
    pub info: Table,
    pub education: Table,
    pub roster_entries: Table,
    pub past_teams: Table,
    pub draft: Table,
}

/// Career and year-by-year tables for one stat group.
#[derive(Clone, Debug, Default)]
pub struct CareerTables {
    pub career: Table,
    pub career_advanced: Table,
    pub yby: Table,
    pub yby_advanced: Table,
}

fn dash(v: Option<&str>) -> Value {
    text_or(v, PLACEHOLDER)
}

fn year_of(date: Option<&str>) -> Value {
    match date.and_then(|d| d.get(..4)) {
        Some(year) => Value::from(year),
        None => Value::from(PLACEHOLDER),
    }
}

fn info_row(p: &Person) -> Vec<Value> {
    let team = p.current_team.as_ref();
    vec![
        int(p.id),
        text(pos_abbreviation(p.primary_position.as_ref())),
        text(p.full_fml_name.as_deref()),
        text(p.full_name.as_deref()),
        text(p.first_name.as_deref()),
        text_or(p.middle_name.as_deref(), "--"),
        text(p.last_name.as_deref()),
        text_or(p.nick_name.as_deref(), "--"),
        text_or(p.pronunciation.as_deref(), ""),
        text(p.primary_number.as_deref()),
        dash(p.birth_date.as_deref()),
        int(p.current_age),
        dash(p.birth_city.as_deref()),
        dash(p.birth_state_province.as_deref()),
        dash(p.birth_country.as_deref()),
        dash(p.death_date.as_deref()),
        dash(p.death_city.as_deref()),
        dash(p.death_state_province.as_deref()),
        dash(p.death_country.as_deref()),
        int(p.weight),
        text(p.height.as_deref()),
        text(p.bat_side.as_ref().and_then(|s| s.code.as_deref())),
        text(p.pitch_hand.as_ref().and_then(|s| s.code.as_deref())),
        p.strike_zone_top.map_or(Value::Null, Value::from),
        p.strike_zone_bottom.map_or(Value::Null, Value::from),
        flag(p.active),
        int(team.and_then(|t| t.id)),
        text(team.and_then(|t| t.name.as_deref())),
        dash(p.mlb_debut_date.as_deref()),
        dash(p.last_played_date.as_deref()),
        year_of(p.mlb_debut_date.as_deref()),
        year_of(p.last_played_date.as_deref()),
    ]
}

/// High schools first, then colleges. Schools without a name are skipped.
pub fn education(p: &Person) -> Table {
    let mut table = Table::new(EDUCATION_COLUMNS);
    let schools = p
        .education
        .highschools
        .iter()
        .map(|s| ("highschool", s))
        .chain(p.education.colleges.iter().map(|s| ("college", s)));
    for (kind, school) in schools {
        let Some(name) = school.name.as_deref() else { continue };
        table.push_row(vec![
            Value::from(kind),
            Value::from(name),
            text_or(school.city.as_deref(), ""),
            text_or(school.state.as_deref(), ""),
        ]);
    }
    table
}

pub fn roster_entries(p: &Person) -> Table {
    let mut table = Table::new(ROSTER_ENTRY_COLUMNS);
    for entry in &p.roster_entries {
        let team = entry.team.as_ref();
        table.push_row(vec![
            dash(entry.jersey_number.as_deref()),
            text_or(pos_abbreviation(entry.position.as_ref()), ""),
            text(entry.status.as_ref().and_then(|s| s.description.as_deref())),
            dash(team.and_then(|t| t.name.as_deref())),
            team.and_then(|t| t.id)
                .map_or_else(|| Value::from(PLACEHOLDER), Value::from),
            dash(entry.start_date.as_deref()),
            dash(entry.end_date.as_deref()),
            dash(entry.status_date.as_deref()),
            flag(entry.is_active_forty_man),
            flag(entry.is_active),
        ]);
    }
    table
}

/// Every team the person has a roster entry with, joined to the league table.
pub fn past_teams(p: &Person, refs: &ReferenceData) -> Table {
    let mut table = Table::new(PAST_TEAM_COLUMNS);
    for team in p.roster_entries.iter().filter_map(|e| e.team.as_ref()) {
        let mut row = vec![
            int(team.id),
            text(team.name.as_deref()),
            int(team.season),
            text(team.location_name.as_deref()),
            text(team.franchise_name.as_deref()),
            text(team.team_name.as_deref()),
            text(team.club_name.as_deref()),
            text(team.short_name.as_deref()),
        ];
        row.extend(league_cells(refs, entity_id(team.league.as_ref())));
        row.extend(league_cells(refs, entity_id(team.division.as_ref())));
        row.push(Value::from(entity_id(team.venue.as_ref()).unwrap_or(0)));
        row.push(dash(entity_name(team.venue.as_ref())));
        table.push_row(row);
    }
    table
}

pub fn player_info(p: &Person, refs: &ReferenceData) -> PlayerInfo {
    let mut info = Table::new(INFO_COLUMNS);
    info.push_row(info_row(p));
    PlayerInfo {
        info,
        education: education(p),
        roster_entries: roster_entries(p),
        past_teams: past_teams(p, refs),
        draft: draft_picks(p.drafts.iter()),
    }
}

fn split_career(table: Table, group: StatGroup, advanced: bool) -> (Table, Table) {
    let career_cols: Vec<&str> = WO_SEASON
        .iter()
        .chain(columns_for(group, advanced).iter())
        .copied()
        .collect();
    let career = table
        .filter_rows("season", |v| v.as_str() == Some("Career"))
        .select(&career_cols);
    let mut yby = table.filter_rows("season", |v| v.as_str() != Some("Career"));
    yby.sort_by("season", true);
    (career, yby)
}

/// Career and year-by-year tables for `group`. Fielding has no advanced lines,
/// so its advanced tables stay empty.
pub fn career_tables(resp: &StatsResponse, refs: &ReferenceData, group: StatGroup) -> CareerTables {
    let (career, yby) = split_career(career_and_seasons(resp, refs, group, false), group, false);
    let mut tables = CareerTables {
        career,
        yby,
        ..CareerTables::default()
    };
    if group != StatGroup::Fielding {
        let (career_advanced, yby_advanced) =
            split_career(career_and_seasons(resp, refs, group, true), group, true);
        tables.career_advanced = career_advanced;
        tables.yby_advanced = yby_advanced;
    }
    tables
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn person() -> Person {
        serde_json::from_value(json!({
            "id": 547989, "fullName": "Jose Abreu", "fullFMLName": "Jose Dariel Abreu",
            "firstName": "Jose", "lastName": "Abreu", "primaryNumber": "79",
            "birthDate": "1987-01-29", "currentAge": 37, "birthCity": "Cienfuegos",
            "height": "6' 3\"", "weight": 235, "active": true,
            "primaryPosition": {"abbreviation": "1B"}, "batSide": {"code": "R"}, "pitchHand": {"code": "R"},
            "strikeZoneTop": 3.49, "strikeZoneBottom": 1.601,
            "mlbDebutDate": "2014-03-31",
            "currentTeam": {"id": 117, "name": "Houston Astros"},
            "education": {"highschools": [{"name": "Some HS", "city": "Cienfuegos"}], "colleges": [{"city": "Nowhere"}]},
            "rosterEntries": [{
                "jerseyNumber": "79", "position": {"abbreviation": "1B"}, "status": {"description": "Active"},
                "team": {"id": 145, "name": "Chicago White Sox", "season": 2014, "league": {"id": 103},
                         "division": {"id": 202}, "venue": {"id": 4, "name": "U.S. Cellular Field"}},
                "isActive": false, "isActiveFortyMan": true, "startDate": "2013-10-29", "endDate": "2022-11-10"
            }],
            "drafts": []
        }))
        .unwrap()
    }

    #[test]
    fn info_row_defaults() {
        let info = player_info(&person(), &ReferenceData::bundled());
        let row = &info.info;
        assert_eq!(row.len(), 1);
        assert_eq!(row.cell(0, "givenName"), Some(&json!("Jose Dariel Abreu")));
        assert_eq!(row.cell(0, "middleName"), Some(&json!("--")));
        assert_eq!(row.cell(0, "deathDate"), Some(&json!("-")));
        assert_eq!(row.cell(0, "first_year"), Some(&json!("2014")));
        assert_eq!(row.cell(0, "last_year"), Some(&json!("-")));
        assert_eq!(row.cell(0, "team_mlbam"), Some(&json!(117)));
        assert_eq!(row.cell(0, "zoneTop"), Some(&json!(3.49)));
        assert!(info.draft.is_empty());
    }

    #[test]
    fn education_skips_unnamed_schools() {
        let table = education(&person());
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "type"), Some(&json!("highschool")));
        assert_eq!(table.cell(0, "state"), Some(&json!("")));
    }

    #[test]
    fn roster_entries_and_past_teams() {
        let p = person();
        let entries = roster_entries(&p);
        assert_eq!(entries.cell(0, "forty_man"), Some(&json!(true)));
        assert_eq!(entries.cell(0, "status_date"), Some(&json!("-")));

        let teams = past_teams(&p, &ReferenceData::bundled());
        assert_eq!(teams.cell(0, "lg_abbrv"), Some(&json!("AL")));
        assert_eq!(teams.cell(0, "div_name_short"), Some(&json!("AL Central")));
        assert_eq!(teams.cell(0, "venue_name"), Some(&json!("U.S. Cellular Field")));
    }

    #[test]
    fn career_tables_split_career_from_seasons() {
        let resp: StatsResponse = serde_json::from_value(json!({
            "stats": [
                {"type": {"displayName": "career"}, "group": {"displayName": "hitting"},
                 "splits": [{"gameType": "R", "stat": {"homeRuns": 243}}]},
                {"type": {"displayName": "yearByYear"}, "group": {"displayName": "hitting"},
                 "splits": [
                    {"season": "2014", "gameType": "R", "team": {"id": 145, "name": "Chicago White Sox"},
                     "league": {"id": 103}, "stat": {"homeRuns": 36}},
                    {"season": "2015", "gameType": "R", "team": {"id": 145, "name": "Chicago White Sox"},
                     "league": {"id": 103}, "stat": {"homeRuns": 30}}
                 ]}
            ]
        }))
        .unwrap();
        let tables = career_tables(&resp, &ReferenceData::bundled(), StatGroup::Hitting);
        assert_eq!(tables.career.len(), 1);
        assert_eq!(tables.career.columns()[0], "game_type");
        assert_eq!(tables.career.cell(0, "HR"), Some(&json!(243)));
        assert_eq!(tables.yby.len(), 2);
        assert_eq!(tables.yby.cell(0, "season"), Some(&json!("2015")));
        assert!(tables.career_advanced.is_empty());
    }
}
