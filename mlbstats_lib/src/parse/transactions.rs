//! Flatteners for transactions, drafts, free agents and award recipients.

use serde_json::Value;

use mlbstats_api::types::{
    Award, AwardsResponse, DraftPick, DraftResponse, FreeAgentsResponse, ProspectsResponse,
    TransactionsResponse,
};

use crate::parse::{entity_id, entity_name, flag, int, pos_abbreviation, text, text_or};
use crate::table::Table;

pub const TRANSACTION_COLUMNS: &[&str] = &[
    "name",
    "mlbam",
    "tr_type",
    "tr",
    "description",
    "date",
    "e_date",
    "r_date",
    "fr",
    "fr_mlbam",
    "to",
    "to_mlbam",
];

pub const DRAFT_COLUMNS: &[&str] = &[
    "season",
    "bisID",
    "mlbam",
    "name",
    "birth_date",
    "birth_city",
    "birth_state",
    "birth_country",
    "height",
    "weight",
    "pos",
    "bats",
    "throws",
    "rank",
    "round",
    "pick_number",
    "round_pick_number",
    "value",
    "signing_bonus",
    "home_city",
    "home_state",
    "home_country",
    "school_name",
    "school_class",
    "school_state",
    "school_country",
    "scouting_report",
    "headshot_url",
    "blurb",
    "is_drafted",
    "is_pass",
    "draft_code",
    "draft_description",
];

pub const FREE_AGENT_COLUMNS: &[&str] = &[
    "date_signed",
    "date_declared",
    "notes",
    "og_tm_mlbam",
    "og_tm_name",
    "new_tm_mlbam",
    "new_tm_name",
    "mlbam",
    "name",
    "name_first",
    "name_last",
    "birth_date",
    "age",
    "bats",
    "throws",
    "pos_code",
    "pos_name",
    "pos_type",
    "pos_abbreviation",
];

pub const AWARD_COLUMNS: &[&str] = &["award_id", "award", "date", "season", "tm_mlbam", "tm_name"];

pub const HOF_COLUMNS: &[&str] = &["season", "date", "mlbam", "name", "pos", "votes", "notes"];

pub const RETIRED_NUMBER_COLUMNS: &[&str] = &["season", "date", "number", "mlbam", "name", "pos"];

const NO_DATE: &str = "--";

pub fn transactions(resp: &TransactionsResponse) -> Table {
    let mut table = Table::new(TRANSACTION_COLUMNS);
    for t in &resp.transactions {
        let person = t.person.as_ref();
        let from = t.from_team.as_ref();
        let to = t.to_team.as_ref();
        table.push_row(vec![
            text_or(person.and_then(|p| p.display_name()), ""),
            int(person.and_then(|p| p.id)),
            text_or(t.type_code.as_deref(), ""),
            text(t.type_desc.as_deref()),
            text(t.description.as_deref()),
            text_or(t.date.as_deref(), NO_DATE),
            text_or(t.effective_date.as_deref(), NO_DATE),
            text_or(t.resolution_date.as_deref(), NO_DATE),
            text_or(entity_name(from), "-"),
            entity_id(from).map_or_else(|| Value::from("-"), Value::from),
            text_or(entity_name(to), "-"),
            entity_id(to).map_or_else(|| Value::from("-"), Value::from),
        ]);
    }
    table
}

fn pick_row(pick: &DraftPick) -> Vec<Value> {
    let p = pick.person.as_ref();
    let home = pick.home.as_ref();
    let school = pick.school.as_ref();
    let draft_type = pick.draft_type.as_ref();
    vec![
        text(pick.year.as_deref()),
        Value::from(pick.bis_player_id.unwrap_or(0)),
        int(p.and_then(|p| p.id)),
        text(p.and_then(|p| p.display_name())),
        text(p.and_then(|p| p.birth_date.as_deref())),
        text(p.and_then(|p| p.birth_city.as_deref())),
        text(p.and_then(|p| p.birth_state_province.as_deref())),
        text(p.and_then(|p| p.birth_country.as_deref())),
        text_or(p.and_then(|p| p.height.as_deref()), "-"),
        Value::from(p.and_then(|p| p.weight).unwrap_or(0)),
        text_or(p.and_then(|p| pos_abbreviation(p.primary_position.as_ref())), "-"),
        text_or(
            p.and_then(|p| p.bat_side.as_ref()).and_then(|s| s.code.as_deref()),
            "-",
        ),
        text_or(
            p.and_then(|p| p.pitch_hand.as_ref()).and_then(|s| s.code.as_deref()),
            "-",
        ),
        Value::from(pick.rank.unwrap_or(0)),
        text_or(pick.pick_round.as_deref(), "-"),
        Value::from(pick.pick_number.unwrap_or(0)),
        Value::from(pick.round_pick_number.unwrap_or(0)),
        text_or(pick.pick_value.as_deref(), "-"),
        text_or(pick.signing_bonus.as_deref(), "-"),
        text(home.and_then(|h| h.city.as_deref())),
        text(home.and_then(|h| h.state.as_deref())),
        text(home.and_then(|h| h.country.as_deref())),
        text(school.and_then(|s| s.name.as_deref())),
        text(school.and_then(|s| s.school_class.as_deref())),
        text(school.and_then(|s| s.state.as_deref())),
        text(school.and_then(|s| s.country.as_deref())),
        text_or(pick.scouting_report.as_deref(), "-"),
        text(pick.headshot_link.as_deref()),
        text(pick.blurb.as_deref()),
        flag(pick.is_drafted),
        flag(pick.is_pass),
        text_or(draft_type.and_then(|d| d.code.as_deref()), "-"),
        text_or(draft_type.and_then(|d| d.description.as_deref()), "-"),
    ]
}

/// One table for draft picks, prospects and a person's `drafts` hydration.
pub fn draft_picks<'a>(picks: impl IntoIterator<Item = &'a DraftPick>) -> Table {
    let mut table = Table::new(DRAFT_COLUMNS);
    for pick in picks {
        table.push_row(pick_row(pick));
    }
    table
}

/// Every pick of every round, in draft order.
pub fn draft(resp: &DraftResponse) -> Table {
    draft_picks(resp.drafts.rounds.iter().flat_map(|r| r.picks.iter()))
}

pub fn prospects(resp: &ProspectsResponse) -> Table {
    draft_picks(resp.prospects.iter())
}

/// Free agents of an offseason. `sort_by` names any column of
/// [`FREE_AGENT_COLUMNS`]; unknown names leave the API order.
pub fn free_agents(resp: &FreeAgentsResponse, sort_by: Option<&str>, descending: bool) -> Table {
    let mut table = Table::new(FREE_AGENT_COLUMNS);
    for fa in &resp.free_agents {
        let p = &fa.player;
        let og = fa.original_team.as_ref();
        let new = fa.new_team.as_ref();
        let pos = fa.position.as_ref().or(p.primary_position.as_ref());
        table.push_row(vec![
            text_or(fa.date_signed.as_deref(), "-"),
            text_or(fa.date_declared.as_deref(), "-"),
            text_or(fa.notes.as_deref(), "-"),
            Value::from(entity_id(og).unwrap_or(0)),
            text_or(entity_name(og), "-"),
            Value::from(entity_id(new).unwrap_or(0)),
            text_or(entity_name(new), "-"),
            int(p.id),
            text(p.display_name()),
            text(p.first_name.as_deref()),
            text(p.last_name.as_deref()),
            text(p.birth_date.as_deref()),
            int(p.current_age),
            text_or(p.bat_side.as_ref().and_then(|s| s.code.as_deref()), "-"),
            text_or(p.pitch_hand.as_ref().and_then(|s| s.code.as_deref()), "-"),
            text_or(pos.and_then(|p| p.code.as_deref()), "-"),
            text_or(pos.and_then(|p| p.name.as_deref()), "-"),
            text_or(pos.and_then(|p| p.position_type.as_deref()), "-"),
            text_or(pos.and_then(|p| p.abbreviation.as_deref()), "-"),
        ]);
    }
    if let Some(column) = sort_by {
        if table.has_column(column) {
            table.sort_by(column, descending);
        } else {
            tracing::warn!("Ignoring unknown free agent sort column {}", column);
        }
    }
    table
}

/// A person's awards.
pub fn awards(resp: &AwardsResponse) -> Table {
    let mut table = Table::new(AWARD_COLUMNS);
    for a in &resp.awards {
        let team = a.team.as_ref();
        table.push_row(vec![
            text_or(a.id.as_deref(), "-"),
            text_or(a.name.as_deref(), "-"),
            text_or(a.date.as_deref(), "-"),
            text_or(a.season.as_deref(), "-"),
            int(entity_id(team)),
            text(entity_name(team)),
        ]);
    }
    table
}

fn recipient(a: &Award) -> (Value, Value, Value) {
    let p = a.player.as_ref();
    (
        int(p.and_then(|p| p.id)),
        text(p.and_then(|p| p.name_first_last.as_deref().or(p.full_name.as_deref()))),
        text_or(
            p.and_then(|p| pos_abbreviation(p.primary_position.as_ref())),
            "",
        ),
    )
}

/// Hall of Fame inductees credited to `team_id`.
pub fn hall_of_fame(resp: &AwardsResponse, team_id: i64) -> Table {
    let mut table = Table::new(HOF_COLUMNS);
    for a in resp
        .awards
        .iter()
        .filter(|a| entity_id(a.team.as_ref()) == Some(team_id))
    {
        let (mlbam, name, pos) = recipient(a);
        table.push_row(vec![
            text(a.season.as_deref()),
            text(a.date.as_deref()),
            mlbam,
            name,
            pos,
            text_or(a.votes.as_deref(), ""),
            text_or(a.notes.as_deref(), ""),
        ]);
    }
    table
}

/// Retired uniform numbers. The number travels in the award's `notes`.
pub fn retired_numbers(resp: &AwardsResponse) -> Table {
    let mut table = Table::new(RETIRED_NUMBER_COLUMNS);
    for a in &resp.awards {
        let (mlbam, name, pos) = recipient(a);
        table.push_row(vec![
            text(a.season.as_deref()),
            text(a.date.as_deref()),
            text(a.notes.as_deref()),
            mlbam,
            name,
            pos,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn transactions_fill_missing_teams_and_dates() {
        let resp: TransactionsResponse = serde_json::from_value(json!({
            "transactions": [
                {"person": {"id": 1, "fullName": "Lucas Giolito"}, "typeCode": "TR", "typeDesc": "Trade",
                 "description": "traded", "date": "2023-07-26",
                 "fromTeam": {"id": 145, "name": "Chicago White Sox"},
                 "toTeam": {"id": 108, "name": "Los Angeles Angels"}},
                {"person": {"id": 2, "fullName": "Nobody"}, "typeCode": "SFA", "typeDesc": "Signed as Free Agent"}
            ]
        }))
        .unwrap();
        let table = transactions(&resp);
        assert_eq!(table.columns(), TRANSACTION_COLUMNS);
        assert_eq!(table.cell(0, "fr_mlbam"), Some(&json!(145)));
        assert_eq!(table.cell(0, "e_date"), Some(&json!("--")));
        assert_eq!(table.cell(1, "fr"), Some(&json!("-")));
        assert_eq!(table.cell(1, "to_mlbam"), Some(&json!("-")));
    }

    #[test]
    fn draft_flattens_rounds_in_order() {
        let resp: DraftResponse = serde_json::from_value(json!({
            "drafts": {"draftYear": 2020, "rounds": [
                {"round": "1", "picks": [
                    {"year": "2020", "pickRound": "1", "pickNumber": 1, "roundPickNumber": 1,
                     "pickValue": "8415300", "isDrafted": true,
                     "person": {"id": 10, "fullName": "Spencer Torkelson",
                                "primaryPosition": {"abbreviation": "3B"}, "batSide": {"code": "R"}},
                     "school": {"name": "Arizona State"},
                     "draftType": {"code": "JR", "description": "June Amateur Draft"}}
                ]},
                {"round": "2", "picks": [{"year": 2020, "pickRound": "2", "pickNumber": 38}]}
            ]}
        }))
        .unwrap();
        let table = draft(&resp);
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), DRAFT_COLUMNS);
        assert_eq!(table.cell(0, "pos"), Some(&json!("3B")));
        assert_eq!(table.cell(0, "throws"), Some(&json!("-")));
        assert_eq!(table.cell(0, "is_drafted"), Some(&json!(true)));
        assert_eq!(table.cell(1, "season"), Some(&json!("2020")));
        assert_eq!(table.cell(1, "weight"), Some(&json!(0)));
        assert_eq!(table.cell(1, "is_pass"), Some(&json!(false)));
    }

    #[test]
    fn free_agents_default_and_sort() {
        let resp: FreeAgentsResponse = serde_json::from_value(json!({
            "freeAgents": [
                {"player": {"id": 2, "fullName": "Zack Z"}, "originalTeam": {"id": 145, "name": "Chicago White Sox"},
                 "position": {"code": "1", "name": "Pitcher", "type": "Pitcher", "abbreviation": "P"}},
                {"player": {"id": 1, "fullName": "Aaron A"}, "notes": "Signed", "newTeam": {"id": 147, "name": "New York Yankees"}}
            ]
        }))
        .unwrap();
        let unsorted = free_agents(&resp, None, false);
        assert_eq!(unsorted.cell(0, "mlbam"), Some(&json!(2)));
        assert_eq!(unsorted.cell(0, "notes"), Some(&json!("-")));
        assert_eq!(unsorted.cell(0, "new_tm_mlbam"), Some(&json!(0)));
        assert_eq!(unsorted.cell(1, "pos_abbreviation"), Some(&json!("-")));

        let sorted = free_agents(&resp, Some("name"), false);
        assert_eq!(sorted.cell(0, "name"), Some(&json!("Aaron A")));
        assert_eq!(free_agents(&resp, Some("bogus"), true).cell(0, "mlbam"), Some(&json!(2)));
    }

    #[test]
    fn hall_of_fame_keeps_only_the_team() {
        let resp: AwardsResponse = serde_json::from_value(json!({
            "awards": [
                {"season": 2014, "date": "2014-07-27", "team": {"id": 145}, "votes": 478, "notes": "BBWAA",
                 "player": {"id": 123, "nameFirstLast": "Frank Thomas", "primaryPosition": {"abbreviation": "1B"}}},
                {"season": 1999, "team": {"id": 111}, "player": {"id": 9, "nameFirstLast": "Someone Else"}}
            ]
        }))
        .unwrap();
        let table = hall_of_fame(&resp, 145);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "season"), Some(&json!("2014")));
        assert_eq!(table.cell(0, "votes"), Some(&json!("478")));
        assert_eq!(table.cell(0, "pos"), Some(&json!("1B")));
    }

    #[test]
    fn retired_numbers_read_notes() {
        let resp: AwardsResponse = serde_json::from_value(json!({
            "awards": [{"season": "2010", "notes": "35", "player": {"id": 123, "nameFirstLast": "Frank Thomas"}}]
        }))
        .unwrap();
        let table = retired_numbers(&resp);
        assert_eq!(table.cell(0, "number"), Some(&json!("35")));
        assert_eq!(table.cell(0, "pos"), Some(&json!("")));
    }

    #[test]
    fn awards_use_placeholders() {
        let resp: AwardsResponse = serde_json::from_value(json!({
            "awards": [{"id": "ALMVP", "name": "AL MVP", "season": "1993", "team": {"id": 145, "name": "White Sox"}},
                       {}]
        }))
        .unwrap();
        let table = awards(&resp);
        assert_eq!(table.cell(0, "tm_name"), Some(&json!("White Sox")));
        assert_eq!(table.cell(1, "award_id"), Some(&json!("-")));
        assert_eq!(table.cell(1, "tm_mlbam"), Some(&Value::Null));
    }
}
