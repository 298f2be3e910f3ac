use serde::{Deserialize, Serialize};

use super::{EntityRef, Schedule};

/// Body of `/teams` and `/teams/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub short_name: Option<String>,
    pub franchise_name: Option<String>,
    pub club_name: Option<String>,
    pub location_name: Option<String>,
    pub abbreviation: Option<String>,
    pub team_code: Option<String>,
    pub file_code: Option<String>,
    #[serde(deserialize_with = "super::de::opt_i64")]
    pub first_year_of_play: Option<i64>,
    pub season: Option<i64>,
    pub active: Option<bool>,
    pub all_star_status: Option<String>,
    pub league: Option<EntityRef>,
    pub division: Option<EntityRef>,
    pub sport: Option<EntityRef>,
    pub venue: Option<EntityRef>,
    pub spring_league: Option<EntityRef>,
    pub spring_venue: Option<EntityRef>,
    pub parent_org_id: Option<i64>,
    pub parent_org_name: Option<String>,
    pub record: Option<TeamRecord>,
    pub next_game_schedule: Option<Schedule>,
    pub previous_game_schedule: Option<Schedule>,
    pub link: Option<String>,
}

/// Season record attached by `hydrate=standings`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamRecord {
    pub games_played: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub winning_percentage: Option<String>,
    pub runs_scored: Option<i64>,
    pub runs_allowed: Option<i64>,
    pub run_differential: Option<i64>,
    pub games_back: Option<String>,
    pub wild_card_games_back: Option<String>,
    pub division_games_back: Option<String>,
    pub league_games_back: Option<String>,
    pub sport_games_back: Option<String>,
    pub division_rank: Option<String>,
    pub league_rank: Option<String>,
    pub records: RecordBreakdown,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordBreakdown {
    pub split_records: Vec<SplitRecord>,
    pub league_records: Vec<LeagueRecord>,
    pub division_records: Vec<DivisionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitRecord {
    #[serde(rename = "type")]
    pub split_type: Option<String>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub pct: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeagueRecord {
    pub league: EntityRef,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub pct: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DivisionRecord {
    pub division: EntityRef,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub pct: Option<String>,
}
