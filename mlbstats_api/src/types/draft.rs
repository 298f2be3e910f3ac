use serde::{Deserialize, Serialize};

use super::{CodeDescription, EntityRef, Person};

/// Body of `/draft/{year}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftResponse {
    pub drafts: DraftRounds,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftRounds {
    pub draft_year: Option<i64>,
    pub rounds: Vec<DraftRound>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftRound {
    pub round: Option<String>,
    pub picks: Vec<DraftPick>,
}

/// Body of `/draft/prospects/{year}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProspectsResponse {
    pub prospects: Vec<DraftPick>,
}

/// A draft pick or prospect. Also the shape of a person's `drafts` hydration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPick {
    pub bis_player_id: Option<i64>,
    pub pick_round: Option<String>,
    pub pick_number: Option<i64>,
    pub round_pick_number: Option<i64>,
    pub rank: Option<i64>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub pick_value: Option<String>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub signing_bonus: Option<String>,
    pub home: Option<DraftHome>,
    pub scouting_report: Option<String>,
    pub school: Option<DraftSchool>,
    pub blurb: Option<String>,
    pub headshot_link: Option<String>,
    pub person: Option<Person>,
    pub team: Option<EntityRef>,
    pub draft_type: Option<CodeDescription>,
    pub is_drafted: Option<bool>,
    pub is_pass: Option<bool>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub year: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftHome {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftSchool {
    pub name: Option<String>,
    pub school_class: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}
