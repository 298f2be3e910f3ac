use serde::{Deserialize, Serialize};

use super::{CodeDescription, DraftPick, EntityRef, Position, StatBlock, Team};

/// Body of `/people/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PeopleResponse {
    pub people: Vec<Person>,
}

/// A person as returned by `/people`, or as embedded in rosters, stat
/// splits, awards and transactions (with far fewer fields populated).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: Option<i64>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub use_name: Option<String>,
    pub name_first_last: Option<String>,
    pub last_init_name: Option<String>,
    pub nick_name: Option<String>,
    pub name_slug: Option<String>,
    pub last_first_name: Option<String>,
    #[serde(rename = "fullFMLName")]
    pub full_fml_name: Option<String>,
    pub middle_name: Option<String>,
    pub pronunciation: Option<String>,
    pub primary_number: Option<String>,
    pub birth_date: Option<String>,
    pub current_age: Option<i64>,
    pub birth_city: Option<String>,
    pub birth_state_province: Option<String>,
    pub birth_country: Option<String>,
    pub death_date: Option<String>,
    pub death_city: Option<String>,
    pub death_state_province: Option<String>,
    pub death_country: Option<String>,
    pub height: Option<String>,
    pub weight: Option<i64>,
    pub active: Option<bool>,
    pub primary_position: Option<Position>,
    pub bat_side: Option<CodeDescription>,
    pub pitch_hand: Option<CodeDescription>,
    pub strike_zone_top: Option<f64>,
    pub strike_zone_bottom: Option<f64>,
    pub mlb_debut_date: Option<String>,
    pub last_played_date: Option<String>,
    pub draft_year: Option<i64>,
    pub current_team: Option<Team>,
    pub roster_entries: Vec<RosterEntryRecord>,
    pub education: Education,
    pub drafts: Vec<DraftPick>,
    pub stats: Vec<StatBlock>,
    pub link: Option<String>,
}

impl Person {
    /// Display name, preferring `fullName`.
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .or(self.name_first_last.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub highschools: Vec<School>,
    pub colleges: Vec<School>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct School {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Entry in a person's `rosterEntries` hydration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterEntryRecord {
    pub jersey_number: Option<String>,
    pub position: Option<Position>,
    pub status: Option<CodeDescription>,
    pub team: Option<Team>,
    pub is_active: Option<bool>,
    pub is_active_forty_man: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status_date: Option<String>,
}

/// Body of `/people/{id}/awards` and `/awards/{id}/recipients`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AwardsResponse {
    pub awards: Vec<Award>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Award {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub season: Option<String>,
    pub team: Option<EntityRef>,
    pub player: Option<Person>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub votes: Option<String>,
    pub notes: Option<String>,
}

/// Body of `/people/freeAgents`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FreeAgentsResponse {
    pub free_agents: Vec<FreeAgent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FreeAgent {
    pub player: Person,
    pub original_team: Option<EntityRef>,
    pub new_team: Option<EntityRef>,
    pub notes: Option<String>,
    pub date_signed: Option<String>,
    pub date_declared: Option<String>,
    pub position: Option<Position>,
}
