use serde::{Deserialize, Serialize};

use super::EntityRef;

/// Body of `/leagues`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaguesResponse {
    pub leagues: Vec<League>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct League {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub name_short: Option<String>,
    pub abbreviation: Option<String>,
    pub season: Option<String>,
    pub active: Option<bool>,
    pub sport: Option<EntityRef>,
}

/// Body of `/venues`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VenuesResponse {
    pub venues: Vec<Venue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Venue {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub location: Option<VenueLocation>,
    pub time_zone: Option<VenueTimeZone>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VenueLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_abbrev: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VenueTimeZone {
    pub id: Option<String>,
    pub offset: Option<i64>,
    pub tz: Option<String>,
}

/// Body of `/seasons`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonsResponse {
    pub seasons: Vec<Season>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Season {
    pub season_id: Option<String>,
    pub season_start_date: Option<String>,
    pub season_end_date: Option<String>,
    pub regular_season_start_date: Option<String>,
    pub regular_season_end_date: Option<String>,
    pub post_season_start_date: Option<String>,
    pub post_season_end_date: Option<String>,
}
