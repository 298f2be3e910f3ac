use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CodeDescription, DisplayName, EntityRef, Person, Position, Team};

/// Body of `/people/{id}/stats`, `/teams/{id}/stats`, `/teams/stats` and `/stats`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsResponse {
    pub stats: Vec<StatBlock>,
}

/// One `(type, group)` block of splits.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBlock {
    #[serde(rename = "type")]
    pub stat_type: DisplayName,
    pub group: DisplayName,
    pub total_splits: Option<i64>,
    pub splits: Vec<StatSplit>,
}

/// A single stat line and whatever context the endpoint attached to it.
///
/// The stat line itself stays a loose map: its keys depend on the group,
/// on whether the type is advanced, and for play/pitch logs it holds a
/// nested `play` object instead of counting stats.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatSplit {
    #[serde(deserialize_with = "super::de::opt_string")]
    pub season: Option<String>,
    pub stat: Map<String, Value>,
    pub team: Option<Team>,
    pub opponent: Option<Team>,
    pub league: Option<EntityRef>,
    pub sport: Option<EntityRef>,
    pub player: Option<Person>,
    pub batter: Option<Person>,
    pub pitcher: Option<Person>,
    pub game: Option<GameRef>,
    pub date: Option<String>,
    pub is_home: Option<bool>,
    pub is_win: Option<bool>,
    pub game_type: Option<String>,
    pub split: Option<CodeDescription>,
    pub position: Option<Position>,
    pub positions_played: Vec<Position>,
    pub rank: Option<i64>,
    pub num_teams: Option<i64>,
}

impl StatSplit {
    /// The person the line belongs to under `key` (`player`, `batter` or `pitcher`).
    pub fn person(&self, key: &str) -> Option<&Person> {
        match key {
            "batter" => self.batter.as_ref(),
            "pitcher" => self.pitcher.as_ref(),
            "player" => self.player.as_ref(),
            _ => None,
        }
    }

    pub fn sport_id(&self) -> Option<i64> {
        self.sport.as_ref().and_then(|s| s.id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameRef {
    pub game_pk: Option<i64>,
    pub game_number: Option<i64>,
    pub day_night: Option<String>,
    pub link: Option<String>,
}
