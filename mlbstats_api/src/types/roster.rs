use serde::{Deserialize, Serialize};

use super::{CodeDescription, Person, Position};

/// Body of `/teams/{id}/roster[/{rosterType}]`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterResponse {
    pub roster: Vec<RosterEntry>,
    pub team_id: Option<i64>,
    pub roster_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterEntry {
    pub person: Person,
    pub jersey_number: Option<String>,
    pub position: Option<Position>,
    pub status: Option<CodeDescription>,
    /// Coaching rosters carry a job title instead of a position.
    pub job: Option<String>,
    pub job_id: Option<String>,
    pub title: Option<String>,
}
