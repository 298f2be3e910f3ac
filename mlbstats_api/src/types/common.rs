use serde::{Deserialize, Serialize};

/// A reference to another entity (league, division, sport, venue, ...).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub name_short: Option<String>,
    pub abbreviation: Option<String>,
    pub link: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeDescription {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Wrapper used by the stats endpoints for `type` and `group`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayName {
    pub display_name: Option<String>,
}

impl DisplayName {
    pub fn as_str(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Position {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub position_type: Option<String>,
    pub abbreviation: Option<String>,
}
