use serde::{Deserialize, Serialize};

use super::{EntityRef, Person};

/// Body of `/transactions`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: Option<i64>,
    pub person: Option<Person>,
    pub from_team: Option<EntityRef>,
    pub to_team: Option<EntityRef>,
    pub date: Option<String>,
    pub effective_date: Option<String>,
    pub resolution_date: Option<String>,
    pub type_code: Option<String>,
    pub type_desc: Option<String>,
    pub description: Option<String>,
}
