use chrono::NaiveDate;
use url::Url;

use super::common::{Query, QueryCommon};
use super::DATE_FORMAT;

/// Parameters for `/transactions`.
#[derive(Default, Clone, Debug)]
pub struct TransactionQuery {
    pub common: QueryCommon,
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Query for TransactionQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(team_id) = self.team_id {
            url.query_pairs_mut()
                .append_pair("teamId", &team_id.to_string());
        }
        if let Some(player_id) = self.player_id {
            url.query_pairs_mut()
                .append_pair("playerId", &player_id.to_string());
        }
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("startDate", &start_date.format(DATE_FORMAT).to_string());
        }
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("endDate", &end_date.format(DATE_FORMAT).to_string());
        }
        url
    }
}

impl TransactionQuery {
    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_player(mut self, player_id: i64) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// Parameters for `/draft/{year}` and `/draft/prospects/{year}` (the client picks the path).
#[derive(Clone, Debug)]
pub struct DraftQuery {
    pub common: QueryCommon,
    pub team_id: Option<i64>,
    pub round: Option<String>,
    pub limit: Option<i64>,
}

impl Default for DraftQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon {
                sport_id: Some(1),
                ..QueryCommon::default()
            },
            team_id: None,
            round: None,
            limit: None,
        }
    }
}

impl Query for DraftQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(team_id) = self.team_id {
            url.query_pairs_mut()
                .append_pair("teamId", &team_id.to_string());
        }
        if let Some(round) = &self.round {
            url.query_pairs_mut().append_pair("round", round);
        }
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        url
    }
}

impl DraftQuery {
    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_round(mut self, round: &str) -> Self {
        self.round = Some(round.to_string());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Parameters for `/people/freeAgents`.
#[derive(Default, Clone, Debug)]
pub struct FreeAgentQuery {
    pub common: QueryCommon,
    pub season: Option<i32>,
}

impl Query for FreeAgentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        url
    }
}

impl FreeAgentQuery {
    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    /// Hydrates each entry's person with bio fields.
    pub fn with_person(self) -> Self {
        self.with_hydrate("person")
    }
}
