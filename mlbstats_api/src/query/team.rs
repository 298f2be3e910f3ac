use url::Url;

use super::common::{Query, QueryCommon};

/// Parameters for `/teams` and `/teams/{id}`.
#[derive(Default, Clone, Debug)]
pub struct TeamQuery {
    pub common: QueryCommon,
    pub season: Option<i32>,
    pub league_ids: Vec<i64>,
}

impl Query for TeamQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        if !self.league_ids.is_empty() {
            url.query_pairs_mut()
                .append_pair("leagueIds", &super::join_values(&self.league_ids));
        }
        url
    }
}

impl TeamQuery {
    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_league_id(mut self, league_id: i64) -> Self {
        self.league_ids.push(league_id);
        self
    }
}

/// Parameters for `/people/{id}`.
#[derive(Default, Clone, Debug)]
pub struct PersonQuery {
    pub common: QueryCommon,
    pub season: Option<i32>,
    pub app_context: Option<String>,
}

impl Query for PersonQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        if let Some(app_context) = &self.app_context {
            url.query_pairs_mut()
                .append_pair("appContext", app_context);
        }
        url
    }
}

impl PersonQuery {
    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_app_context(mut self, app_context: &str) -> Self {
        self.app_context = Some(app_context.to_string());
        self
    }
}
