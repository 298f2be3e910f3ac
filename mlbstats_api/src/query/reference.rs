use url::Url;

use super::common::{Query, QueryCommon};

/// Parameters for the reference endpoints (`/leagues`, `/venues`, `/seasons`, `/teams`).
#[derive(Default, Clone, Debug)]
pub struct ReferenceQuery {
    pub common: QueryCommon,
    pub season: Option<i32>,
    pub all_seasons: bool,
}

impl Query for ReferenceQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        if self.all_seasons {
            url.query_pairs_mut().append_pair("all", "true");
        }
        url
    }
}

impl ReferenceQuery {
    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    /// Asks `/seasons` for every season on record.
    pub fn with_all_seasons(mut self) -> Self {
        self.all_seasons = true;
        self
    }
}
