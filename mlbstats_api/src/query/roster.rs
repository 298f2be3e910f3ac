use chrono::NaiveDate;
use url::Url;

use crate::types::RosterType;

use super::common::{Query, QueryCommon};
use super::DATE_FORMAT;

/// Parameters for `/teams/{id}/roster`. The roster type is part of the path.
#[derive(Default, Clone, Debug)]
pub struct RosterQuery {
    pub common: QueryCommon,
    pub roster_type: Option<RosterType>,
    pub season: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl Query for RosterQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        if let Some(date) = self.date {
            url.query_pairs_mut()
                .append_pair("date", &date.format(DATE_FORMAT).to_string());
        }
        url
    }
}

impl RosterQuery {
    pub fn with_roster_type(mut self, roster_type: RosterType) -> Self {
        self.roster_type = Some(roster_type);
        self
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Path suffix for the roster type, e.g. `/40Man`. Empty when unset.
    pub fn path_suffix(&self) -> String {
        match self.roster_type {
            Some(rt) => format!("/{}", rt),
            None => String::new(),
        }
    }
}
