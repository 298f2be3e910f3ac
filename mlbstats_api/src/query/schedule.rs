use chrono::NaiveDate;
use url::Url;

use crate::types::GameType;

use super::common::{Query, QueryCommon};
use super::{join_values, DATE_FORMAT};

/// Parameters for `/schedule`.
#[derive(Clone, Debug)]
pub struct ScheduleQuery {
    pub common: QueryCommon,
    pub team_id: Option<i64>,
    pub opponent_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub season: Option<i32>,
    pub game_types: Vec<GameType>,
}

impl Default for ScheduleQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon {
                sport_id: Some(1),
                ..QueryCommon::default()
            },
            team_id: None,
            opponent_id: None,
            date: None,
            start_date: None,
            end_date: None,
            season: None,
            game_types: Vec::new(),
        }
    }
}

impl Query for ScheduleQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(team_id) = self.team_id {
            url.query_pairs_mut()
                .append_pair("teamId", &team_id.to_string());
        }
        if let Some(opponent_id) = self.opponent_id {
            url.query_pairs_mut()
                .append_pair("opponentId", &opponent_id.to_string());
        }
        if let Some(season) = self.season {
            url.query_pairs_mut()
                .append_pair("season", &season.to_string());
        }
        if let Some(date) = self.date {
            url.query_pairs_mut()
                .append_pair("date", &date.format(DATE_FORMAT).to_string());
        }
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("startDate", &start_date.format(DATE_FORMAT).to_string());
        }
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("endDate", &end_date.format(DATE_FORMAT).to_string());
        }
        if !self.game_types.is_empty() {
            url.query_pairs_mut()
                .append_pair("gameType", &join_values(&self.game_types));
        }
        url
    }
}

impl ScheduleQuery {
    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_opponent(mut self, opponent_id: i64) -> Self {
        self.opponent_id = Some(opponent_id);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_types.push(game_type);
        self
    }
    pub fn with_game_types(mut self, game_types: &[GameType]) -> Self {
        self.game_types.extend_from_slice(game_types);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use url::Url;

    use crate::{
        query::{Query, ScheduleQuery},
        types::GameType,
    };

    #[test]
    fn test_schedule_query() {
        let url = Url::parse("https://example.com/schedule").unwrap();

        insta::assert_snapshot!(ScheduleQuery::default().add_to_url(&url).to_string(), @"https://example.com/schedule?sportId=1");

        insta::assert_snapshot!(ScheduleQuery::default()
            .with_team(145)
            .with_season(2021)
            .with_date_range(
                NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            )
            .with_game_types(&GameType::ALL)
            .with_hydrate("game(content(media(epg))),team")
            .add_to_url(&url)
            .to_string(), @"https://example.com/schedule?sportId=1&hydrate=game%28content%28media%28epg%29%29%29%2Cteam&teamId=145&season=2021&startDate=2021-12-01&endDate=2021-12-31&gameType=S%2CR%2CF%2CD%2CL%2CW%2CC%2CP%2CA%2CE%2CI");

        insta::assert_snapshot!(ScheduleQuery::default()
            .with_team(147)
            .with_opponent(111)
            .with_date(NaiveDate::from_ymd_opt(2022, 7, 4).unwrap())
            .add_to_url(&url)
            .to_string(), @"https://example.com/schedule?sportId=1&teamId=147&opponentId=111&date=2022-07-04");
    }
}
