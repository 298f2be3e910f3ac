use chrono::NaiveDate;
use url::Url;

use crate::types::{GameType, PlayerPool, StatGroup, StatType};

use super::common::{Query, QueryCommon};
use super::{join_values, DATE_FORMAT};

/// Parameters for the stats endpoints (`/people/{id}/stats`,
/// `/teams/{id}/stats`, `/teams/stats`, `/stats`).
#[derive(Default, Clone, Debug)]
pub struct StatsQuery {
    pub common: QueryCommon,
    pub stat_types: Vec<StatType>,
    pub groups: Vec<StatGroup>,
    pub seasons: Vec<i32>,
    pub game_types: Vec<GameType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date: Option<NaiveDate>,
    pub opposing_team_id: Option<i64>,
    pub opposing_player_id: Option<i64>,
    pub sit_codes: Vec<String>,
    pub event_types: Vec<String>,
    pub pitch_types: Vec<String>,
    pub player_pool: Option<PlayerPool>,
    pub league_ids: Vec<i64>,
    pub limit: Option<i64>,
}

impl Query for StatsQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if !self.stat_types.is_empty() {
            url.query_pairs_mut()
                .append_pair("stats", &join_values(&self.stat_types));
        }
        if !self.groups.is_empty() {
            url.query_pairs_mut()
                .append_pair("group", &join_values(&self.groups));
        }
        if !self.seasons.is_empty() {
            url.query_pairs_mut()
                .append_pair("season", &join_values(&self.seasons));
        }
        if !self.game_types.is_empty() {
            url.query_pairs_mut()
                .append_pair("gameType", &join_values(&self.game_types));
        }
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("startDate", &start_date.format(DATE_FORMAT).to_string());
        }
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("endDate", &end_date.format(DATE_FORMAT).to_string());
        }
        if let Some(date) = self.date {
            url.query_pairs_mut()
                .append_pair("date", &date.format(DATE_FORMAT).to_string());
        }
        if let Some(team_id) = self.opposing_team_id {
            url.query_pairs_mut()
                .append_pair("opposingTeamId", &team_id.to_string());
        }
        if let Some(player_id) = self.opposing_player_id {
            url.query_pairs_mut()
                .append_pair("opposingPlayerId", &player_id.to_string());
        }
        if !self.sit_codes.is_empty() {
            url.query_pairs_mut()
                .append_pair("sitCodes", &self.sit_codes.join(","));
        }
        if !self.event_types.is_empty() {
            url.query_pairs_mut()
                .append_pair("eventType", &self.event_types.join(","));
        }
        if !self.pitch_types.is_empty() {
            url.query_pairs_mut()
                .append_pair("pitchType", &self.pitch_types.join(","));
        }
        if let Some(pool) = self.player_pool {
            url.query_pairs_mut()
                .append_pair("playerPool", pool.as_str());
        }
        if !self.league_ids.is_empty() {
            url.query_pairs_mut()
                .append_pair("leagueIds", &join_values(&self.league_ids));
        }
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        url
    }
}

impl StatsQuery {
    pub fn with_stat_type(mut self, stat_type: StatType) -> Self {
        self.stat_types.push(stat_type);
        self
    }
    pub fn with_stat_types(mut self, stat_types: &[StatType]) -> Self {
        self.stat_types.extend_from_slice(stat_types);
        self
    }

    pub fn with_group(mut self, group: StatGroup) -> Self {
        self.groups.push(group);
        self
    }
    pub fn with_groups(mut self, groups: &[StatGroup]) -> Self {
        self.groups.extend_from_slice(groups);
        self
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.seasons.push(season);
        self
    }
    pub fn with_seasons(mut self, seasons: &[i32]) -> Self {
        self.seasons.extend_from_slice(seasons);
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

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_opposing_team(mut self, team_id: i64) -> Self {
        self.opposing_team_id = Some(team_id);
        self
    }

    pub fn with_opposing_player(mut self, player_id: i64) -> Self {
        self.opposing_player_id = Some(player_id);
        self
    }

    pub fn with_sit_code(mut self, sit_code: &str) -> Self {
        self.sit_codes.push(sit_code.to_string());
        self
    }
    pub fn with_sit_codes(mut self, sit_codes: &[String]) -> Self {
        self.sit_codes.extend_from_slice(sit_codes);
        self
    }

    pub fn with_event_type(mut self, event_type: &str) -> Self {
        self.event_types.push(event_type.to_string());
        self
    }
    pub fn with_event_types(mut self, event_types: &[String]) -> Self {
        self.event_types.extend_from_slice(event_types);
        self
    }

    pub fn with_pitch_type(mut self, pitch_type: &str) -> Self {
        self.pitch_types.push(pitch_type.to_string());
        self
    }
    pub fn with_pitch_types(mut self, pitch_types: &[String]) -> Self {
        self.pitch_types.extend_from_slice(pitch_types);
        self
    }

    pub fn with_player_pool(mut self, pool: PlayerPool) -> Self {
        self.player_pool = Some(pool);
        self
    }

    pub fn with_league_id(mut self, league_id: i64) -> Self {
        self.league_ids.push(league_id);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
