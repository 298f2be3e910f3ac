//! The public face of the library: one method per question you can ask.
//!
//! Each method resolves defaults (season in progress, else last completed),
//! validates its inputs, builds a query, fetches and hands the response to
//! the matching parser in [`crate::parse`].

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use regex::Regex;

use mlbstats_api::types::{GameType, PlayerPool, RosterType, StatGroup, StatType, StatsResponse};
use mlbstats_api::{
    Client, DraftQuery, FreeAgentQuery, PersonQuery, Query, RosterQuery, ScheduleQuery,
    StatsQuery, TeamQuery, TransactionQuery,
};

use crate::bulk::{self, FranchiseData, PlayerData, TeamData};
use crate::config::{Settings, DEFAULT_TIMEZONE};
use crate::error::MlbStatsError;
use crate::parse::person::{player_info, PlayerInfo};
use crate::parse::stats::{self, LeagueLeaders};
use crate::parse::{roster, schedule, team, transactions};
use crate::reference::{ReferenceData, SeasonFilter};
use crate::table::Table;
use crate::validation::{
    month_bounds, validate_date, validate_date_range, validate_league, validate_search,
    validate_season, validate_sit_codes, validate_stat_requirements,
};

pub const SAVANT_VIDEO_URL: &str = "https://baseballsavant.mlb.com/sporty-videos";

const PLAY_HYDRATE: &str = "hitData,pitchData";
const PLAYER_INFO_HYDRATE: &str = "currentTeam,rosterEntries(team),education,draft";
const SCHEDULE_HYDRATE: &str = "broadcasts(all),linescore,game(content(media(epg)))";
const HIGHLIGHT_HYDRATE: &str =
    "game(content(media(all),summary,gamenotes,highlights(highlights)))";
const APPEARANCE_FIELDS: &str = "stats,splits,stat,wins,losses,season";
const MAJOR_LEAGUE: &str = "majorLeague";
const LEADER_GROUPS: [StatGroup; 2] = [StatGroup::Hitting, StatGroup::Pitching];

/// Optional filters shared by the stat, log and search methods.
/// Dates are `YYYY-MM-DD` strings and are validated before use.
#[derive(Clone, Debug, Default)]
pub struct StatFilters {
    pub season: Option<i32>,
    pub game_types: Vec<GameType>,
    pub opposing_team: Option<i64>,
    pub opposing_player: Option<i64>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_types: Vec<String>,
    pub pitch_types: Vec<String>,
}

/// Which games a schedule call covers. A date range wins over a single
/// date, which wins over a month, which wins over a season.
#[derive(Clone, Debug, Default)]
pub struct ScheduleFilters {
    pub team: Option<i64>,
    pub opponent: Option<i64>,
    pub season: Option<i32>,
    /// Needs `season`.
    pub month: Option<u32>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub game_types: Vec<GameType>,
    /// Replaces the default hydration.
    pub hydrate: Option<String>,
}

/// API client plus the reference tables used to enrich its responses.
pub struct MlbStats {
    client: Client,
    refs: ReferenceData,
    timezone: Tz,
}

impl Default for MlbStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MlbStats {
    /// Production API, bundled reference tables, Eastern time.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            refs: ReferenceData::bundled(),
            timezone: DEFAULT_TIMEZONE,
        }
    }

    /// Creates a facade against a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::with_base_url(base_url),
            ..Self::new()
        }
    }

    /// Wires up base URL, timeout, reference directory and display timezone.
    pub fn from_settings(settings: &Settings) -> Result<Self, MlbStatsError> {
        let refs = match &settings.data_dir {
            Some(dir) => ReferenceData::load(dir)?,
            None => ReferenceData::bundled(),
        };
        tracing::debug!(
            "MlbStats against {} ({} teams, {} seasons loaded)",
            settings.base_url,
            refs.teams.len(),
            refs.seasons.len()
        );
        Ok(Self {
            client: Client::with_base_url(&settings.base_url).with_timeout(settings.timeout),
            refs,
            timezone: settings.timezone,
        })
    }

    pub fn with_reference_data(mut self, refs: ReferenceData) -> Self {
        self.refs = refs;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn refs(&self) -> &ReferenceData {
        &self.refs
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Today in the display timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Season in progress, else the last completed one.
    pub fn default_season(&self) -> i32 {
        self.refs.default_season(self.today())
    }

    fn season_or_default(&self, season: Option<i32>) -> Result<i32, MlbStatsError> {
        match season {
            Some(s) => validate_season(s),
            None => Ok(self.default_season()),
        }
    }

    /// Re-downloads leagues, venues, seasons and the current season's teams.
    pub async fn refresh_reference_data(&mut self) -> Result<(), MlbStatsError> {
        self.refs.refresh_leagues(&self.client).await?;
        self.refs.refresh_venues(&self.client).await?;
        self.refs.refresh_seasons(&self.client).await?;
        let season = self.default_season();
        self.refs.refresh_teams(&self.client, season).await
    }

    // -- Player --

    async fn player_career(
        &self,
        person_id: i64,
        group: StatGroup,
        advanced: bool,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        let stat_types = if advanced {
            [StatType::CareerAdvanced, StatType::YearByYearAdvanced]
        } else {
            [StatType::Career, StatType::YearByYear]
        };
        let query = StatsQuery::default()
            .with_stat_types(&stat_types)
            .with_group(group)
            .with_game_types(game_types);
        let resp = self.client.person_stats(person_id, &query).await?;
        Ok(stats::career_and_seasons(&resp, &self.refs, group, advanced))
    }

    /// Career and year-by-year hitting. Empty `game_types` sends no
    /// `gameType`, which the API answers with regular-season rows only.
    pub async fn player_hitting(
        &self,
        person_id: i64,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        self.player_career(person_id, StatGroup::Hitting, false, game_types)
            .await
    }

    pub async fn player_pitching(
        &self,
        person_id: i64,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        self.player_career(person_id, StatGroup::Pitching, false, game_types)
            .await
    }

    pub async fn player_fielding(
        &self,
        person_id: i64,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        self.player_career(person_id, StatGroup::Fielding, false, game_types)
            .await
    }

    pub async fn player_hitting_advanced(
        &self,
        person_id: i64,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        self.player_career(person_id, StatGroup::Hitting, true, game_types)
            .await
    }

    pub async fn player_pitching_advanced(
        &self,
        person_id: i64,
        game_types: &[GameType],
    ) -> Result<Table, MlbStatsError> {
        self.player_career(person_id, StatGroup::Pitching, true, game_types)
            .await
    }

    /// Any stat type for one group. Matchup types need an opposing team or
    /// player, date range types need both dates. Play and pitch logs come
    /// back one row per play.
    pub async fn player_stats(
        &self,
        person_id: i64,
        group: StatGroup,
        stat_types: &[StatType],
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        if stat_types.is_empty() {
            return Err(MlbStatsError::InvalidInput(
                "at least one stat type is required".to_string(),
            ));
        }
        let range =
            validate_date_range(filters.start_date.as_deref(), filters.end_date.as_deref())?;
        validate_stat_requirements(
            stat_types,
            filters.opposing_team,
            filters.opposing_player,
            range.is_some(),
        )?;

        let mut query = apply_filters(
            StatsQuery::default().with_stat_types(stat_types).with_group(group),
            filters,
            range,
        )?;
        if range.is_none() {
            query = query.with_season(self.season_or_default(filters.season)?);
        }
        let resp = self.client.person_stats(person_id, &query).await?;

        let tables = stat_types
            .iter()
            .map(|st| {
                if st.is_log() {
                    stats::play_log(&resp, *st, group)
                } else {
                    stats::player_stats(&resp, &self.refs, *st, group)
                }
            })
            .collect();
        Ok(Table::concat(tables))
    }

    /// One row per game for a season (default: current).
    pub async fn player_game_logs(
        &self,
        person_id: i64,
        group: StatGroup,
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        let range =
            validate_date_range(filters.start_date.as_deref(), filters.end_date.as_deref())?;
        let query = apply_filters(
            StatsQuery::default()
                .with_stat_type(StatType::GameLog)
                .with_group(group)
                .with_season(self.season_or_default(filters.season)?),
            filters,
            range,
        )?;
        let resp = self.client.person_stats(person_id, &query).await?;
        Ok(stats::player_game_log(&resp, group))
    }

    async fn player_by_date_range(
        &self,
        person_id: i64,
        group: StatGroup,
        start_date: &str,
        end_date: &str,
        game_type: Option<GameType>,
        advanced: bool,
    ) -> Result<Table, MlbStatsError> {
        let (start, end) = validate_date_range(Some(start_date), Some(end_date))?
            .ok_or_else(|| MlbStatsError::InvalidInput("a date range is required".to_string()))?;
        let stat_type = if advanced {
            StatType::ByDateRangeAdvanced
        } else {
            StatType::ByDateRange
        };
        let mut query = StatsQuery::default()
            .with_stat_type(stat_type)
            .with_group(group)
            .with_date_range(start, end);
        if let Some(gt) = game_type {
            query = query.with_game_type(gt);
        }
        let resp = self.client.person_stats(person_id, &query).await?;
        Ok(stats::date_range(&resp, group, advanced))
    }

    /// Totals between two dates (inclusive), one row per team played for.
    pub async fn player_date_range(
        &self,
        person_id: i64,
        group: StatGroup,
        start_date: &str,
        end_date: &str,
        game_type: Option<GameType>,
    ) -> Result<Table, MlbStatsError> {
        self.player_by_date_range(person_id, group, start_date, end_date, game_type, false)
            .await
    }

    pub async fn player_date_range_advanced(
        &self,
        person_id: i64,
        group: StatGroup,
        start_date: &str,
        end_date: &str,
        game_type: Option<GameType>,
    ) -> Result<Table, MlbStatsError> {
        self.player_by_date_range(person_id, group, start_date, end_date, game_type, true)
            .await
    }

    async fn player_sit_splits(
        &self,
        person_id: i64,
        group: StatGroup,
        sit_codes: &[&str],
        season: Option<i32>,
        game_type: Option<GameType>,
        advanced: bool,
    ) -> Result<Table, MlbStatsError> {
        if sit_codes.is_empty() {
            return Err(MlbStatsError::InvalidInput(
                "at least one situation code is required".to_string(),
            ));
        }
        let codes = validate_sit_codes(sit_codes)?;
        let stat_type = if advanced {
            StatType::StatSplitsAdvanced
        } else {
            StatType::StatSplits
        };
        let mut query = StatsQuery::default()
            .with_stat_type(stat_type)
            .with_group(group)
            .with_sit_codes(&codes)
            .with_season(self.season_or_default(season)?);
        if let Some(gt) = game_type {
            query = query.with_game_type(gt);
        }
        let resp = self.client.person_stats(person_id, &query).await?;
        Ok(stats::stat_splits(&resp, group, advanced))
    }

    /// Situational splits (`h`, `a`, `vl`, `risp`, ...) for a season.
    pub async fn player_splits(
        &self,
        person_id: i64,
        group: StatGroup,
        sit_codes: &[&str],
        season: Option<i32>,
        game_type: Option<GameType>,
    ) -> Result<Table, MlbStatsError> {
        self.player_sit_splits(person_id, group, sit_codes, season, game_type, false)
            .await
    }

    pub async fn player_splits_advanced(
        &self,
        person_id: i64,
        group: StatGroup,
        sit_codes: &[&str],
        season: Option<i32>,
        game_type: Option<GameType>,
    ) -> Result<Table, MlbStatsError> {
        self.player_sit_splits(person_id, group, sit_codes, season, game_type, true)
            .await
    }

    pub async fn player_info(&self, person_id: i64) -> Result<PlayerInfo, MlbStatsError> {
        let query = PersonQuery::default()
            .with_app_context(MAJOR_LEAGUE)
            .with_hydrate(PLAYER_INFO_HYDRATE);
        let resp = self.client.person(person_id, &query).await?;
        let person = resp
            .people
            .first()
            .ok_or_else(|| MlbStatsError::MissingData(format!("no person with id {}", person_id)))?;
        Ok(player_info(person, &self.refs))
    }

    pub async fn player_data(&self, person_id: i64) -> Result<PlayerData, MlbStatsError> {
        bulk::player_data(&self.client, &self.refs, person_id).await
    }

    // -- Team --

    async fn team_roster_stats(
        &self,
        team_id: i64,
        season: Option<i32>,
        group: StatGroup,
        advanced: bool,
    ) -> Result<Table, MlbStatsError> {
        let season = self.season_or_default(season)?;
        let stat_type = if advanced {
            StatType::SeasonAdvanced
        } else {
            StatType::Season
        };
        let hydrate = format!(
            "person(stats(type=[{}],group=[{}],season={}))",
            stat_type, group, season
        );
        let query = RosterQuery::default()
            .with_roster_type(RosterType::FullSeason)
            .with_season(season)
            .with_hydrate(&hydrate);
        let resp = self.client.team_roster(team_id, &query).await?;
        Ok(roster::roster_stats(&resp, group, advanced))
    }

    /// Season hitting for everyone on the full-season roster.
    pub async fn team_hitting(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.team_roster_stats(team_id, season, StatGroup::Hitting, false)
            .await
    }

    pub async fn team_pitching(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.team_roster_stats(team_id, season, StatGroup::Pitching, false)
            .await
    }

    pub async fn team_fielding(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.team_roster_stats(team_id, season, StatGroup::Fielding, false)
            .await
    }

    pub async fn team_hitting_advanced(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.team_roster_stats(team_id, season, StatGroup::Hitting, true)
            .await
    }

    pub async fn team_pitching_advanced(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.team_roster_stats(team_id, season, StatGroup::Pitching, true)
            .await
    }

    pub async fn team_game_logs(
        &self,
        team_id: i64,
        group: StatGroup,
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        let season = self.season_or_default(filters.season)?;
        let range =
            validate_date_range(filters.start_date.as_deref(), filters.end_date.as_deref())?;
        let query = apply_filters(
            StatsQuery::default()
                .with_stat_type(StatType::GameLog)
                .with_group(group)
                .with_season(season),
            filters,
            range,
        )?;
        let resp = self.client.team_stats(team_id, &query).await?;
        Ok(stats::team_game_log(&resp, &self.refs, group, season))
    }

    /// Roster of the given type for a season (default: current), sorted by name.
    pub async fn team_roster(
        &self,
        team_id: i64,
        season: Option<i32>,
        roster_type: RosterType,
    ) -> Result<Table, MlbStatsError> {
        let query = RosterQuery::default()
            .with_roster_type(roster_type)
            .with_season(self.season_or_default(season)?);
        let resp = self.client.team_roster(team_id, &query).await?;
        Ok(roster::roster(&resp))
    }

    /// Every postseason round the franchise has played, oldest first.
    pub async fn team_appearances(&self, team_id: i64) -> Result<Table, MlbStatsError> {
        let requests = GameType::PLAYOFF_ROUNDS.into_iter().map(|gt| async move {
            let query = StatsQuery::default()
                .with_stat_type(StatType::YearByYearPlayoffs)
                .with_group(StatGroup::Pitching)
                .with_game_type(gt)
                .with_fields(APPEARANCE_FIELDS);
            let resp = self.client.team_stats(team_id, &query).await?;
            Ok::<(GameType, StatsResponse), MlbStatsError>((gt, resp))
        });
        let rounds = try_join_all(requests).await?;
        Ok(stats::playoff_appearances(&rounds))
    }

    pub async fn team_data(
        &self,
        team_id: i64,
        season: Option<i32>,
    ) -> Result<TeamData, MlbStatsError> {
        let season = self.season_or_default(season)?;
        bulk::team_data(&self.client, &self.refs, team_id, season).await
    }

    pub async fn franchise_data(&self, team_id: i64) -> Result<FranchiseData, MlbStatsError> {
        bulk::franchise_data(&self.client, &self.refs, team_id, self.today()).await
    }

    // -- League --

    async fn league_stats(
        &self,
        league: &str,
        season: Option<i32>,
        group: StatGroup,
        advanced: bool,
    ) -> Result<Table, MlbStatsError> {
        let stat_type = if advanced {
            StatType::SeasonAdvanced
        } else {
            StatType::Season
        };
        let mut query = StatsQuery::default()
            .with_stat_type(stat_type)
            .with_group(group)
            .with_season(self.season_or_default(season)?)
            .with_sport_id(1)
            .with_hydrate("team");
        for id in validate_league(league)? {
            query = query.with_league_id(id);
        }
        let resp = self.client.teams_stats(&query).await?;
        Ok(stats::league_team_stats(&resp, &self.refs, group, advanced))
    }

    /// Team-level hitting for `all`, `AL` or `NL`.
    pub async fn league_hitting(
        &self,
        league: &str,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.league_stats(league, season, StatGroup::Hitting, false)
            .await
    }

    pub async fn league_pitching(
        &self,
        league: &str,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.league_stats(league, season, StatGroup::Pitching, false)
            .await
    }

    pub async fn league_fielding(
        &self,
        league: &str,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.league_stats(league, season, StatGroup::Fielding, false)
            .await
    }

    pub async fn league_hitting_advanced(
        &self,
        league: &str,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.league_stats(league, season, StatGroup::Hitting, true)
            .await
    }

    pub async fn league_pitching_advanced(
        &self,
        league: &str,
        season: Option<i32>,
    ) -> Result<Table, MlbStatsError> {
        self.league_stats(league, season, StatGroup::Pitching, true)
            .await
    }

    /// Leaders among `pool` (default qualified). Empty `groups` means
    /// hitting and pitching.
    pub async fn league_leaders(
        &self,
        season: Option<i32>,
        groups: &[StatGroup],
        pool: PlayerPool,
    ) -> Result<LeagueLeaders, MlbStatsError> {
        let groups = if groups.is_empty() {
            &LEADER_GROUPS[..]
        } else {
            groups
        };
        let query = StatsQuery::default()
            .with_stat_type(StatType::Season)
            .with_season(self.season_or_default(season)?)
            .with_groups(groups)
            .with_player_pool(pool);
        let resp = self.client.stats(&query).await?;
        Ok(stats::league_leaders(&resp))
    }

    // -- Search --

    async fn log_search(
        &self,
        person_id: i64,
        stat_type: StatType,
        group: Option<StatGroup>,
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        let mut query = apply_filters(
            StatsQuery::default()
                .with_stat_type(stat_type)
                .with_season(self.season_or_default(filters.season)?)
                .with_hydrate(PLAY_HYDRATE),
            filters,
            None,
        )?;
        if let Some(group) = group {
            query = query.with_group(group);
        }
        let resp = self.client.person_stats(person_id, &query).await?;
        Ok(stats::play_search(&resp, &self.refs, group))
    }

    /// Every plate appearance (2008 and later) matching the filters.
    pub async fn play_search(
        &self,
        person_id: i64,
        group: Option<StatGroup>,
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        self.log_search(person_id, StatType::PlayLog, group, filters)
            .await
    }

    /// Every pitch (2008 and later) matching the filters.
    pub async fn pitch_search(
        &self,
        person_id: i64,
        group: Option<StatGroup>,
        filters: &StatFilters,
    ) -> Result<Table, MlbStatsError> {
        self.log_search(person_id, StatType::PitchLog, group, filters)
            .await
    }

    pub async fn game_search(&self, filters: &ScheduleFilters) -> Result<Table, MlbStatsError> {
        let query = self.schedule_query(filters, false)?;
        let resp = self.client.schedule(&query).await?;
        Ok(schedule::game_search(&resp))
    }

    // -- Schedule --

    /// Builds the `/schedule` query. With `default_season`, a call with no
    /// window at all covers the default season.
    fn schedule_query(
        &self,
        filters: &ScheduleFilters,
        default_season: bool,
    ) -> Result<ScheduleQuery, MlbStatsError> {
        let mut query = ScheduleQuery::default();
        let range =
            validate_date_range(filters.start_date.as_deref(), filters.end_date.as_deref())?;
        if let Some((start, end)) = range {
            query = query.with_date_range(start, end);
        } else if let Some(date) = &filters.date {
            query = query.with_date(validate_date(date)?);
        } else if let Some(month) = filters.month {
            let season = filters.season.ok_or_else(|| {
                MlbStatsError::InvalidInput("a month needs a season".to_string())
            })?;
            let (start, end) = month_bounds(validate_season(season)?, month)?;
            query = query.with_date_range(start, end);
        } else if let Some(season) = filters.season {
            query = query.with_season(validate_season(season)?);
        } else if default_season {
            query = query.with_season(self.default_season());
        }
        if let Some(team) = filters.team {
            query = query.with_team(team);
        }
        if let Some(opponent) = filters.opponent {
            query = query.with_opponent(opponent);
        }
        if !filters.game_types.is_empty() {
            query = query.with_game_types(&filters.game_types);
        }
        if let Some(hydrate) = &filters.hydrate {
            query = query.with_hydrate(hydrate);
        }
        Ok(query)
    }

    /// Full schedule rows, times shown in the display timezone.
    pub async fn schedule(&self, filters: &ScheduleFilters) -> Result<Table, MlbStatsError> {
        let mut query = self.schedule_query(filters, true)?;
        if filters.hydrate.is_none() {
            query = query.with_hydrate(SCHEDULE_HYDRATE);
        }
        let resp = self.client.schedule(&query).await?;
        Ok(schedule::schedule(&resp, self.timezone))
    }

    pub async fn games_today(&self) -> Result<Table, MlbStatsError> {
        let query = ScheduleQuery::default()
            .with_date(self.today())
            .with_hydrate(SCHEDULE_HYDRATE);
        let resp = self.client.schedule(&query).await?;
        Ok(schedule::schedule(&resp, self.timezone))
    }

    /// Today's games as score lines, one per line.
    pub async fn scores(&self) -> Result<String, MlbStatsError> {
        let query = ScheduleQuery::default()
            .with_date(self.today())
            .with_hydrate("linescore,team");
        let resp = self.client.schedule(&query).await?;
        Ok(schedule::score_lines(&resp, &self.refs, self.timezone).join("\n"))
    }

    async fn adjacent_game(
        &self,
        team_id: i64,
        hydrate: String,
        previous: bool,
    ) -> Result<Option<Table>, MlbStatsError> {
        let resp = self
            .client
            .team(team_id, &TeamQuery::default().with_hydrate(&hydrate))
            .await?;
        let sched = team::first_team(&resp).and_then(|t| {
            if previous {
                t.previous_game_schedule.as_ref()
            } else {
                t.next_game_schedule.as_ref()
            }
        });
        Ok(schedule::adjacent_game(sched, team_id))
    }

    /// The team's next game from today. Late in the year this rolls over
    /// into next season.
    pub async fn next_game(&self, team_id: i64) -> Result<Table, MlbStatsError> {
        let today = self.today();
        let year = today.year();
        for season in [year, year + 1] {
            let hydrate = format!(
                "nextSchedule(date={},inclusive=True,limit=1,season={},gameType=[S,R,P])",
                api_date(today),
                season
            );
            if let Some(table) = self.adjacent_game(team_id, hydrate, false).await? {
                return Ok(table);
            }
        }
        Err(MlbStatsError::MissingData(format!(
            "no upcoming game for team {}",
            team_id
        )))
    }

    /// The team's most recent game. Out of season this looks back from
    /// December 1st of the last completed season.
    pub async fn last_game(&self, team_id: i64) -> Result<Table, MlbStatsError> {
        let today = self.today();
        let info = self.refs.season_info(today);
        let (date, season) = match info.in_progress {
            Some(season) => (today, season),
            None => {
                let date = NaiveDate::from_ymd_opt(info.last_completed, 12, 1).ok_or_else(|| {
                    MlbStatsError::InvalidInput(format!("bad season {}", info.last_completed))
                })?;
                (date, info.last_completed)
            }
        };
        let hydrate = format!(
            "previousSchedule(date={},inclusive=True,limit=1,season={},gameType=[S,R,D,W,F,C,L])",
            api_date(date),
            season
        );
        self.adjacent_game(team_id, hydrate, true)
            .await?
            .ok_or_else(|| {
                MlbStatsError::MissingData(format!("no previous game for team {}", team_id))
            })
    }

    /// Highlight videos for a team's games. Needs a team and some window
    /// (date, range, month or season).
    pub async fn game_highlights(&self, filters: &ScheduleFilters) -> Result<Table, MlbStatsError> {
        if filters.team.is_none() {
            return Err(MlbStatsError::InvalidInput(
                "highlights need a team id".to_string(),
            ));
        }
        if filters.date.is_none()
            && filters.start_date.is_none()
            && filters.month.is_none()
            && filters.season.is_none()
        {
            return Err(MlbStatsError::InvalidInput(
                "highlights need a date, date range, month or season".to_string(),
            ));
        }
        let query = self
            .schedule_query(filters, false)?
            .with_hydrate(HIGHLIGHT_HYDRATE);
        let resp = self.client.schedule(&query).await?;
        Ok(schedule::highlights(&resp))
    }

    /// mp4 source of a play's video on Baseball Savant. `broadcast` picks a
    /// feed (`HOME`, `AWAY`, ...).
    pub async fn video_link(
        &self,
        play_id: &str,
        broadcast: Option<&str>,
    ) -> Result<String, MlbStatsError> {
        let url = video_page_url(play_id, broadcast)?;
        let html = self.client.get_text(url.as_str()).await?;
        extract_video_source(&html)?
            .ok_or_else(|| {
                MlbStatsError::MissingData(format!("no video found for play {}", play_id))
            })
    }

    // -- Transactions and drafts --

    /// Transactions for a team and/or player, optionally within a date range.
    pub async fn transactions(
        &self,
        team_id: Option<i64>,
        person_id: Option<i64>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Table, MlbStatsError> {
        let range = validate_date_range(start_date, end_date)?;
        if team_id.is_none() && person_id.is_none() && range.is_none() {
            return Err(MlbStatsError::InvalidInput(
                "transactions need a team, a player or a date range".to_string(),
            ));
        }
        let mut query = TransactionQuery::default();
        if let Some(id) = team_id {
            query = query.with_team(id);
        }
        if let Some(id) = person_id {
            query = query.with_player(id);
        }
        if let Some((start, end)) = range {
            query = query.with_date_range(start, end);
        }
        let resp = self.client.transactions(&query).await?;
        Ok(transactions::transactions(&resp))
    }

    /// Draft picks for a year (default: current season), optionally one team or round.
    pub async fn draft(
        &self,
        year: Option<i32>,
        team_id: Option<i64>,
        round: Option<&str>,
    ) -> Result<Table, MlbStatsError> {
        let year = self.season_or_default(year)?;
        let mut query = DraftQuery::default();
        if let Some(id) = team_id {
            query = query.with_team(id);
        }
        if let Some(round) = round {
            query = query.with_round(round);
        }
        let resp = self.client.draft(year, &query).await?;
        Ok(transactions::draft(&resp))
    }

    pub async fn prospects(
        &self,
        year: Option<i32>,
        team_id: Option<i64>,
    ) -> Result<Table, MlbStatsError> {
        let year = self.season_or_default(year)?;
        let mut query = DraftQuery::default();
        if let Some(id) = team_id {
            query = query.with_team(id);
        }
        let resp = self.client.draft_prospects(year, &query).await?;
        Ok(transactions::prospects(&resp))
    }

    /// Free agents of an offseason, optionally sorted on any column.
    pub async fn free_agents(
        &self,
        season: Option<i32>,
        hydrate_person: bool,
        sort_by: Option<&str>,
        descending: bool,
    ) -> Result<Table, MlbStatsError> {
        let mut query = FreeAgentQuery::default().with_season(self.season_or_default(season)?);
        if hydrate_person {
            query = query.with_person();
        }
        let resp = self.client.free_agents(&query).await?;
        Ok(transactions::free_agents(&resp, sort_by, descending))
    }

    // -- Reference --

    /// Teams whose full name contains `query`, case-insensitively.
    pub fn find_team(&self, query: &str, filter: SeasonFilter) -> Result<Table, MlbStatsError> {
        let query = validate_search(query)?;
        let rows = self.refs.find_team(&query, filter, self.today());
        ReferenceData::teams_table(&rows)
    }

    pub fn find_venue(&self, query: &str) -> Result<Table, MlbStatsError> {
        let query = validate_search(query)?;
        let rows = self.refs.find_venue(&query);
        ReferenceData::venues_table(&rows)
    }
}

/// Applies date, game type, opponent and event filters. `range` is the
/// already-validated start/end pair.
fn apply_filters(
    mut query: StatsQuery,
    filters: &StatFilters,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<StatsQuery, MlbStatsError> {
    if let Some((start, end)) = range {
        query = query.with_date_range(start, end);
    } else if let Some(date) = &filters.date {
        query = query.with_date(validate_date(date)?);
    }
    if !filters.game_types.is_empty() {
        query = query.with_game_types(&filters.game_types);
    }
    if let Some(id) = filters.opposing_team {
        query = query.with_opposing_team(id);
    }
    if let Some(id) = filters.opposing_player {
        query = query.with_opposing_player(id);
    }
    if !filters.event_types.is_empty() {
        query = query.with_event_types(&filters.event_types);
    }
    if !filters.pitch_types.is_empty() {
        query = query.with_pitch_types(&filters.pitch_types);
    }
    Ok(query)
}

/// `M/D/YYYY`, the date form the schedule hydrations expect.
fn api_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Baseball Savant page for a play, with the query values encoded.
pub fn video_page_url(
    play_id: &str,
    broadcast: Option<&str>,
) -> Result<url::Url, MlbStatsError> {
    let mut params = vec![("playId", play_id.to_string())];
    if let Some(b) = broadcast {
        params.push(("videoType", b.to_uppercase()));
    }
    url::Url::parse_with_params(SAVANT_VIDEO_URL, &params)
        .map_err(|e| {
            MlbStatsError::InvalidInput(format!("bad video url for play {}: {}", play_id, e))
        })
}

/// `src` of the first `<source>` inside `<video id="sporty">`.
pub fn extract_video_source(html: &str) -> Result<Option<String>, MlbStatsError> {
    let re = Regex::new(r#"(?s)<video[^>]*\bid="sporty"[^>]*>.*?<source[^>]*\bsrc="([^"]+)""#)
        .map_err(|e| MlbStatsError::MissingData(format!("regex compile error: {}", e)))?;
    Ok(re
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}
