//! Bulk fetchers: one fixed request list per entity, fired concurrently and
//! reassembled by position.
//!
//! `try_join_all` keeps the output in request order, so each bucket is just
//! "the n-th response". Any failed request fails the whole batch.

use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use mlbstats_api::types::{
    AwardsResponse, DraftResponse, GameType, PeopleResponse, RosterResponse, RosterType, Schedule,
    StatGroup, StatType, StatsResponse, TeamsResponse, TransactionsResponse,
};
use mlbstats_api::{
    Client, DraftQuery, PersonQuery, Query, ReferenceQuery, RosterQuery, ScheduleQuery,
    StatsQuery, TeamQuery, TransactionQuery,
};

use crate::error::MlbStatsError;
use crate::parse::person::{career_tables, player_info, CareerTables, PlayerInfo};
use crate::parse::stats::{franchise_year_by_year, team_totals, TeamTotals};
use crate::parse::{roster, schedule, team, transactions};
use crate::reference::ReferenceData;
use crate::table::Table;
use crate::validation::month_bounds;

const SCHEDULE_HYDRATE: &str = "game(content(media(epg))),team";
const PLAYER_HYDRATE: &str = "currentTeam,rosterEntries(team),education,draft";
const TOTAL_GAME_TYPES: [GameType; 3] = [GameType::Spring, GameType::Regular, GameType::Postseason];

/// Everything about one team's season.
#[derive(Clone, Debug, Default)]
pub struct TeamData {
    pub team_info: Table,
    pub hitting: Table,
    pub pitching: Table,
    pub fielding: Table,
    pub hitting_advanced: Table,
    pub pitching_advanced: Table,
    /// Starter/reliever (`sp`/`rp`) pitching splits.
    pub pitching_splits: Table,
    pub pitching_splits_advanced: Table,
    /// Team totals for spring training, regular season and postseason.
    pub total_hitting: TeamTotals,
    pub total_pitching: TeamTotals,
    pub total_fielding: Table,
    pub coaches: Table,
    pub draft: Table,
    pub transactions: Table,
    pub schedule: Table,
}

#[derive(Clone, Debug, Default)]
pub struct PlayerData {
    pub hitting: CareerTables,
    pub pitching: CareerTables,
    pub fielding: CareerTables,
    pub awards: Table,
    pub transactions: Table,
    pub info: PlayerInfo,
}

/// A franchise across its whole history.
#[derive(Clone, Debug, Default)]
pub struct FranchiseData {
    pub records: Table,
    pub record_splits: Table,
    pub team_info: Table,
    pub last_games: Table,
    pub next_games: Table,
    pub hitting: Table,
    pub hitting_advanced: Table,
    pub pitching: Table,
    pub pitching_advanced: Table,
    pub fielding: Table,
    pub all_time_roster: Table,
    pub hall_of_fame: Table,
    pub retired_numbers: Table,
}

/// GETs every URL concurrently. Output order matches `urls`.
pub async fn fetch_all(client: &Client, urls: Vec<Url>) -> Result<Vec<Value>, MlbStatsError> {
    tracing::debug!("bulk fetch of {} requests", urls.len());
    let values = try_join_all(urls.into_iter().map(|url| client.get_url::<Value>(url))).await?;
    Ok(values)
}

/// Positional decoder over a batch of responses.
struct Responses {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Responses {
    fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    fn next<T: DeserializeOwned>(&mut self) -> Result<T, MlbStatsError> {
        let value = self.values.next().ok_or_else(|| {
            MlbStatsError::MissingData(format!("no response at position {}", self.position))
        })?;
        self.position += 1;
        Ok(serde_json::from_value(value)?)
    }

    fn take<T: DeserializeOwned>(&mut self, n: usize) -> Result<Vec<T>, MlbStatsError> {
        (0..n).map(|_| self.next()).collect()
    }
}

fn roster_hydrate(stat_type: StatType, group: StatGroup, season: i32) -> String {
    format!(
        "person(stats(type=[{}],group=[{}],season={}))",
        stat_type, group, season
    )
}

fn split_hydrate(stat_type: StatType, season: i32) -> String {
    format!(
        "person(stats(type=[{}],group=[pitching],sitCodes=[sp,rp],season={}))",
        stat_type, season
    )
}

/// Requests for [`team_data`], in bucket order.
pub fn team_data_urls(
    client: &Client,
    refs: &ReferenceData,
    team_id: i64,
    season: i32,
) -> Result<Vec<Url>, MlbStatsError> {
    let forty_man = format!("/teams/{}/roster/{}", team_id, RosterType::FortyMan);
    let roster = || {
        RosterQuery::default()
            .with_roster_type(RosterType::FortyMan)
            .with_season(season)
    };
    let team_stats_path = format!("/teams/{}/stats", team_id);

    let mut urls = vec![client.request_url(
        &format!("/teams/{}", team_id),
        Some(
            &TeamQuery::default()
                .with_season(season)
                .with_hydrate("standings"),
        ),
    )?];

    for (stat_type, group) in [
        (StatType::Season, StatGroup::Hitting),
        (StatType::Season, StatGroup::Pitching),
        (StatType::Season, StatGroup::Fielding),
        (StatType::SeasonAdvanced, StatGroup::Hitting),
        (StatType::SeasonAdvanced, StatGroup::Pitching),
    ] {
        let query = roster().with_hydrate(&roster_hydrate(stat_type, group, season));
        urls.push(client.request_url(&forty_man, Some(&query))?);
    }
    for stat_type in [StatType::StatSplits, StatType::StatSplitsAdvanced] {
        let query = roster().with_hydrate(&split_hydrate(stat_type, season));
        urls.push(client.request_url(&forty_man, Some(&query))?);
    }

    for game_type in TOTAL_GAME_TYPES {
        for group in StatGroup::ALL {
            let query = StatsQuery::default()
                .with_stat_types(&[StatType::Season, StatType::SeasonAdvanced])
                .with_group(group)
                .with_game_type(game_type)
                .with_season(season);
            urls.push(client.request_url(&team_stats_path, Some(&query))?);
        }
    }

    urls.push(client.request_url(
        &format!("/teams/{}/roster/{}", team_id, RosterType::Coach),
        Some(
            &RosterQuery::default()
                .with_roster_type(RosterType::Coach)
                .with_season(season)
                .with_hydrate("person"),
        ),
    )?);
    urls.push(client.request_url(
        &format!("/draft/{}", season),
        Some(&DraftQuery::default().with_team(team_id)),
    )?);
    let (start, end) = season_window(refs, season)?;
    urls.push(client.request_url(
        "/transactions",
        Some(
            &TransactionQuery::default()
                .with_team(team_id)
                .with_date_range(start, end),
        ),
    )?);

    for month in 1..=12 {
        let (start, end) = month_bounds(season, month)?;
        let query = ScheduleQuery::default()
            .with_team(team_id)
            .with_season(season)
            .with_date_range(start, end)
            .with_game_types(&GameType::ALL)
            .with_hydrate(SCHEDULE_HYDRATE);
        urls.push(client.request_url("/schedule", Some(&query))?);
    }
    Ok(urls)
}

/// Season start/end from the seasons table, else the calendar year.
fn season_window(
    refs: &ReferenceData,
    season: i32,
) -> Result<(NaiveDate, NaiveDate), MlbStatsError> {
    if let Some(row) = refs.season(season) {
        return Ok((row.season_start_date, row.season_end_date));
    }
    let (start, _) = month_bounds(season, 1)?;
    let (_, end) = month_bounds(season, 12)?;
    Ok((start, end))
}

/// Fetches a team's season in one batch of 32 requests.
pub async fn team_data(
    client: &Client,
    refs: &ReferenceData,
    team_id: i64,
    season: i32,
) -> Result<TeamData, MlbStatsError> {
    let urls = team_data_urls(client, refs, team_id, season)?;
    let mut resp = Responses::new(fetch_all(client, urls).await?);

    let info: TeamsResponse = resp.next()?;
    let team_info = team::first_team(&info)
        .map(|t| team::team_info(t, refs))
        .unwrap_or_else(|| Table::new(team::TEAM_INFO_COLUMNS));

    let rosters: Vec<RosterResponse> = resp.take(5)?;
    let splits: Vec<RosterResponse> = resp.take(2)?;
    let totals: Vec<StatsResponse> = resp.take(TOTAL_GAME_TYPES.len() * StatGroup::ALL.len())?;
    let coaches: RosterResponse = resp.next()?;
    let draft: DraftResponse = resp.next()?;
    let trx: TransactionsResponse = resp.next()?;
    let months: Vec<Schedule> = resp.take(12)?;

    let mut hitting = Vec::new();
    let mut pitching = Vec::new();
    let mut fielding = Vec::new();
    for (i, stats) in totals.iter().enumerate() {
        let game_type = TOTAL_GAME_TYPES[i / StatGroup::ALL.len()];
        let group = StatGroup::ALL[i % StatGroup::ALL.len()];
        let parsed = team_totals(stats, group, game_type);
        match group {
            StatGroup::Hitting => hitting.push(parsed),
            StatGroup::Pitching => pitching.push(parsed),
            StatGroup::Fielding => fielding.push(parsed.regular),
        }
    }

    Ok(TeamData {
        team_info,
        hitting: roster::roster_season_stats(&rosters[0], StatGroup::Hitting, false),
        pitching: roster::roster_season_stats(&rosters[1], StatGroup::Pitching, false),
        fielding: roster::roster_season_stats(&rosters[2], StatGroup::Fielding, false),
        hitting_advanced: roster::roster_season_stats(&rosters[3], StatGroup::Hitting, true),
        pitching_advanced: roster::roster_season_stats(&rosters[4], StatGroup::Pitching, true),
        pitching_splits: roster::roster_pitching_splits(&splits[0], false),
        pitching_splits_advanced: roster::roster_pitching_splits(&splits[1], true),
        total_hitting: concat_totals(hitting),
        total_pitching: concat_totals(pitching),
        total_fielding: Table::concat(fielding),
        coaches: roster::coaches(&coaches),
        draft: transactions::draft(&draft),
        transactions: transactions::transactions(&trx),
        schedule: Table::concat(
            months
                .iter()
                .map(|m| schedule::team_schedule(m, refs, team_id))
                .collect(),
        ),
    })
}

fn concat_totals(parts: Vec<TeamTotals>) -> TeamTotals {
    let (regular, advanced): (Vec<Table>, Vec<Table>) =
        parts.into_iter().map(|t| (t.regular, t.advanced)).unzip();
    TeamTotals {
        regular: Table::concat(regular),
        advanced: Table::concat(advanced),
    }
}

pub fn player_data_urls(client: &Client, person_id: i64) -> Result<Vec<Url>, MlbStatsError> {
    let stats = StatsQuery::default()
        .with_stat_types(&[
            StatType::Career,
            StatType::CareerAdvanced,
            StatType::YearByYear,
            StatType::YearByYearAdvanced,
        ])
        .with_game_types(&[GameType::Regular, GameType::Postseason])
        .with_groups(&StatGroup::ALL);
    Ok(vec![
        client.request_url(&format!("/people/{}/stats", person_id), Some(&stats))?,
        client.request_url(&format!("/people/{}/awards", person_id), None::<&PersonQuery>)?,
        client.request_url(
            "/transactions",
            Some(&TransactionQuery::default().with_player(person_id)),
        )?,
        client.request_url(
            &format!("/people/{}", person_id),
            Some(
                &PersonQuery::default()
                    .with_app_context("majorLeague")
                    .with_hydrate(PLAYER_HYDRATE),
            ),
        )?,
    ])
}

/// Career stats, awards, transactions and biography for one player.
pub async fn player_data(
    client: &Client,
    refs: &ReferenceData,
    person_id: i64,
) -> Result<PlayerData, MlbStatsError> {
    let urls = player_data_urls(client, person_id)?;
    let mut resp = Responses::new(fetch_all(client, urls).await?);

    let stats: StatsResponse = resp.next()?;
    let awards: AwardsResponse = resp.next()?;
    let trx: TransactionsResponse = resp.next()?;
    let people: PeopleResponse = resp.next()?;
    let person = people
        .people
        .first()
        .ok_or_else(|| MlbStatsError::MissingData(format!("no person with id {}", person_id)))?;

    Ok(PlayerData {
        hitting: career_tables(&stats, refs, StatGroup::Hitting),
        pitching: career_tables(&stats, refs, StatGroup::Pitching),
        fielding: career_tables(&stats, refs, StatGroup::Fielding),
        awards: transactions::awards(&awards),
        transactions: transactions::transactions(&trx),
        info: player_info(person, refs),
    })
}

/// First season of play, from the reference table or, failing that, the API.
async fn first_year(
    client: &Client,
    refs: &ReferenceData,
    team_id: i64,
) -> Result<i32, MlbStatsError> {
    if let Some(year) = refs.team(team_id, None).and_then(|t| t.first_year) {
        return Ok(year);
    }
    let resp = client.team(team_id, &TeamQuery::default()).await?;
    team::first_team(&resp)
        .and_then(|t| t.first_year_of_play)
        .map(|y| y as i32)
        .ok_or_else(|| {
            MlbStatsError::MissingData(format!("no first year of play for team {}", team_id))
        })
}

pub fn franchise_data_urls(
    client: &Client,
    team_id: i64,
    first_year: i32,
    last_season: i32,
) -> Result<Vec<Url>, MlbStatsError> {
    let team_path = format!("/teams/{}", team_id);
    let mut urls = (first_year..=last_season)
        .map(|year| {
            client.request_url(
                &team_path,
                Some(&TeamQuery::default().with_season(year).with_hydrate("standings")),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let info_hydrate = format!(
        "nextSchedule(limit=5),previousSchedule(limit=1,season={}),league,division",
        last_season
    );
    urls.push(client.request_url(
        &team_path,
        Some(&TeamQuery::default().with_hydrate(&info_hydrate)),
    )?);
    urls.push(client.request_url(
        &format!("/teams/{}/stats", team_id),
        Some(
            &StatsQuery::default()
                .with_stat_types(&[StatType::YearByYear, StatType::YearByYearAdvanced])
                .with_groups(&StatGroup::ALL),
        ),
    )?);
    urls.push(client.request_url(
        &format!("/teams/{}/roster/{}", team_id, RosterType::AllTime),
        Some(&RosterQuery::default().with_roster_type(RosterType::AllTime)),
    )?);
    urls.push(client.request_url("/awards/MLBHOF/recipients", None::<&ReferenceQuery>)?);
    urls.push(client.request_url(
        &format!("/awards/RETIREDUNI_{}/recipients", team_id),
        None::<&ReferenceQuery>,
    )?);
    Ok(urls)
}

/// Standings for every season from the first year of play through the
/// default season for `today`, plus franchise-wide stats and honours.
pub async fn franchise_data(
    client: &Client,
    refs: &ReferenceData,
    team_id: i64,
    today: NaiveDate,
) -> Result<FranchiseData, MlbStatsError> {
    let first = first_year(client, refs, team_id).await?;
    let last = refs.default_season(today);
    let urls = franchise_data_urls(client, team_id, first, last)?;
    let season_count = urls.len() - 5;
    let mut resp = Responses::new(fetch_all(client, urls).await?);

    let seasons: Vec<TeamsResponse> = resp.take(season_count)?;
    let info: TeamsResponse = resp.next()?;
    let stats: StatsResponse = resp.next()?;
    let all_time: RosterResponse = resp.next()?;
    let hof: AwardsResponse = resp.next()?;
    let retired: AwardsResponse = resp.next()?;

    let (records, record_splits) = team::franchise_standings(&seasons, refs);
    let current = team::first_team(&info);
    Ok(FranchiseData {
        records,
        record_splits,
        team_info: current
            .map(|t| team::team_info(t, refs))
            .unwrap_or_else(|| Table::new(team::TEAM_INFO_COLUMNS)),
        last_games: team::game_list(current.and_then(|t| t.previous_game_schedule.as_ref())),
        next_games: team::game_list(current.and_then(|t| t.next_game_schedule.as_ref())),
        hitting: franchise_year_by_year(&stats, StatGroup::Hitting, false),
        hitting_advanced: franchise_year_by_year(&stats, StatGroup::Hitting, true),
        pitching: franchise_year_by_year(&stats, StatGroup::Pitching, false),
        pitching_advanced: franchise_year_by_year(&stats, StatGroup::Pitching, true),
        fielding: franchise_year_by_year(&stats, StatGroup::Fielding, false),
        all_time_roster: roster::all_time_roster(&all_time),
        hall_of_fame: transactions::hall_of_fame(&hof, team_id),
        retired_numbers: transactions::retired_numbers(&retired),
    })
}
