use chrono::NaiveDate;
use mlbstats_api::types::{GameType, PlayerPool, RosterType, StatGroup, StatType};
use mlbstats_api::{
    DraftQuery, FreeAgentQuery, Query, ReferenceQuery, RosterQuery, ScheduleQuery, StatsQuery,
    TeamQuery, TransactionQuery,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn stats_query_empty() {
    let url = StatsQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn stats_query_multi_values_are_comma_joined() {
    let url = StatsQuery::default()
        .with_stat_types(&[StatType::Season, StatType::SeasonAdvanced])
        .with_groups(&[StatGroup::Hitting, StatGroup::Pitching])
        .with_game_types(&[GameType::Regular, GameType::Postseason])
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("stats=season%2CseasonAdvanced"));
    assert!(query.contains("group=hitting%2Cpitching"));
    assert!(query.contains("gameType=R%2CP"));
}

#[test]
fn stats_query_common_params_come_first() {
    let url = StatsQuery::default()
        .with_stat_type(StatType::GameLog)
        .with_sport_id(1)
        .with_fields("stats")
        .add_to_url(&base_url());
    assert_eq!(
        url.query().unwrap(),
        "sportId=1&fields=stats&stats=gameLog"
    );
}

#[test]
fn stats_query_filters() {
    let url = StatsQuery::default()
        .with_stat_type(StatType::PlayLog)
        .with_date_range(date(2021, 4, 1), date(2021, 4, 30))
        .with_opposing_team(147)
        .with_opposing_player(592450)
        .with_event_type("home_run")
        .with_pitch_type("FF")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("startDate=2021-04-01"));
    assert!(query.contains("endDate=2021-04-30"));
    assert!(query.contains("opposingTeamId=147"));
    assert!(query.contains("opposingPlayerId=592450"));
    assert!(query.contains("eventType=home_run"));
    assert!(query.contains("pitchType=FF"));
}

#[test]
fn stats_query_leaders_params() {
    let url = StatsQuery::default()
        .with_stat_type(StatType::Season)
        .with_season(2021)
        .with_player_pool(PlayerPool::QualifiedRookies)
        .with_league_id(103)
        .with_league_id(104)
        .with_limit(500)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("playerPool=Qualified_rookies"));
    assert!(query.contains("leagueIds=103%2C104"));
    assert!(query.contains("limit=500"));
}

#[test]
fn stats_query_sit_codes() {
    let url = StatsQuery::default()
        .with_stat_type(StatType::StatSplits)
        .with_sit_code("sp")
        .with_sit_code("rp")
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("sitCodes=sp%2Crp"));
}

#[test]
fn schedule_query_defaults_to_mlb() {
    let url = ScheduleQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("sportId=1"));
}

#[test]
fn schedule_query_full() {
    let url = ScheduleQuery::default()
        .with_team(145)
        .with_opponent(147)
        .with_date_range(date(2021, 6, 1), date(2021, 6, 30))
        .with_game_types(&[GameType::Regular, GameType::Postseason])
        .with_hydrate("linescore")
        .add_to_url(&base_url());
    assert_eq!(
        url.query().unwrap(),
        "sportId=1&hydrate=linescore&teamId=145&opponentId=147&startDate=2021-06-01&endDate=2021-06-30&gameType=R%2CP"
    );
}

#[test]
fn roster_query_path_suffix() {
    let query = RosterQuery::default().with_roster_type(RosterType::Coach);
    assert_eq!(query.path_suffix(), "/coach");
    let query = RosterQuery::default().with_roster_type(RosterType::AllTime);
    assert_eq!(query.path_suffix(), "/allTime");
}

#[test]
fn team_query_league_ids() {
    let url = TeamQuery::default()
        .with_season(2021)
        .with_league_id(103)
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("season=2021&leagueIds=103"));
}

#[test]
fn transaction_query_window() {
    let url = TransactionQuery::default()
        .with_team(145)
        .with_date_range(date(2021, 1, 1), date(2021, 12, 31))
        .add_to_url(&base_url());
    assert_eq!(
        url.query(),
        Some("teamId=145&startDate=2021-01-01&endDate=2021-12-31")
    );
}

#[test]
fn draft_query_round_and_limit() {
    let url = DraftQuery::default()
        .with_round("1")
        .with_limit(10)
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("sportId=1&round=1&limit=10"));
}

#[test]
fn free_agent_query_hydrates_person() {
    let url = FreeAgentQuery::default()
        .with_season(2021)
        .with_person()
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("hydrate=person&season=2021"));
}

#[test]
fn reference_query_all_seasons() {
    let url = ReferenceQuery::default()
        .with_sport_id(1)
        .with_all_seasons()
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("sportId=1&all=true"));
}
