use mlbstats_lib::mlbstats_api::Error as ApiError;
use mlbstats_lib::reference::TeamRow;
use mlbstats_lib::{
    GameType, MlbStats, MlbStatsError, ReferenceData, RosterType, ScheduleFilters, StatFilters,
    StatGroup, StatType,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

async fn mount_fixture(server: &MockServer, route: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

async fn mount_json(server: &MockServer, route: &str, params: &[(&str, &str)], body: Value) {
    let mut mock = Mock::given(method("GET")).and(path(route));
    for (key, value) in params {
        mock = mock.and(query_param(*key, *value));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// One-player roster whose only hydrated split is `split`.
fn roster_with(name: &str, split: Value) -> Value {
    json!({"roster": [{
        "person": {"id": 1, "fullName": name, "stats": [
            {"type": {"displayName": "season"}, "group": {"displayName": "hitting"},
             "splits": [split]}
        ]},
        "jerseyNumber": "1", "position": {"abbreviation": "P"}
    }]})
}

fn one_game(date: &str, game_pk: i64) -> Value {
    json!({"dates": [{"date": date, "games": [{
        "gamePk": game_pk, "season": "2021", "gameType": "R",
        "teams": {
            "away": {"team": {"id": 145, "name": "Chicago White Sox"}, "score": 4, "isWinner": true},
            "home": {"team": {"id": 108, "name": "Los Angeles Angels"}, "score": 3, "isWinner": false}
        }
    }]}]})
}

/// Facade pointed at a closed port: any request it makes fails.
fn offline() -> MlbStats {
    MlbStats::with_base_url("http://127.0.0.1:9")
}

#[tokio::test]
async fn player_hitting_career_then_seasons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/547989/stats"))
        .and(query_param("stats", "career,yearByYear"))
        .and(query_param("group", "hitting"))
        .and(query_param_is_missing("gameType"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("person_stats.json")))
        .mount(&server)
        .await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let table = mlb.player_hitting(547989, &[]).await.unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.cell(0, "season"), Some(&json!("Career")));
    assert_eq!(table.cell(0, "league"), Some(&json!("-")));
    assert_eq!(table.cell(1, "season"), Some(&json!("2020")));
    assert_eq!(table.cell(1, "league"), Some(&json!("AL")));
    assert_eq!(table.cell(2, "team_mlbam"), Some(&json!(145)));
    assert_eq!(table.cell(2, "HR"), Some(&json!(30)));
}

#[tokio::test]
async fn team_roster_sorted_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teams/145/roster/40Man"))
        .and(query_param("season", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("roster.json")))
        .mount(&server)
        .await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let table = mlb
        .team_roster(145, Some(2021), RosterType::FortyMan)
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "name"), Some(&json!("Jose Abreu")));
    assert_eq!(table.cell(0, "pos"), Some(&json!("1B")));
    assert_eq!(table.cell(1, "jersey_number"), Some(&json!("7")));
}

#[tokio::test]
async fn schedule_for_team_season() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedule"))
        .and(query_param("sportId", "1"))
        .and(query_param("teamId", "145"))
        .and(query_param("season", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("schedule.json")))
        .mount(&server)
        .await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let filters = ScheduleFilters {
        team: Some(145),
        season: Some(2021),
        ..ScheduleFilters::default()
    };
    let table = mlb.schedule(&filters).await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "gamePk"), Some(&json!("634642")));
    assert_eq!(table.cell(0, "date_official"), Some(&json!("2021-04-01")));
}

#[tokio::test]
async fn game_search_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedule"))
        .and(query_param("opponentId", "108"))
        .and(query_param("gameType", "R"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("schedule.json")))
        .mount(&server)
        .await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let filters = ScheduleFilters {
        team: Some(145),
        opponent: Some(108),
        start_date: Some("2021-04-01".to_string()),
        end_date: Some("2021-04-02".to_string()),
        game_types: vec![GameType::Regular],
        ..ScheduleFilters::default()
    };
    let table = mlb.game_search(&filters).await.unwrap();

    insta::assert_snapshot!(
        table.columns().join(","),
        @"gamePk,away_mlbam,away_name,home_mlbam,home_name,date,type,venue,start_time,status"
    );
    assert_eq!(table.cell(1, "status"), Some(&json!("Scheduled")));
    assert_eq!(table.cell(1, "venue"), Some(&json!("-")));
}

#[tokio::test]
async fn player_data_fetches_everything_concurrently() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/people/547989/stats", "person_stats.json").await;
    mount_fixture(&server, "/people/547989/awards", "awards.json").await;
    mount_fixture(&server, "/transactions", "transactions.json").await;
    mount_fixture(&server, "/people/547989", "people.json").await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let data = mlb.player_data(547989).await.unwrap();

    assert_eq!(data.hitting.career.len(), 1);
    assert_eq!(data.hitting.yby.len(), 2);
    assert_eq!(data.hitting.yby.cell(0, "season"), Some(&json!("2021")));
    assert!(data.pitching.career.is_empty());
    assert_eq!(data.awards.len(), 2);
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(data.transactions.cell(0, "name"), Some(&json!("Jose Abreu")));
    assert_eq!(data.info.info.cell(0, "mlbam"), Some(&json!(547989)));
}

#[tokio::test]
async fn player_data_fails_when_one_request_fails() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/people/547989/stats", "person_stats.json").await;
    mount_fixture(&server, "/people/547989/awards", "awards.json").await;
    mount_fixture(&server, "/people/547989", "people.json").await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let mlb = MlbStats::with_base_url(&server.uri());
    let err = mlb.player_data(547989).await.unwrap_err();
    assert!(matches!(
        err,
        MlbStatsError::Api(ApiError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn team_data_puts_each_response_in_its_bucket() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/teams/145",
        &[("season", "2021"), ("hydrate", "standings")],
        json!({"teams": [{"id": 145, "name": "Chicago White Sox", "season": 2021,
                          "league": {"id": 103}, "division": {"id": 202}}]}),
    )
    .await;

    let forty_man = [
        ("person(stats(type=[season],group=[hitting],season=2021))", "Season Hitter", ""),
        ("person(stats(type=[season],group=[pitching],season=2021))", "Season Pitcher", ""),
        ("person(stats(type=[season],group=[fielding],season=2021))", "Season Fielder", ""),
        ("person(stats(type=[seasonAdvanced],group=[hitting],season=2021))", "Advanced Hitter", ""),
        (
            "person(stats(type=[seasonAdvanced],group=[pitching],season=2021))",
            "Advanced Pitcher",
            "",
        ),
        (
            "person(stats(type=[statSplits],group=[pitching],sitCodes=[sp,rp],season=2021))",
            "Split Starter",
            "sp",
        ),
        (
            "person(stats(type=[statSplitsAdvanced],group=[pitching],sitCodes=[sp,rp],season=2021))",
            "Split Reliever",
            "rp",
        ),
    ];
    for (hydrate, name, code) in forty_man {
        let split = json!({"season": "2021", "split": {"code": code}, "stat": {"gamesPlayed": 1}});
        mount_json(
            &server,
            "/teams/145/roster/40Man",
            &[("hydrate", hydrate)],
            roster_with(name, split),
        )
        .await;
    }

    for (game_type, games) in [("S", 28), ("R", 162), ("P", 5)] {
        for group in ["hitting", "pitching", "fielding"] {
            let mut blocks = vec![json!({"type": {"displayName": "season"}, "group": {"displayName": group},
                                         "splits": [{"stat": {"gamesPlayed": games}}]})];
            if group == "pitching" {
                blocks.push(json!({"type": {"displayName": "seasonAdvanced"}, "group": {"displayName": group},
                                   "splits": [{"stat": {"qualityStarts": games}}]}));
            }
            mount_json(
                &server,
                "/teams/145/stats",
                &[("group", group), ("gameType", game_type)],
                json!({"stats": blocks}),
            )
            .await;
        }
    }

    mount_json(
        &server,
        "/teams/145/roster/coach",
        &[],
        json!({"roster": [{"person": {"id": 9, "fullName": "Tony La Russa"},
                           "job": "Manager", "jobId": "MNGR", "title": "Manager", "jerseyNumber": "22"}]}),
    )
    .await;
    mount_json(
        &server,
        "/draft/2021",
        &[],
        json!({"drafts": {"draftYear": 2021, "rounds": [{"round": "1", "picks": [
            {"year": "2021", "pickRound": "1", "pickNumber": 22,
             "person": {"id": 7, "fullName": "Colson Montgomery"}}
        ]}]}}),
    )
    .await;
    mount_json(
        &server,
        "/transactions",
        &[],
        json!({"transactions": [{"person": {"id": 8, "fullName": "Lance Lynn"},
                                 "typeCode": "TR", "date": "2020-12-07"}]}),
    )
    .await;

    for month in 1..=12 {
        let start = format!("2021-{:02}-01", month);
        let body = match month {
            4 => one_game("2021-04-01", 1004),
            9 => one_game("2021-09-03", 1009),
            _ => json!({"dates": []}),
        };
        mount_json(&server, "/schedule", &[("startDate", start.as_str())], body).await;
    }

    let mlb = MlbStats::with_base_url(&server.uri());
    let data = mlb.team_data(145, Some(2021)).await.unwrap();

    assert_eq!(data.team_info.cell(0, "full_name"), Some(&json!("Chicago White Sox")));
    assert_eq!(data.team_info.cell(0, "div_short"), Some(&json!("AL Central")));

    assert_eq!(data.hitting.cell(0, "name"), Some(&json!("Season Hitter")));
    assert_eq!(data.pitching.cell(0, "name"), Some(&json!("Season Pitcher")));
    assert_eq!(data.fielding.cell(0, "name"), Some(&json!("Season Fielder")));
    assert_eq!(data.hitting_advanced.cell(0, "name"), Some(&json!("Advanced Hitter")));
    assert_eq!(data.pitching_advanced.cell(0, "name"), Some(&json!("Advanced Pitcher")));
    assert_eq!(data.pitching_splits.cell(0, "name"), Some(&json!("Split Starter")));
    assert_eq!(data.pitching_splits.cell(0, "ptype"), Some(&json!("SP")));
    assert_eq!(data.pitching_splits_advanced.cell(0, "name"), Some(&json!("Split Reliever")));
    assert_eq!(data.pitching_splits_advanced.cell(0, "ptype"), Some(&json!("RP")));

    for (i, (game_type, games)) in [("S", 28), ("R", 162), ("P", 5)].into_iter().enumerate() {
        assert_eq!(data.total_hitting.regular.cell(i, "game_type"), Some(&json!(game_type)));
        assert_eq!(data.total_hitting.regular.cell(i, "G"), Some(&json!(games)));
        assert_eq!(data.total_pitching.regular.cell(i, "G"), Some(&json!(games)));
        assert_eq!(data.total_pitching.advanced.cell(i, "QS"), Some(&json!(games)));
        assert_eq!(data.total_fielding.cell(i, "game_type"), Some(&json!(game_type)));
        assert_eq!(data.total_fielding.cell(i, "G"), Some(&json!(games)));
    }
    assert!(data.total_hitting.advanced.is_empty());

    assert_eq!(data.coaches.cell(0, "name"), Some(&json!("Tony La Russa")));
    assert_eq!(data.draft.cell(0, "name"), Some(&json!("Colson Montgomery")));
    assert_eq!(data.transactions.cell(0, "name"), Some(&json!("Lance Lynn")));

    assert_eq!(data.schedule.len(), 2);
    assert_eq!(data.schedule.cell(0, "gamePk"), Some(&json!(1004)));
    assert_eq!(data.schedule.cell(1, "gamePk"), Some(&json!(1009)));
    assert_eq!(data.schedule.cell(1, "is_win"), Some(&json!(true)));
}

fn franchise_refs(first_year: i32) -> ReferenceData {
    let white_sox = TeamRow {
        season: first_year,
        mlbam: 145,
        full_name: "Chicago White Sox".to_string(),
        location_name: None,
        franchise_name: None,
        team_name: None,
        club_name: None,
        short_name: None,
        abbreviation: Some("CWS".to_string()),
        venue_mlbam: None,
        venue_name: None,
        first_year: Some(first_year),
        league_mlbam: Some(103),
        division_mlbam: Some(202),
        active: Some(true),
    };
    ReferenceData {
        teams: vec![white_sox],
        ..ReferenceData::bundled()
    }
}

#[tokio::test]
async fn franchise_data_splits_seasons_from_the_rest() {
    let server = MockServer::start().await;
    let mlb = MlbStats::with_base_url(&server.uri());
    let last = mlb.default_season();
    let mlb = mlb.with_reference_data(franchise_refs(last - 2));

    let seasons = [(last - 2, 72, 161), (last - 1, 35, 60), (last, 93, 162)];
    for (year, wins, games) in seasons {
        let season = year.to_string();
        mount_json(
            &server,
            "/teams/145",
            &[("season", season.as_str()), ("hydrate", "standings")],
            json!({"teams": [{"id": 145, "name": "Chicago White Sox", "abbreviation": "CWS",
                              "season": year, "league": {"id": 103}, "division": {"id": 202},
                              "record": {"gamesPlayed": games, "wins": wins, "losses": games - wins}}]}),
        )
        .await;
    }
    let info_hydrate = format!(
        "nextSchedule(limit=5),previousSchedule(limit=1,season={}),league,division",
        last
    );
    mount_json(
        &server,
        "/teams/145",
        &[("hydrate", info_hydrate.as_str())],
        json!({"teams": [{"id": 145, "name": "Chicago White Sox", "season": last + 1,
                          "league": {"id": 103}, "division": {"id": 202},
                          "previousGameSchedule": one_game("2021-10-03", 1999),
                          "nextGameSchedule": one_game("2022-04-08", 2001)}]}),
    )
    .await;
    mount_json(
        &server,
        "/teams/145/stats",
        &[],
        json!({"stats": [
            {"type": {"displayName": "yearByYear"}, "group": {"displayName": "hitting"},
             "splits": [{"season": "2019", "stat": {"homeRuns": 182}},
                        {"season": "2021", "stat": {"homeRuns": 190}}]},
            {"type": {"displayName": "yearByYearAdvanced"}, "group": {"displayName": "pitching"},
             "splits": [{"season": "2021", "stat": {"qualityStarts": 70}}]},
            {"type": {"displayName": "yearByYear"}, "group": {"displayName": "fielding"},
             "splits": [{"season": "2021", "stat": {"errors": 92}}]}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/teams/145/roster/allTime",
        &[],
        json!({"roster": [
            {"person": {"id": 2, "fullName": "Luke Appling"}, "position": {"abbreviation": "SS"}},
            {"person": {"id": 1, "fullName": "Frank Thomas"}, "position": {"abbreviation": "1B"}},
            {"person": {"id": 3, "fullName": "Eddie Collins"}, "position": {"abbreviation": "2B"}}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/awards/MLBHOF/recipients",
        &[],
        json!({"awards": [
            {"id": "MLBHOF", "season": "2014", "team": {"id": 145},
             "player": {"id": 1, "nameFirstLast": "Frank Thomas"}, "votes": 478},
            {"id": "MLBHOF", "season": "2020", "team": {"id": 147},
             "player": {"id": 4, "nameFirstLast": "Derek Jeter"}}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/awards/RETIREDUNI_145/recipients",
        &[],
        json!({"awards": [{"id": "RETIREDUNI_145", "season": "2010", "notes": "35",
                           "player": {"id": 1, "nameFirstLast": "Frank Thomas"}}]}),
    )
    .await;

    let data = mlb.franchise_data(145).await.unwrap();

    assert_eq!(data.records.len(), 3);
    for (i, (year, wins, games)) in seasons.into_iter().rev().enumerate() {
        assert_eq!(data.records.cell(i, "season"), Some(&json!(year)));
        assert_eq!(data.records.cell(i, "W"), Some(&json!(wins)));
        assert_eq!(data.records.cell(i, "gp"), Some(&json!(games)));
    }
    assert_eq!(data.record_splits.len(), 3);

    assert_eq!(data.team_info.cell(0, "season"), Some(&json!(last + 1)));
    assert_eq!(data.last_games.cell(0, "gamePk"), Some(&json!(1999)));
    assert_eq!(data.next_games.cell(0, "gamePk"), Some(&json!(2001)));

    assert_eq!(data.hitting.len(), 2);
    assert_eq!(data.hitting.cell(0, "season"), Some(&json!("2021")));
    assert_eq!(data.hitting.cell(0, "HR"), Some(&json!(190)));
    assert_eq!(data.pitching_advanced.cell(0, "QS"), Some(&json!(70)));
    assert!(data.pitching.is_empty());
    assert_eq!(data.fielding.cell(0, "E"), Some(&json!(92)));

    assert_eq!(data.all_time_roster.len(), 3);
    assert_eq!(data.all_time_roster.cell(0, "name"), Some(&json!("Eddie Collins")));
    assert_eq!(data.hall_of_fame.len(), 1);
    assert_eq!(data.hall_of_fame.cell(0, "name"), Some(&json!("Frank Thomas")));
    assert_eq!(data.hall_of_fame.cell(0, "votes"), Some(&json!("478")));
    assert_eq!(data.retired_numbers.cell(0, "number"), Some(&json!("35")));
}

#[tokio::test]
async fn transactions_need_a_filter() {
    let err = offline().transactions(None, None, None, None).await.unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn transactions_reject_half_a_range() {
    let err = offline()
        .transactions(Some(145), None, Some("2021-01-01"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn matchup_stats_need_an_opponent() {
    let err = offline()
        .player_stats(
            547989,
            StatGroup::Hitting,
            &[StatType::VsPlayer],
            &StatFilters::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn schedule_month_needs_season() {
    let filters = ScheduleFilters {
        month: Some(6),
        ..ScheduleFilters::default()
    };
    let err = offline().schedule(&filters).await.unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn highlights_need_team_and_window() {
    let no_team = ScheduleFilters {
        season: Some(2021),
        ..ScheduleFilters::default()
    };
    let err = offline().game_highlights(&no_team).await.unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));

    let no_window = ScheduleFilters {
        team: Some(145),
        ..ScheduleFilters::default()
    };
    let err = offline().game_highlights(&no_window).await.unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_league_rejected() {
    let err = offline().league_hitting("xl", Some(2021)).await.unwrap_err();
    assert!(matches!(err, MlbStatsError::InvalidInput(_)));
}

#[tokio::test]
async fn network_failure_surfaces_as_api_error() {
    let err = offline()
        .team_roster(145, Some(2021), RosterType::Active)
        .await
        .unwrap_err();
    assert!(matches!(err, MlbStatsError::Api(ApiError::RequestFailed)));
}
