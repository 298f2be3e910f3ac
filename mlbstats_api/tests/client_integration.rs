use mlbstats_api::types::{GameType, RosterType, StatGroup, StatType};
use mlbstats_api::{
    Client, DraftQuery, Error, Query, RosterQuery, ScheduleQuery, StatsQuery, TeamQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn person_stats_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("person_stats.json");

    Mock::given(method("GET"))
        .and(path("/people/547989/stats"))
        .and(query_param("stats", "career,yearByYear"))
        .and(query_param("group", "hitting"))
        .and(query_param("gameType", "R"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = StatsQuery::default()
        .with_stat_types(&[StatType::Career, StatType::YearByYear])
        .with_group(StatGroup::Hitting)
        .with_game_type(GameType::Regular);
    let resp = client.person_stats(547989, &query).await.unwrap();

    assert_eq!(resp.stats.len(), 2);
    assert_eq!(resp.stats[0].stat_type.as_str(), "career");
    assert_eq!(resp.stats[1].splits.len(), 2);
    assert_eq!(resp.stats[1].splits[1].season.as_deref(), Some("2021"));
}

#[tokio::test]
async fn team_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("team.json");

    Mock::given(method("GET"))
        .and(path("/teams/145"))
        .and(query_param("hydrate", "standings"))
        .and(query_param("season", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = TeamQuery::default()
        .with_season(2021)
        .with_hydrate("standings");
    let resp = client.team(145, &query).await.unwrap();

    assert_eq!(resp.teams.len(), 1);
    assert_eq!(resp.teams[0].abbreviation.as_deref(), Some("CWS"));
}

#[tokio::test]
async fn team_roster_puts_type_in_path() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("roster.json");

    Mock::given(method("GET"))
        .and(path("/teams/145/roster/40Man"))
        .and(query_param("season", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = RosterQuery::default()
        .with_roster_type(RosterType::FortyMan)
        .with_season(2021);
    let resp = client.team_roster(145, &query).await.unwrap();

    assert_eq!(resp.roster.len(), 2);
    assert_eq!(resp.roster[1].person.full_name.as_deref(), Some("Tim Anderson"));
}

#[tokio::test]
async fn schedule_sends_default_sport() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("schedule.json");

    Mock::given(method("GET"))
        .and(path("/schedule"))
        .and(query_param("sportId", "1"))
        .and(query_param("teamId", "145"))
        .and(query_param("season", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = ScheduleQuery::default().with_team(145).with_season(2021);
    let schedule = client.schedule(&query).await.unwrap();

    assert_eq!(schedule.total_games, Some(2));
    assert_eq!(schedule.games().count(), 2);
}

#[tokio::test]
async fn draft_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("draft.json");

    Mock::given(method("GET"))
        .and(path("/draft/2021"))
        .and(query_param("teamId", "145"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client
        .draft(2021, &DraftQuery::default().with_team(145))
        .await
        .unwrap();

    assert_eq!(resp.drafts.draft_year, Some(2021));
    assert_eq!(resp.drafts.rounds[0].picks[0].pick_number, Some(22));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/145"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.team(145, &TeamQuery::default()).await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn not_found_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/1/stats"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("{\"message\":\"Object not found\"}"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.person_stats(1, &StatsQuery::default()).await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 404, .. })));
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.schedule(&ScheduleQuery::default()).await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn get_text_returns_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sporty-videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<video><source src=\"https://cdn.example/clip.mp4\"></video>"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let html = client
        .get_text(&format!("{}/sporty-videos?playId=abc", mock_server.uri()))
        .await
        .unwrap();
    assert!(html.contains("clip.mp4"));
}

#[tokio::test]
async fn get_text_rejects_bad_url() {
    let client = Client::new();
    let result = client.get_text("::nope::").await;
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn unreachable_host_is_request_failed() {
    // Port 9 (discard) on localhost is closed in test environments.
    let client = Client::with_base_url("http://127.0.0.1:9");
    let result = client.team(145, &TeamQuery::default()).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
