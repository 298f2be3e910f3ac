//! Flatteners for `/schedule` responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use mlbstats_api::types::{Game, GameTeam, Schedule, Team};

use crate::parse::team::league_cells;
use crate::parse::{entity_id, entity_name, flag, int, text, text_or, win_loss};
use crate::reference::{ReferenceData, PLACEHOLDER};
use crate::table::Table;

/// Columns of [`schedule`].
pub const SCHEDULE_COLUMNS: &[&str] = &[
    "official_dt",
    "game_start",
    "date_sched",
    "date_resched",
    "date_official",
    "sched_dt",
    "sched_time",
    "resched_dt",
    "resched_time",
    "gamePk",
    "game_type",
    "inn",
    "inn_ord",
    "inn_state",
    "inn_half",
    "venue_mlbam",
    "venue_name",
    "away_mlbam",
    "away_name",
    "away_score",
    "away_record",
    "aw_pp_name",
    "aw_pp_mlbam",
    "home_mlbam",
    "home_name",
    "home_score",
    "home_record",
    "hm_pp_name",
    "hm_pp_mlbam",
    "at_bat_tm",
    "at_bat_mlbam",
    "at_bat_bsname",
    "on_mound_mlbam",
    "on_mound_bsname",
    "abstract_state",
    "abstract_code",
    "detailed_state",
    "detailed_code",
    "status_code",
    "reason",
    "bc_tv_aw",
    "bc_tv_aw_res",
    "bc_tv_hm",
    "bc_tv_hm_res",
    "bc_radio_aw",
    "bc_radio_hm",
    "recap_url",
    "recap_title",
    "recap_desc",
    "recap_avail",
];

/// Columns of [`team_schedule`]: one team's games with league and division
/// context for both sides.
pub const TEAM_SCHEDULE_COLUMNS: &[&str] = &[
    "season",
    "date",
    "gamePk",
    "game_type",
    "status_abstract",
    "status_detailed",
    "is_home",
    "is_win",
    "away_mlbam",
    "away_name",
    "away_location",
    "away_franchise",
    "away_club",
    "away_lg_mlbam",
    "away_lg_name",
    "away_lg_short",
    "away_lg_abbrv",
    "away_div_mlbam",
    "away_div_name",
    "away_div_short",
    "away_div_abbrv",
    "away_score",
    "home_mlbam",
    "home_name",
    "home_location",
    "home_franchise",
    "home_club",
    "home_lg_mlbam",
    "home_lg_name",
    "home_lg_short",
    "home_lg_abbrv",
    "home_div_mlbam",
    "home_div_name",
    "home_div_short",
    "home_div_abbrv",
    "home_score",
    "day_game_number",
    "double_header",
    "series_game",
    "series_length",
    "series_description",
    "scheduled_inns",
    "reschedule_date_to",
    "rescheduled_date_from",
    "venue_mlbam",
    "venue_name",
    "recap_title",
    "recap_desc",
    "recap_url",
    "recap_avail",
];

pub const GAME_SEARCH_COLUMNS: &[&str] = &[
    "gamePk",
    "away_mlbam",
    "away_name",
    "home_mlbam",
    "home_name",
    "date",
    "type",
    "venue",
    "start_time",
    "status",
];

pub const ADJACENT_GAME_COLUMNS: &[&str] = &["gamePk", "opponent", "opp_mlbam", "date", "gameType"];

pub const HIGHLIGHT_COLUMNS: &[&str] = &[
    "date",
    "gamePk",
    "game_num",
    "away_mlbam",
    "away_score",
    "home_mlbam",
    "home_score",
    "title",
    "blurb",
    "description",
    "url",
];

const RECAP_TITLE: &str = "Daily Recap";
const TIME_FORMAT: &str = "%-I:%M %p";

/// A recap video found in a game's `epgAlternate` media.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recap {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// First "Daily Recap" item with an mp4 playback. When no item has one,
/// the last item's title and description are kept without a URL.
pub fn daily_recap(game: &Game) -> Recap {
    let mut recap = Recap::default();
    let Some(media) = game.content.as_ref().and_then(|c| c.media.as_ref()) else {
        return recap;
    };
    for epg in media
        .epg_alternate
        .iter()
        .filter(|e| e.title.as_deref() == Some(RECAP_TITLE))
    {
        for item in &epg.items {
            recap.title = item.title.clone().unwrap_or_default();
            recap.description = item.description.clone();
            if let Some(url) = item.mp4_url() {
                recap.url = Some(url.to_string());
                return recap;
            }
        }
    }
    recap
}

fn recap_cells(game: &Game) -> [Value; 4] {
    let recap = daily_recap(game);
    let avail = recap.url.is_some();
    [
        Value::from(recap.title),
        text(recap.description.as_deref()),
        Value::from(recap.url.unwrap_or_default()),
        Value::Bool(avail),
    ]
}

/// Parses an API UTC timestamp (`2021-04-01T17:05:00Z`) into `tz`.
pub fn local_time(timestamp: Option<&str>, tz: Tz) -> Option<DateTime<Tz>> {
    let ts = timestamp?;
    match DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => Some(dt.with_timezone(&Utc).with_timezone(&tz)),
        Err(e) => {
            tracing::debug!("unparsable game time {:?}: {}", ts, e);
            None
        }
    }
}

fn score_text(side: &GameTeam) -> String {
    side.score.unwrap_or(0).to_string()
}

fn record_text(side: &GameTeam) -> String {
    let rec = side.league_record.as_ref();
    win_loss(rec.and_then(|r| r.wins), rec.and_then(|r| r.losses))
}

#[derive(Default)]
struct Broadcasts {
    tv_away: String,
    tv_away_res: String,
    tv_home: String,
    tv_home_res: String,
    radio_away: String,
    radio_home: String,
}

/// English-language broadcasts only.
fn broadcasts(game: &Game) -> Broadcasts {
    let mut out = Broadcasts::default();
    for bc in game.broadcasts.iter().filter(|b| b.language.as_deref() == Some("en")) {
        let name = bc.name.clone().unwrap_or_default();
        let away = bc.home_away.as_deref() == Some("away");
        if bc.broadcast_type.as_deref() == Some("TV") {
            let res = bc
                .video_resolution
                .as_ref()
                .and_then(|r| r.resolution_short.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            if away {
                out.tv_away = name;
                out.tv_away_res = res;
            } else {
                out.tv_home = name;
                out.tv_home_res = res;
            }
        } else if away {
            out.radio_away = name;
        } else {
            out.radio_home = name;
        }
    }
    out
}

/// Full schedule rows with start times converted to `tz`. `game_start` is
/// the rescheduled time when there is one.
pub fn schedule(sched: &Schedule, tz: Tz) -> Table {
    let mut table = Table::new(SCHEDULE_COLUMNS);
    for (date, game) in sched.games() {
        let away = &game.teams.away;
        let home = &game.teams.home;
        let linescore = game.linescore.clone().unwrap_or_default();
        let offense = linescore.offense.unwrap_or_default();
        let defense = linescore.defense.unwrap_or_default();

        let sched_dt = local_time(game.game_date.as_deref(), tz);
        let resched_dt = local_time(game.reschedule_date.as_deref(), tz);
        let sched_time = sched_dt.map(|d| d.format(TIME_FORMAT).to_string());
        let resched_time = resched_dt.map(|d| d.format(TIME_FORMAT).to_string());
        let game_start = resched_time.clone().or_else(|| sched_time.clone());
        let official_dt = match (game.official_date.as_deref(), game_start.as_deref()) {
            (Some(day), Some(start)) => {
                NaiveDateTime::parse_from_str(&format!("{} {}", day, start), "%Y-%m-%d %I:%M %p")
                    .ok()
                    .map(|d| Value::from(d.format("%Y-%m-%d %H:%M:%S").to_string()))
            }
            _ => None,
        };

        let at_bat_tm = match entity_id(offense.team.as_ref()) {
            Some(id) if Some(id) == away.team.id => "away",
            _ => "home",
        };
        let batter = offense.batter.unwrap_or_default();
        let pitcher = defense.pitcher.unwrap_or_default();
        let aw_pp = away.probable_pitcher.clone().unwrap_or_default();
        let hm_pp = home.probable_pitcher.clone().unwrap_or_default();
        let status = &game.status;
        let bc = broadcasts(game);
        let stamp = |d: Option<DateTime<Tz>>| {
            Value::from(d.map_or_else(|| PLACEHOLDER.to_string(), |d| d.to_rfc3339()))
        };
        let dash = |s: Option<String>| Value::from(s.unwrap_or_else(|| PLACEHOLDER.to_string()));

        let mut row = vec![
            official_dt.unwrap_or(Value::Null),
            dash(game_start),
            text(date.date.as_deref()),
            text(game.reschedule_game_date.as_deref()),
            text(game.official_date.as_deref()),
            stamp(sched_dt),
            dash(sched_time),
            stamp(resched_dt),
            dash(resched_time),
            game.game_pk
                .map_or_else(|| Value::from(PLACEHOLDER), |pk| Value::from(pk.to_string())),
            text(game.game_type.as_deref()),
            linescore.current_inning.map_or_else(|| Value::from(""), Value::from),
            text_or(linescore.current_inning_ordinal.as_deref(), ""),
            text_or(linescore.inning_state.as_deref(), ""),
            text_or(linescore.inning_half.as_deref(), ""),
            int(entity_id(game.venue.as_ref())),
            text(entity_name(game.venue.as_ref())),
            int(away.team.id),
            text(away.team.name.as_deref()),
            Value::from(score_text(away)),
            Value::from(record_text(away)),
            text_or(aw_pp.full_name.as_deref(), ""),
            aw_pp.id.map_or_else(|| Value::from(""), Value::from),
            int(home.team.id),
            text(home.team.name.as_deref()),
            Value::from(score_text(home)),
            Value::from(record_text(home)),
            text_or(hm_pp.full_name.as_deref(), ""),
            hm_pp.id.map_or_else(|| Value::from(""), Value::from),
            Value::from(at_bat_tm),
            Value::from(batter.id.unwrap_or(0)),
            text_or(batter.last_init_name.as_deref(), ""),
            Value::from(pitcher.id.unwrap_or(0)),
            text_or(pitcher.last_init_name.as_deref(), ""),
            text(status.abstract_game_state.as_deref()),
            text(status.abstract_game_code.as_deref()),
            text(status.detailed_state.as_deref()),
            text(status.coded_game_state.as_deref()),
            text(status.status_code.as_deref()),
            text(status.reason.as_deref()),
            Value::from(bc.tv_away),
            Value::from(bc.tv_away_res),
            Value::from(bc.tv_home),
            Value::from(bc.tv_home_res),
            Value::from(bc.radio_away),
            Value::from(bc.radio_home),
        ];
        let [title, desc, url, avail] = recap_cells(game);
        row.extend([url, title, desc, avail]);
        table.push_row(row);
    }
    table
}

fn side_cells(side: &GameTeam, refs: &ReferenceData) -> Vec<Value> {
    let team = &side.team;
    let mut cells = vec![
        int(team.id),
        text(team.name.as_deref()),
        text(team.location_name.as_deref()),
        text(team.franchise_name.as_deref()),
        text(team.club_name.as_deref()),
    ];
    cells.extend(league_cells(refs, entity_id(team.league.as_ref())));
    cells.extend(league_cells(refs, entity_id(team.division.as_ref())));
    cells.push(Value::from(side.score.unwrap_or(0)));
    cells
}

/// Schedule rows from `team_id`'s point of view (`is_home`, `is_win`),
/// with both teams joined to the league table. Needs `hydrate=team`.
pub fn team_schedule(sched: &Schedule, refs: &ReferenceData, team_id: i64) -> Table {
    let mut table = Table::new(TEAM_SCHEDULE_COLUMNS);
    for (date, game) in sched.games() {
        let away = &game.teams.away;
        let home = &game.teams.home;
        let is_home = home.team.id == Some(team_id);
        let ours = if is_home { home } else { away };

        let mut row = vec![
            text(game.season.as_deref()),
            text(date.date.as_deref()),
            int(game.game_pk),
            text(game.game_type.as_deref()),
            text_or(game.status.abstract_game_state.as_deref(), PLACEHOLDER),
            text_or(game.status.detailed_state.as_deref(), PLACEHOLDER),
            Value::Bool(is_home),
            flag(ours.is_winner),
        ];
        row.extend(side_cells(away, refs));
        row.extend(side_cells(home, refs));
        row.extend([
            int(game.game_number),
            Value::Bool(game.double_header.as_deref() != Some("N")),
            int(game.series_game_number),
            int(game.games_in_series),
            text(game.series_description.as_deref()),
            int(game.scheduled_innings),
            text(game.reschedule_game_date.as_deref()),
            text(game.rescheduled_from_date.as_deref()),
            entity_id(game.venue.as_ref())
                .map_or_else(|| Value::from(PLACEHOLDER), Value::from),
            text_or(entity_name(game.venue.as_ref()), PLACEHOLDER),
        ]);
        row.extend(recap_cells(game));
        table.push_row(row);
    }
    table
}

pub fn game_search(sched: &Schedule) -> Table {
    let mut table = Table::new(GAME_SEARCH_COLUMNS);
    for (_, game) in sched.games() {
        let away = &game.teams.away.team;
        let home = &game.teams.home.team;
        let id_or_dash = |id: Option<i64>| id.map_or_else(|| Value::from(PLACEHOLDER), Value::from);
        table.push_row(vec![
            id_or_dash(game.game_pk),
            id_or_dash(away.id),
            text_or(away.name.as_deref(), PLACEHOLDER),
            id_or_dash(home.id),
            text_or(home.name.as_deref(), PLACEHOLDER),
            text_or(game.official_date.as_deref(), PLACEHOLDER),
            text_or(game.game_type.as_deref(), PLACEHOLDER),
            text_or(entity_name(game.venue.as_ref()), PLACEHOLDER),
            text_or(game.game_date.as_deref(), PLACEHOLDER),
            text_or(game.status.detailed_state.as_deref(), PLACEHOLDER),
        ]);
    }
    table
}

/// One-row table for the first game of a `nextGameSchedule` or
/// `previousGameSchedule`, seen from `team_id`. `None` when there is no game.
pub fn adjacent_game(sched: Option<&Schedule>, team_id: i64) -> Option<Table> {
    let (_, game) = sched?.games().next()?;
    let away = &game.teams.away.team;
    let home = &game.teams.home.team;
    let name = |t: &Team| t.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    let (opponent, opp_mlbam) = if away.id == Some(team_id) {
        (format!("@ {}", name(home)), home.id)
    } else {
        (format!("vs {}", name(away)), away.id)
    };
    let date = game.game_date.as_deref().and_then(|d| d.get(..10));

    let mut table = Table::new(ADJACENT_GAME_COLUMNS);
    table.push_row(vec![
        int(game.game_pk),
        Value::from(opponent),
        int(opp_mlbam),
        text_or(date, ""),
        text_or(game.game_type.as_deref(), ""),
    ]);
    Some(table)
}

/// Highlight videos of every game that has a highlights hydration.
pub fn highlights(sched: &Schedule) -> Table {
    let mut table = Table::new(HIGHLIGHT_COLUMNS);
    for (date, game) in sched.games() {
        let Some(items) = game
            .content
            .as_ref()
            .and_then(|c| c.highlights.as_ref())
            .and_then(|h| h.highlights.as_ref())
            .map(|h| &h.items)
        else {
            continue;
        };
        for item in items {
            table.push_row(vec![
                text(date.date.as_deref()),
                int(game.game_pk),
                int(game.game_number),
                int(game.teams.away.team.id),
                int(game.teams.away.score),
                int(game.teams.home.team.id),
                int(game.teams.home.score),
                text(item.title.as_deref()),
                text(item.blurb.as_deref()),
                text(item.description.as_deref()),
                text(item.mp4_url()),
            ]);
        }
    }
    table
}

/// One text line per game: `CWS  3  vs  1  MIN (Final) | 634642`.
/// Live games show the inning, games not started show their start time in `tz`.
pub fn score_lines(sched: &Schedule, refs: &ReferenceData, tz: Tz) -> Vec<String> {
    sched
        .games()
        .map(|(_, game)| {
            let away = &game.teams.away;
            let home = &game.teams.home;
            let season = game.season.as_deref().and_then(|s| s.parse().ok());
            let linescore = game.linescore.clone().unwrap_or_default();
            let details = match game.status.abstract_game_state.as_deref() {
                Some("Final") => "Final".to_string(),
                Some("Live") => {
                    let state: String = linescore
                        .inning_state
                        .unwrap_or_default()
                        .chars()
                        .take(3)
                        .collect();
                    format!("{} {}", state, linescore.current_inning_ordinal.unwrap_or_default())
                }
                _ => local_time(
                    game.reschedule_date.as_deref().or(game.game_date.as_deref()),
                    tz,
                )
                .map_or_else(|| PLACEHOLDER.to_string(), |d| d.format("%-I:%M %p %Z").to_string()),
            };
            format!(
                "{:3} {:>2}  vs  {:2} {:3} ({}) | {}",
                refs.abbreviation_for(Some(&away.team), season),
                score_text(away),
                score_text(home),
                refs.abbreviation_for(Some(&home.team), season),
                details,
                game.game_pk.map_or_else(|| PLACEHOLDER.to_string(), |pk| pk.to_string()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fixture() -> Schedule {
        serde_json::from_value(json!({
            "dates": [{"date": "2021-04-01", "games": [{
                "gamePk": 634642, "gameType": "R", "season": "2021",
                "gameDate": "2021-04-01T20:10:00Z", "officialDate": "2021-04-01",
                "status": {"abstractGameState": "Final", "detailedState": "Final"},
                "teams": {
                    "away": {"team": {"id": 145, "name": "Chicago White Sox", "league": {"id": 103}, "division": {"id": 202}},
                             "score": 3, "isWinner": true, "leagueRecord": {"wins": 1, "losses": 0}},
                    "home": {"team": {"id": 108, "name": "Los Angeles Angels", "league": {"id": 103}, "division": {"id": 200}},
                             "score": 1, "isWinner": false}
                },
                "venue": {"id": 1, "name": "Angel Stadium"},
                "doubleHeader": "N", "gameNumber": 1,
                "broadcasts": [
                    {"name": "NBCS-CHI", "type": "TV", "language": "en", "homeAway": "away",
                     "videoResolution": {"resolutionShort": "HD"}},
                    {"name": "ESPN Deportes", "type": "TV", "language": "es", "homeAway": "home"},
                    {"name": "WMVP", "type": "AM", "language": "en", "homeAway": "away"}
                ],
                "content": {
                    "media": {"epgAlternate": [{"title": "Daily Recap", "items": [
                        {"title": "CWS@LAA: Recap", "description": "Sox win",
                         "playbacks": [{"name": "mp4Avc", "url": "https://x/recap.mp4"}]}
                    ]}]},
                    "highlights": {"highlights": {"items": [
                        {"title": "Abreu homers", "playbacks": [{"name": "highBit", "url": "https://x/hr.mp4"}]}
                    ]}}
                }
            }]}]
        }))
        .unwrap()
    }

    #[test]
    fn schedule_converts_times_and_filters_broadcasts() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let table = schedule(&fixture(), tz);
        assert_eq!(table.columns().len(), 50);
        assert_eq!(table.cell(0, "sched_time"), Some(&json!("4:10 PM")));
        assert_eq!(table.cell(0, "game_start"), Some(&json!("4:10 PM")));
        assert_eq!(table.cell(0, "official_dt"), Some(&json!("2021-04-01 16:10:00")));
        assert_eq!(table.cell(0, "resched_time"), Some(&json!("-")));
        assert_eq!(table.cell(0, "gamePk"), Some(&json!("634642")));
        assert_eq!(table.cell(0, "away_record"), Some(&json!("1-0")));
        assert_eq!(table.cell(0, "bc_tv_aw_res"), Some(&json!("HD")));
        assert_eq!(table.cell(0, "bc_tv_hm"), Some(&json!("")));
        assert_eq!(table.cell(0, "bc_radio_aw"), Some(&json!("WMVP")));
        assert_eq!(table.cell(0, "recap_url"), Some(&json!("https://x/recap.mp4")));
        assert_eq!(table.cell(0, "recap_avail"), Some(&json!(true)));
    }

    #[test]
    fn team_schedule_views_from_team() {
        let table = team_schedule(&fixture(), &ReferenceData::bundled(), 145);
        assert_eq!(table.columns(), TEAM_SCHEDULE_COLUMNS);
        assert_eq!(table.cell(0, "is_home"), Some(&json!(false)));
        assert_eq!(table.cell(0, "is_win"), Some(&json!(true)));
        assert_eq!(table.cell(0, "away_div_short"), Some(&json!("AL Central")));
        assert_eq!(table.cell(0, "home_div_short"), Some(&json!("AL West")));
        assert_eq!(table.cell(0, "double_header"), Some(&json!(false)));
        assert_eq!(table.cell(0, "recap_title"), Some(&json!("CWS@LAA: Recap")));
    }

    #[test]
    fn game_search_and_highlights() {
        let games = game_search(&fixture());
        assert_eq!(games.cell(0, "venue"), Some(&json!("Angel Stadium")));
        assert_eq!(games.cell(0, "date"), Some(&json!("2021-04-01")));

        let hl = highlights(&fixture());
        assert_eq!(hl.len(), 1);
        assert_eq!(hl.cell(0, "url"), Some(&json!("https://x/hr.mp4")));
        assert_eq!(hl.cell(0, "home_score"), Some(&json!(1)));
    }

    #[test]
    fn adjacent_game_names_opponent() {
        let sched = fixture();
        let away_view = adjacent_game(Some(&sched), 145).unwrap();
        assert_eq!(away_view.cell(0, "opponent"), Some(&json!("@ Los Angeles Angels")));
        assert_eq!(away_view.cell(0, "opp_mlbam"), Some(&json!(108)));
        let home_view = adjacent_game(Some(&sched), 108).unwrap();
        assert_eq!(home_view.cell(0, "opponent"), Some(&json!("vs Chicago White Sox")));
        assert!(adjacent_game(Some(&Schedule::default()), 145).is_none());
        assert!(adjacent_game(None, 145).is_none());
    }

    #[test]
    fn score_line_format() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let lines = score_lines(&fixture(), &ReferenceData::bundled(), tz);
        assert_eq!(lines, vec!["CWS  3  vs  1  LAA (Final) | 634642".to_string()]);

        let unknown: Schedule = serde_json::from_value(json!({
            "dates": [{"games": [{"gamePk": 1, "season": "2021",
                "status": {"abstractGameState": "Final"},
                "teams": {"away": {"team": {"id": 9001, "abbreviation": "XYZ"}, "score": 2},
                          "home": {"team": {"id": 9002}, "score": 0}}}]}]
        }))
        .unwrap();
        let lines = score_lines(&unknown, &ReferenceData::bundled(), tz);
        assert_eq!(lines, vec!["XYZ  2  vs  0  -   (Final) | 1".to_string()]);
    }

    #[test]
    fn recap_without_mp4_keeps_title() {
        let game: Game = serde_json::from_value(json!({
            "content": {"media": {"epgAlternate": [{"title": "Daily Recap", "items": [
                {"title": "Recap", "playbacks": [{"name": "hlsCloud", "url": "https://x/a.m3u8"}]}
            ]}]}}
        }))
        .unwrap();
        let recap = daily_recap(&game);
        assert_eq!(recap.title, "Recap");
        assert!(recap.url.is_none());
    }
}
