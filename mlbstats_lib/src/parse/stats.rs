//! Flatteners for `/people/{id}/stats`, `/teams/{id}/stats`, `/teams/stats`
//! and `/stats` responses.

use serde_json::Value;

use mlbstats_api::types::{GameType, StatBlock, StatGroup, StatSplit, StatType, StatsResponse};

use crate::parse::{
    at, at_or_dash, at_or_null, entity_id, entity_name, flag, int, placeholder, pos_abbreviation,
    renamed_stat, team_id, team_name, text, text_or, Record,
};
use crate::reference::ReferenceData;
use crate::statdict::{columns_for, with_prefix, STATDICT, W_SEASON};
use crate::table::Table;

/// Columns of a play or pitch log row, after the player/team prefix.
pub const LOG_COLUMNS: &[&str] = &[
    "gamePk",
    "date",
    "game_num",
    "play_id",
    "ab_num",
    "event",
    "desc",
    "balls",
    "strikes",
    "outs",
    "inning",
    "r1b",
    "r2b",
    "r3b",
    "pitch_num",
    "pitch_hand",
    "pitch_type",
    "pitch_type_id",
    "start_spd",
    "sz_top",
    "sz_bot",
    "zone",
    "px",
    "py",
    "bat_side",
    "launch_spd",
    "launch_ang",
    "total_dist",
    "trajectory",
    "hx",
    "hy",
];

/// Columns of [`play_search`].
pub const PLAY_SEARCH_COLUMNS: &[&str] = &[
    "play_id",
    "batter_name",
    "batter_mlbam",
    "pitcher_name",
    "pitcher_mlbam",
    "pitch_type",
    "pitchX",
    "pitchY",
    "startSpeed",
    "strikeZoneTop",
    "strikeZoneBottom",
    "zone",
    "launchSpeed",
    "launchAngle",
    "totalDistance",
    "trajectory",
    "hitX",
    "hitY",
    "event_type",
    "event",
    "season",
    "date",
    "gameType",
    "gamePk",
    "balls",
    "strikes",
    "outs",
    "inning",
    "runnerOnFirst",
    "runnerOnSecond",
    "runnerOnThird",
    "description",
    "isInPlay",
    "isStrike",
    "isBall",
    "isAtBat",
    "isPlateAppearance",
    "batterStands",
    "pitcherThrows",
    "team_name",
    "team_mlbam",
    "opponent_name",
    "opponent_mlbam",
    "away_mlbam",
    "home_mlbam",
    "game_label",
];

pub const PLAYOFF_COLUMNS: &[&str] = &[
    "season",
    "gt",
    "game_type",
    "wins",
    "losses",
    "title_winner",
    "sort_order",
];

const GAME_LOG_PLAYER_PREFIX: &[&str] = &[
    "date",
    "isHome",
    "isWin",
    "gamePk",
    "mlbam",
    "name",
    "positions",
    "tm_mlbam",
    "opp_mlbam",
    "opp_name",
];

const GAME_LOG_TEAM_PREFIX: &[&str] = &[
    "date", "isHome", "isWin", "gamePk", "mlbam", "name", "opp_mlbam", "opp_name",
];

const LEADER_PREFIX: &[&str] = &[
    "rank",
    "season",
    "position",
    "player_mlbam",
    "player_name",
    "team_mlbam",
    "team_name",
    "league_mlbam",
    "league_name",
];

const LEAGUE_TEAM_PREFIX: &[&str] = &[
    "season",
    "team_mlbam",
    "team",
    "league_mlbam",
    "league",
    "div_mlbam",
    "div",
];

fn block_group(block: &StatBlock) -> Option<StatGroup> {
    block.group.as_str().parse().ok()
}

fn block_type(block: &StatBlock) -> Option<StatType> {
    block.stat_type.as_str().parse().ok()
}

fn in_group(block: &StatBlock, group: StatGroup) -> bool {
    block_group(block).map_or(true, |g| g == group)
}

/// Which split key holds the subject player, and which the opponent.
/// Matchup and log types key players by role; everything else uses `player`.
pub fn player_keys(stat_type: StatType, group: StatGroup) -> (&'static str, Option<&'static str>) {
    if stat_type.is_vs_player() || stat_type.is_vs_team() || stat_type.is_log() {
        match group {
            StatGroup::Pitching => ("pitcher", Some("batter")),
            _ => ("batter", Some("pitcher")),
        }
    } else {
        ("player", None)
    }
}

/// Renamed stat line. Fielding positions are reduced to their abbreviation.
fn stat_record(split: &StatSplit) -> Record {
    let mut rec = renamed_stat(&split.stat);
    let abbrv = match rec.get("Pos") {
        Some(Value::Object(pos)) => Some(pos.get("abbreviation").cloned().unwrap_or(Value::Null)),
        Some(_) => None,
        None => pos_abbreviation(split.position.as_ref()).map(|a| Value::String(a.to_string())),
    };
    if let Some(abbrv) = abbrv {
        rec.insert("Pos".to_string(), abbrv);
    }
    rec
}

fn league_id(split: &StatSplit) -> Option<i64> {
    entity_id(split.league.as_ref())
        .or_else(|| split.team.as_ref().and_then(|t| entity_id(t.league.as_ref())))
}

/// Career and year-by-year rows for one group. Career rows use `Career` as the season.
pub fn career_and_seasons(
    resp: &StatsResponse,
    refs: &ReferenceData,
    group: StatGroup,
    advanced: bool,
) -> Table {
    let mut records = Vec::new();
    for block in resp.stats.iter().filter(|b| in_group(b, group)) {
        let Some(st) = block_type(block) else { continue };
        if st.is_advanced() != advanced {
            continue;
        }
        let career = matches!(st, StatType::Career | StatType::CareerAdvanced);
        let yearly = matches!(
            st,
            StatType::YearByYear
                | StatType::YearByYearAdvanced
                | StatType::Season
                | StatType::SeasonAdvanced
        );
        if !career && !yearly {
            continue;
        }
        for split in &block.splits {
            let mut rec = stat_record(split);
            rec.insert("game_type".into(), text(split.game_type.as_deref()));
            if career {
                rec.insert("season".into(), Value::from("Career"));
                rec.insert("team_mlbam".into(), placeholder());
                rec.insert("team".into(), placeholder());
                rec.insert("league_mlbam".into(), placeholder());
                rec.insert("league".into(), placeholder());
            } else {
                let lg = league_id(split);
                rec.insert("season".into(), text_or(split.season.as_deref(), "-"));
                rec.insert("team_mlbam".into(), int(team_id(split.team.as_ref())));
                rec.insert("team".into(), text(team_name(split.team.as_ref())));
                rec.insert("league_mlbam".into(), int(lg));
                rec.insert("league".into(), Value::from(refs.league_abbreviation(lg)));
            }
            records.push(rec);
        }
    }
    Table::from_records(&records, &with_prefix(W_SEASON, group, advanced))
}

/// Generic player stats for one stat type. Matchup types carry opponent
/// columns, game logs carry the opposing team. Columns with no data are dropped.
pub fn player_stats(
    resp: &StatsResponse,
    refs: &ReferenceData,
    stat_type: StatType,
    group: StatGroup,
) -> Table {
    let (player_key, opp_key) = player_keys(stat_type, group);
    let mut records = Vec::new();
    for block in resp
        .stats
        .iter()
        .filter(|b| block_type(b) == Some(stat_type) && in_group(b, group))
    {
        for split in &block.splits {
            let mut rec = stat_record(split);
            let player = split.person(player_key);
            let lg = league_id(split);
            rec.insert("season".into(), text_or(split.season.as_deref(), "-"));
            rec.insert("game_type".into(), text(split.game_type.as_deref()));
            rec.insert("player".into(), text(player.and_then(|p| p.display_name())));
            rec.insert("player_mlbam".into(), int(player.and_then(|p| p.id)));
            rec.insert("team".into(), text(team_name(split.team.as_ref())));
            rec.insert("team_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert(
                "league".into(),
                lg.map_or(Value::Null, |id| refs.league_abbreviation(Some(id)).into()),
            );
            rec.insert("league_mlbam".into(), int(lg));

            if let Some(opp_key) = opp_key {
                let opp = split.person(opp_key);
                rec.insert("opp_player".into(), text(opp.and_then(|p| p.display_name())));
                rec.insert("opp_player_mlbam".into(), int(opp.and_then(|p| p.id)));
            }
            let opp_team = split.opponent.as_ref();
            let opp_lg = opp_team.and_then(|t| entity_id(t.league.as_ref()));
            rec.insert("opp_team".into(), text(team_name(opp_team)));
            rec.insert("opp_team_mlbam".into(), int(team_id(opp_team)));
            rec.insert(
                "opp_league".into(),
                opp_lg.map_or(Value::Null, |id| refs.league_abbreviation(Some(id)).into()),
            );
            rec.insert("opp_league_mlbam".into(), int(opp_lg));
            records.push(rec);
        }
    }

    let mut prefix = vec![
        "season",
        "game_type",
        "player",
        "player_mlbam",
        "team",
        "team_mlbam",
        "league",
        "league_mlbam",
    ];
    if stat_type.is_vs_player() || stat_type.is_vs_team() {
        prefix.extend(["opp_player", "opp_player_mlbam"]);
    }
    if stat_type.is_vs_player() || stat_type.is_vs_team() || stat_type == StatType::GameLog {
        prefix.extend(["opp_team", "opp_team_mlbam", "opp_league", "opp_league_mlbam"]);
    }
    let mut table = Table::from_records(
        &records,
        &with_prefix(&prefix, group, stat_type.is_advanced()),
    );
    table.drop_empty_columns();
    table
}

fn count_field(play: &Value, key: &str) -> Value {
    at(play, &format!("/count/{}", key))
        .or_else(|| at(play, &format!("/details/count/{}", key)))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Play-by-play or pitch-by-pitch rows (`playLog` / `pitchLog`).
pub fn play_log(resp: &StatsResponse, stat_type: StatType, group: StatGroup) -> Table {
    let (player_key, opp_key) = player_keys(stat_type, group);
    let mut records = Vec::new();
    for block in resp.stats.iter().filter(|b| in_group(b, group)) {
        for split in &block.splits {
            let play = split.stat.get("play").unwrap_or(&Value::Null);
            let player = split.person(player_key);
            let opp = opp_key.and_then(|k| split.person(k));
            let game = split.game.clone().unwrap_or_default();

            let mut rec = Record::new();
            rec.insert("season".into(), text_or(split.season.as_deref(), "-"));
            rec.insert("player".into(), text(player.and_then(|p| p.display_name())));
            rec.insert("player_mlbam".into(), int(player.and_then(|p| p.id)));
            rec.insert("team".into(), text(team_name(split.team.as_ref())));
            rec.insert("team_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert("opp_player".into(), text(opp.and_then(|p| p.display_name())));
            rec.insert("opp_player_mlbam".into(), int(opp.and_then(|p| p.id)));
            rec.insert("opp_team".into(), text(team_name(split.opponent.as_ref())));
            rec.insert("opp_team_mlbam".into(), int(team_id(split.opponent.as_ref())));

            rec.insert("gamePk".into(), int(game.game_pk));
            rec.insert("date".into(), text(split.date.as_deref()));
            rec.insert("game_num".into(), int(game.game_number));
            rec.insert("play_id".into(), at_or_null(play, "/playId"));
            rec.insert("ab_num".into(), at_or_null(play, "/atBatNumber"));
            rec.insert("event".into(), at_or_null(play, "/details/event"));
            rec.insert("desc".into(), at_or_null(play, "/details/description"));
            rec.insert("balls".into(), count_field(play, "balls"));
            rec.insert("strikes".into(), count_field(play, "strikes"));
            rec.insert("outs".into(), count_field(play, "outs"));
            rec.insert("inning".into(), count_field(play, "inning"));
            rec.insert("r1b".into(), count_field(play, "runnerOn1b"));
            rec.insert("r2b".into(), count_field(play, "runnerOn2b"));
            rec.insert("r3b".into(), count_field(play, "runnerOn3b"));
            rec.insert("pitch_num".into(), at_or_null(play, "/pitchNumber"));
            rec.insert("pitch_hand".into(), at_or_null(play, "/details/pitchHand/code"));
            rec.insert("pitch_type".into(), at_or_null(play, "/details/type/description"));
            rec.insert("pitch_type_id".into(), at_or_null(play, "/details/type/code"));
            rec.insert("start_spd".into(), at_or_null(play, "/pitchData/startSpeed"));
            rec.insert("sz_top".into(), at_or_null(play, "/pitchData/strikeZoneTop"));
            rec.insert("sz_bot".into(), at_or_null(play, "/pitchData/strikeZoneBottom"));
            rec.insert("zone".into(), at_or_null(play, "/pitchData/zone"));
            rec.insert("px".into(), at_or_null(play, "/pitchData/coordinates/pX"));
            rec.insert("py".into(), at_or_null(play, "/pitchData/coordinates/pY"));
            rec.insert("bat_side".into(), at_or_null(play, "/details/batSide/code"));
            rec.insert("launch_spd".into(), at_or_null(play, "/hitData/launchSpeed"));
            rec.insert("launch_ang".into(), at_or_null(play, "/hitData/launchAngle"));
            rec.insert("total_dist".into(), at_or_null(play, "/hitData/totalDistance"));
            rec.insert("trajectory".into(), at_or_null(play, "/hitData/trajectory"));
            rec.insert("hx".into(), at_or_null(play, "/hitData/coordinates/landingPosX"));
            rec.insert("hy".into(), at_or_null(play, "/hitData/coordinates/landingPosY"));
            records.push(rec);
        }
    }
    let columns: Vec<&str> = [
        "season",
        "player",
        "player_mlbam",
        "team",
        "team_mlbam",
        "opp_player",
        "opp_player_mlbam",
        "opp_team",
        "opp_team_mlbam",
    ]
    .into_iter()
    .chain(LOG_COLUMNS.iter().copied())
    .collect();
    let mut table = Table::from_records(&records, &columns);
    table.drop_empty_columns();
    table
}

/// Per-game rows for a player (`stats=gameLog` on `/people/{id}/stats`).
pub fn player_game_log(resp: &StatsResponse, group: StatGroup) -> Table {
    let mut records = Vec::new();
    for block in resp.stats.iter().filter(|b| in_group(b, group)) {
        for split in &block.splits {
            let mut rec = stat_record(split);
            let player = split.player.as_ref();
            let positions: Vec<&str> = split
                .positions_played
                .iter()
                .filter_map(|p| p.abbreviation.as_deref())
                .collect();
            game_log_context(&mut rec, split);
            rec.insert("mlbam".into(), int(player.and_then(|p| p.id)));
            rec.insert("name".into(), text(player.and_then(|p| p.display_name())));
            rec.insert("positions".into(), Value::from(positions.join("|")));
            rec.insert("tm_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert(
                "opp_name".into(),
                text(team_name(split.opponent.as_ref())),
            );
            records.push(rec);
        }
    }
    Table::from_records(&records, &with_prefix(GAME_LOG_PLAYER_PREFIX, group, false))
}

/// Per-game rows for a team. Opponent names come from the reference teams
/// table when it knows the opponent, else from the response.
pub fn team_game_log(
    resp: &StatsResponse,
    refs: &ReferenceData,
    group: StatGroup,
    season: i32,
) -> Table {
    let mut records = Vec::new();
    for block in resp.stats.iter().filter(|b| in_group(b, group)) {
        for split in &block.splits {
            let mut rec = stat_record(split);
            game_log_context(&mut rec, split);
            let opp = team_id(split.opponent.as_ref());
            let opp_name = opp
                .and_then(|id| refs.team(id, Some(season)))
                .map(|t| t.full_name.as_str())
                .or_else(|| team_name(split.opponent.as_ref()));
            rec.insert("mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert("name".into(), text(team_name(split.team.as_ref())));
            rec.insert("opp_name".into(), text_or(opp_name, "-"));
            records.push(rec);
        }
    }
    Table::from_records(&records, &with_prefix(GAME_LOG_TEAM_PREFIX, group, false))
}

fn game_log_context(rec: &mut Record, split: &StatSplit) {
    rec.insert("date".into(), text_or(split.date.as_deref(), ""));
    rec.insert("isHome".into(), flag(split.is_home));
    rec.insert("isWin".into(), flag(split.is_win));
    rec.insert(
        "gamePk".into(),
        int(split.game.as_ref().and_then(|g| g.game_pk)),
    );
    rec.insert("opp_mlbam".into(), int(team_id(split.opponent.as_ref())));
}

/// Major-league rows of a `byDateRange` response.
pub fn date_range(resp: &StatsResponse, group: StatGroup, advanced: bool) -> Table {
    let records: Vec<Record> = resp
        .stats
        .iter()
        .flat_map(|b| b.splits.iter())
        .filter(|s| s.sport_id() == Some(1))
        .map(|split| {
            let mut rec = stat_record(split);
            rec.insert("tm_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert("tm_name".into(), text(team_name(split.team.as_ref())));
            rec
        })
        .collect();
    let mut table = Table::from_records(
        &records,
        &with_prefix(&["tm_mlbam", "tm_name"], group, advanced),
    );
    table.rename_columns(STATDICT);
    table
}

/// Major-league rows of a `statSplits` response, one per sit code and team.
pub fn stat_splits(resp: &StatsResponse, group: StatGroup, advanced: bool) -> Table {
    let records: Vec<Record> = resp
        .stats
        .iter()
        .flat_map(|b| b.splits.iter())
        .filter(|s| s.sport_id() == Some(1))
        .map(|split| {
            let code = split.split.clone().unwrap_or_default();
            let mut rec = stat_record(split);
            rec.insert("season".into(), text(split.season.as_deref()));
            rec.insert("split_code".into(), text(code.code.as_deref()));
            rec.insert("split".into(), text(code.description.as_deref()));
            rec.insert("tm_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert("tm_name".into(), text(team_name(split.team.as_ref())));
            rec
        })
        .collect();
    let prefix = ["season", "split_code", "split", "tm_mlbam", "tm_name"];
    let mut table = Table::from_records(&records, &with_prefix(&prefix, group, advanced));
    table.rename_columns(STATDICT);
    table
}

/// Team-level rows of `/teams/stats` (one per club), with league and division.
pub fn league_team_stats(
    resp: &StatsResponse,
    refs: &ReferenceData,
    group: StatGroup,
    advanced: bool,
) -> Table {
    let mut records = Vec::new();
    for block in resp.stats.iter().filter(|b| in_group(b, group)) {
        for split in &block.splits {
            let team = split.team.as_ref();
            let lg = team.and_then(|t| entity_id(t.league.as_ref()));
            let div = team.and_then(|t| entity_id(t.division.as_ref()));
            let mut rec = stat_record(split);
            rec.insert("season".into(), text(split.season.as_deref()));
            rec.insert("team_mlbam".into(), int(team_id(team)));
            rec.insert("team".into(), text(team_name(team)));
            rec.insert("league_mlbam".into(), int(lg));
            rec.insert("league".into(), Value::from(refs.league_abbreviation(lg)));
            rec.insert("div_mlbam".into(), int(div));
            rec.insert(
                "div".into(),
                match div {
                    Some(id) => Value::from(refs.league_or_placeholder(id).name_short),
                    None => placeholder(),
                },
            );
            records.push(rec);
        }
    }
    Table::from_records(&records, &with_prefix(LEAGUE_TEAM_PREFIX, group, advanced))
}

/// League leaders split by group.
#[derive(Clone, Debug, Default)]
pub struct LeagueLeaders {
    pub hitting: Table,
    pub pitching: Table,
}

pub fn league_leaders(resp: &StatsResponse) -> LeagueLeaders {
    let mut hitting = Vec::new();
    let mut pitching = Vec::new();
    for block in &resp.stats {
        let target = match block_group(block) {
            Some(StatGroup::Hitting) => &mut hitting,
            Some(StatGroup::Pitching) => &mut pitching,
            _ => continue,
        };
        for split in &block.splits {
            let mut rec = stat_record(split);
            let player = split.player.as_ref();
            rec.insert("rank".into(), int(split.rank));
            rec.insert("season".into(), text_or(split.season.as_deref(), "-"));
            rec.insert(
                "position".into(),
                text_or(pos_abbreviation(split.position.as_ref()), "-"),
            );
            rec.insert("player_mlbam".into(), int(player.and_then(|p| p.id)));
            rec.insert("player_name".into(), text_or(player.and_then(|p| p.display_name()), ""));
            rec.insert("team_mlbam".into(), int(team_id(split.team.as_ref())));
            rec.insert("team_name".into(), text_or(team_name(split.team.as_ref()), ""));
            rec.insert("league_mlbam".into(), int(entity_id(split.league.as_ref())));
            rec.insert("league_name".into(), text_or(entity_name(split.league.as_ref()), ""));
            target.push(rec);
        }
    }
    LeagueLeaders {
        hitting: Table::from_records(
            &hitting,
            &with_prefix(LEADER_PREFIX, StatGroup::Hitting, false),
        ),
        pitching: Table::from_records(
            &pitching,
            &with_prefix(LEADER_PREFIX, StatGroup::Pitching, false),
        ),
    }
}

/// Regular and advanced team totals for one game type.
#[derive(Clone, Debug, Default)]
pub struct TeamTotals {
    pub regular: Table,
    pub advanced: Table,
}

/// `/teams/{id}/stats?stats=season,seasonAdvanced` for a single group and game type.
pub fn team_totals(resp: &StatsResponse, group: StatGroup, game_type: GameType) -> TeamTotals {
    let mut totals = TeamTotals::default();
    for advanced in [false, true] {
        let records: Vec<Record> = resp
            .stats
            .iter()
            .filter(|b| in_group(b, group))
            .filter(|b| block_type(b).map_or(false, |t| t.is_advanced() == advanced))
            .flat_map(|b| b.splits.iter())
            .map(|split| {
                let mut rec = stat_record(split);
                rec.insert("game_type".into(), Value::from(game_type.code()));
                rec
            })
            .collect();
        if records.is_empty() {
            continue;
        }
        let mut columns: Vec<&str> = columns_for(group, advanced).to_vec();
        columns.push("game_type");
        let table = Table::from_records(&records, &columns);
        if advanced {
            totals.advanced = table;
        } else {
            totals.regular = table;
        }
    }
    totals
}

/// Year-by-year team stats for the franchise view, newest season first.
pub fn franchise_year_by_year(resp: &StatsResponse, group: StatGroup, advanced: bool) -> Table {
    let records: Vec<Record> = resp
        .stats
        .iter()
        .filter(|b| in_group(b, group))
        .filter(|b| {
            matches!(
                (block_type(b), advanced),
                (Some(StatType::YearByYear), false) | (Some(StatType::YearByYearAdvanced), true)
            )
        })
        .flat_map(|b| b.splits.iter())
        .map(|split| {
            let mut rec = stat_record(split);
            rec.insert("season".into(), text(split.season.as_deref()));
            rec
        })
        .collect();
    let mut table = Table::from_records(&records, &with_prefix(&["season"], group, advanced));
    table.sort_by("season", true);
    table
}

/// `wild_card_series`, `division_series`, ...
pub fn playoff_round_label(gt: GameType) -> &'static str {
    match gt {
        GameType::WildCard => "wild_card_series",
        GameType::Division => "division_series",
        GameType::League => "league_series",
        GameType::WorldSeries => "world_series",
        _ => "playoffs",
    }
}

/// One row per postseason round reached, oldest season first and rounds in order.
pub fn playoff_appearances(rounds: &[(GameType, StatsResponse)]) -> Table {
    let mut table = Table::new(PLAYOFF_COLUMNS);
    for (gt, resp) in rounds {
        for split in resp.stats.iter().flat_map(|b| b.splits.iter()) {
            let wins = split.stat.get("wins").and_then(Value::as_i64).unwrap_or(0);
            let losses = split.stat.get("losses").and_then(Value::as_i64).unwrap_or(0);
            table.push_row(vec![
                text_or(split.season.as_deref(), ""),
                Value::from(gt.code()),
                Value::from(playoff_round_label(*gt)),
                Value::from(wins),
                Value::from(losses),
                Value::Bool(wins > losses),
                Value::from(gt.sort_order()),
            ]);
        }
    }
    table.sort_by("sort_order", false);
    table.sort_by("season", false);
    table
}

/// Flattened play or pitch search results, oldest first.
pub fn play_search(resp: &StatsResponse, refs: &ReferenceData, group: Option<StatGroup>) -> Table {
    let mut records = Vec::new();
    for block in resp
        .stats
        .iter()
        .filter(|b| group.map_or(true, |g| in_group(b, g)))
    {
        for split in &block.splits {
            records.push(play_search_record(split, refs));
        }
    }
    records.reverse();
    Table::from_records(&records, PLAY_SEARCH_COLUMNS)
}

fn play_search_record(split: &StatSplit, refs: &ReferenceData) -> Record {
    let play = split.stat.get("play").unwrap_or(&Value::Null);
    let batter = split.batter.as_ref();
    let pitcher = split.pitcher.as_ref();
    let team = split.team.as_ref();
    let opponent = split.opponent.as_ref();
    let (away, home) = if split.is_home.unwrap_or(false) {
        (opponent, team)
    } else {
        (team, opponent)
    };
    let season = split.season.as_deref().and_then(|s| s.parse::<i32>().ok());
    let game_label = format!(
        "{} @ {}",
        refs.abbreviation_for(away, season),
        refs.abbreviation_for(home, season)
    );

    let mut rec = Record::new();
    rec.insert("play_id".into(), at_or_null(play, "/playId"));
    rec.insert("batter_name".into(), text(batter.and_then(|p| p.display_name())));
    rec.insert("batter_mlbam".into(), int(batter.and_then(|p| p.id)));
    rec.insert("pitcher_name".into(), text(pitcher.and_then(|p| p.display_name())));
    rec.insert("pitcher_mlbam".into(), int(pitcher.and_then(|p| p.id)));
    rec.insert("pitch_type".into(), at_or_dash(play, "/details/type/description"));
    rec.insert("pitchX".into(), at_or_dash(play, "/pitchData/coordinates/x"));
    rec.insert("pitchY".into(), at_or_dash(play, "/pitchData/coordinates/y"));
    rec.insert("startSpeed".into(), at_or_dash(play, "/pitchData/startSpeed"));
    rec.insert("strikeZoneTop".into(), at_or_dash(play, "/pitchData/strikeZoneTop"));
    rec.insert("strikeZoneBottom".into(), at_or_dash(play, "/pitchData/strikeZoneBottom"));
    rec.insert("zone".into(), at_or_dash(play, "/pitchData/zone"));
    rec.insert("launchSpeed".into(), at_or_dash(play, "/hitData/launchSpeed"));
    rec.insert("launchAngle".into(), at_or_dash(play, "/hitData/launchAngle"));
    rec.insert("totalDistance".into(), at_or_dash(play, "/hitData/totalDistance"));
    rec.insert("trajectory".into(), at_or_dash(play, "/hitData/trajectory"));
    rec.insert("hitX".into(), at_or_dash(play, "/hitData/coordinates/landingPosX"));
    rec.insert("hitY".into(), at_or_dash(play, "/hitData/coordinates/landingPosY"));
    rec.insert("event_type".into(), at_or_dash(play, "/details/event"));
    rec.insert("event".into(), at_or_dash(play, "/details/call/description"));
    rec.insert("season".into(), text(split.season.as_deref()));
    rec.insert("date".into(), text(split.date.as_deref()));
    rec.insert("gameType".into(), text(split.game_type.as_deref()));
    rec.insert("gamePk".into(), int(split.game.as_ref().and_then(|g| g.game_pk)));
    for (col, key) in [
        ("balls", "balls"),
        ("strikes", "strikes"),
        ("outs", "outs"),
        ("inning", "inning"),
        ("runnerOnFirst", "runnerOn1b"),
        ("runnerOnSecond", "runnerOn2b"),
        ("runnerOnThird", "runnerOn3b"),
    ] {
        let v = count_field(play, key);
        rec.insert(col.into(), if v.is_null() { placeholder() } else { v });
    }
    rec.insert("description".into(), at_or_dash(play, "/details/description"));
    rec.insert("isInPlay".into(), at_or_dash(play, "/details/isInPlay"));
    rec.insert("isStrike".into(), at_or_dash(play, "/details/isStrike"));
    rec.insert("isBall".into(), at_or_dash(play, "/details/isBall"));
    rec.insert("isAtBat".into(), at_or_dash(play, "/details/isAtBat"));
    rec.insert("isPlateAppearance".into(), at_or_dash(play, "/details/isPlateAppearance"));
    rec.insert("batterStands".into(), at_or_null(play, "/details/batSide/code"));
    rec.insert("pitcherThrows".into(), at_or_null(play, "/details/pitchHand/code"));
    rec.insert("team_name".into(), text(team_name(split.team.as_ref())));
    rec.insert("team_mlbam".into(), int(team_id(team)));
    rec.insert("opponent_name".into(), text(team_name(split.opponent.as_ref())));
    rec.insert("opponent_mlbam".into(), int(team_id(opponent)));
    rec.insert("away_mlbam".into(), int(team_id(away)));
    rec.insert("home_mlbam".into(), int(team_id(home)));
    rec.insert("game_label".into(), Value::from(game_label));
    rec
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(v: Value) -> StatsResponse {
        serde_json::from_value(v).unwrap()
    }

    fn refs() -> ReferenceData {
        ReferenceData::bundled()
    }

    #[test]
    fn career_rows_use_placeholders() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "career"}, "group": {"displayName": "hitting"},
             "splits": [{"gameType": "R", "stat": {"homeRuns": 243, "avg": ".292"}}]},
            {"type": {"displayName": "yearByYear"}, "group": {"displayName": "hitting"},
             "splits": [{"season": "2020", "gameType": "R",
                         "team": {"id": 145, "name": "Chicago White Sox"},
                         "league": {"id": 103, "name": "American League"},
                         "stat": {"homeRuns": 19, "avg": ".317"}}]}
        ]}));
        let table = career_and_seasons(&resp, &refs(), StatGroup::Hitting, false);
        assert_eq!(table.len(), 2);
        assert_eq!(&table.columns()[..6], W_SEASON);
        assert_eq!(table.cell(0, "season"), Some(&json!("Career")));
        assert_eq!(table.cell(0, "team"), Some(&json!("-")));
        assert_eq!(table.cell(0, "HR"), Some(&json!(243)));
        assert_eq!(table.cell(1, "league"), Some(&json!("AL")));
        assert_eq!(table.cell(1, "team_mlbam"), Some(&json!(145)));
    }

    #[test]
    fn advanced_blocks_are_kept_apart() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "career"}, "group": {"displayName": "hitting"},
             "splits": [{"stat": {"homeRuns": 1}}]},
            {"type": {"displayName": "careerAdvanced"}, "group": {"displayName": "hitting"},
             "splits": [{"stat": {"iso": ".200"}}]}
        ]}));
        assert_eq!(career_and_seasons(&resp, &refs(), StatGroup::Hitting, true).len(), 1);
        assert_eq!(career_and_seasons(&resp, &refs(), StatGroup::Hitting, false).len(), 1);
    }

    #[test]
    fn vs_player_uses_batter_and_pitcher_keys() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "vsPlayer"}, "group": {"displayName": "hitting"},
             "splits": [{"season": "2021",
                         "batter": {"id": 547989, "fullName": "Jose Abreu"},
                         "pitcher": {"id": 543037, "fullName": "Gerrit Cole"},
                         "team": {"id": 145, "name": "Chicago White Sox", "league": {"id": 103}},
                         "opponent": {"id": 147, "name": "New York Yankees", "league": {"id": 103}},
                         "stat": {"atBats": 12, "hits": 4}}]}
        ]}));
        let table = player_stats(&resp, &refs(), StatType::VsPlayer, StatGroup::Hitting);
        assert_eq!(table.cell(0, "player"), Some(&json!("Jose Abreu")));
        assert_eq!(table.cell(0, "opp_player_mlbam"), Some(&json!(543037)));
        assert_eq!(table.cell(0, "opp_league"), Some(&json!("AL")));
        assert_eq!(table.cell(0, "H"), Some(&json!(4)));
        // no game_type in the fixture, so the column is dropped
        assert!(!table.has_column("game_type"));
    }

    #[test]
    fn fielding_position_reduced_to_abbreviation() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "season"}, "group": {"displayName": "fielding"},
             "splits": [{"season": "2021", "player": {"id": 1, "fullName": "A"},
                         "stat": {"position": {"code": "3", "abbreviation": "1B"}, "errors": 2}}]}
        ]}));
        let table = player_stats(&resp, &refs(), StatType::Season, StatGroup::Fielding);
        assert_eq!(table.cell(0, "Pos"), Some(&json!("1B")));
        assert_eq!(table.cell(0, "E"), Some(&json!(2)));
    }

    #[test]
    fn date_range_keeps_major_league_rows() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "byDateRange"}, "group": {"displayName": "hitting"},
             "splits": [
                {"sport": {"id": 1}, "team": {"id": 145, "name": "Chicago White Sox"}, "stat": {"hits": 10}},
                {"sport": {"id": 11}, "team": {"id": 494, "name": "Charlotte Knights"}, "stat": {"hits": 3}}
             ]}
        ]}));
        let table = date_range(&resp, StatGroup::Hitting, false);
        assert_eq!(table.len(), 1);
        assert_eq!(&table.columns()[..2], &["tm_mlbam".to_string(), "Team".to_string()]);
        assert_eq!(table.cell(0, "Team"), Some(&json!("Chicago White Sox")));
    }

    #[test]
    fn playoff_rows_sorted_by_season_then_round() {
        let ws = response(json!({"stats": [{"splits": [
            {"season": "2005", "stat": {"wins": 4, "losses": 0}}
        ]}]}));
        let ds = response(json!({"stats": [{"splits": [
            {"season": "2008", "stat": {"wins": 1, "losses": 3}},
            {"season": "2005", "stat": {"wins": 3, "losses": 0}}
        ]}]}));
        let table = playoff_appearances(&[(GameType::WorldSeries, ws), (GameType::Division, ds)]);
        let seasons: Vec<_> = table.column("season").unwrap().into_iter().cloned().collect();
        assert_eq!(seasons, vec![json!("2005"), json!("2005"), json!("2008")]);
        assert_eq!(table.cell(0, "game_type"), Some(&json!("division_series")));
        assert_eq!(table.cell(1, "title_winner"), Some(&json!(true)));
        assert_eq!(table.cell(2, "title_winner"), Some(&json!(false)));
    }

    #[test]
    fn play_search_reverses_and_labels_games() {
        let resp = response(json!({"stats": [
            {"type": {"displayName": "playLog"}, "group": {"displayName": "hitting"},
             "splits": [
                {"season": "2021", "date": "2021-06-02", "isHome": true,
                 "team": {"id": 145, "name": "Chicago White Sox"},
                 "opponent": {"id": 147, "name": "New York Yankees"},
                 "batter": {"id": 1}, "pitcher": {"id": 2},
                 "stat": {"play": {"playId": "b", "details": {"event": "Home Run"}}}},
                {"season": "2021", "date": "2021-06-01", "isHome": false,
                 "team": {"id": 145, "name": "Chicago White Sox"},
                 "opponent": {"id": 147, "name": "New York Yankees"},
                 "batter": {"id": 1}, "pitcher": {"id": 2},
                 "stat": {"play": {"playId": "a", "count": {"balls": 1}}}}
             ]}
        ]}));
        let table = play_search(&resp, &refs(), Some(StatGroup::Hitting));
        assert_eq!(table.columns().len(), PLAY_SEARCH_COLUMNS.len());
        assert_eq!(table.cell(0, "play_id"), Some(&json!("a")));
        assert_eq!(table.cell(0, "away_mlbam"), Some(&json!(145)));
        assert_eq!(table.cell(0, "balls"), Some(&json!(1)));
        assert_eq!(table.cell(0, "strikes"), Some(&json!("-")));
        assert_eq!(table.cell(1, "event_type"), Some(&json!("Home Run")));
        assert_eq!(table.cell(1, "home_mlbam"), Some(&json!(145)));
        assert_eq!(table.cell(1, "game_label"), Some(&json!("NYY @ CWS")));
        assert_eq!(table.cell(0, "game_label"), Some(&json!("CWS @ NYY")));
    }
}
