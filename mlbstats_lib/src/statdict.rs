//! Stat key rename dictionary and canonical column orders.
//!
//! The API spells stats out in camelCase (`homeRuns`, `inningsPitched`);
//! tables use the familiar box-score labels instead.

use mlbstats_api::types::StatGroup;

use crate::table::RenameMap;

/// API stat key to column label.
pub const STATDICT: &RenameMap = &[
    // counting / rate stats shared by hitting and pitching
    ("gamesPlayed", "G"),
    ("gamesStarted", "GS"),
    ("groundOuts", "GO"),
    ("airOuts", "AO"),
    ("flyOuts", "FO"),
    ("popOuts", "PopO"),
    ("lineOuts", "LO"),
    ("runs", "R"),
    ("doubles", "2B"),
    ("triples", "3B"),
    ("homeRuns", "HR"),
    ("strikeOuts", "SO"),
    ("baseOnBalls", "BB"),
    ("intentionalWalks", "IBB"),
    ("hits", "H"),
    ("hitByPitch", "HBP"),
    ("avg", "AVG"),
    ("atBats", "AB"),
    ("obp", "OBP"),
    ("slg", "SLG"),
    ("ops", "OPS"),
    ("caughtStealing", "CS"),
    ("stolenBases", "SB"),
    ("stolenBasePercentage", "SB%"),
    ("groundIntoDoublePlay", "GIDP"),
    ("groundIntoDoublePlayOpportunity", "GIDPO"),
    ("groundIntoTriplePlay", "GITP"),
    ("numberOfPitches", "P"),
    ("plateAppearances", "PA"),
    ("totalBases", "TB"),
    ("rbi", "RBI"),
    ("leftOnBase", "LOB"),
    ("sacBunts", "sB"),
    ("sacFlies", "sF"),
    ("babip", "BABIP"),
    ("groundOutsToAirouts", "GO/AO"),
    ("catchersInterference", "CI"),
    ("atBatsPerHomeRun", "AB/HR"),
    // advanced hitting
    ("extraBaseHits", "exBH"),
    ("reachedOnError", "ROE"),
    ("walkOffs", "WO"),
    ("pitchesPerPlateAppearance", "P/PA"),
    ("walksPerPlateAppearance", "BB/PA"),
    ("strikeoutsPerPlateAppearance", "SO/PA"),
    ("homeRunsPerPlateAppearance", "HR/PA"),
    ("walksPerStrikeout", "BB/SO"),
    ("iso", "ISO"),
    ("totalSwings", "swings"),
    ("swingAndMisses", "whiffs"),
    ("ballsInPlay", "BIP"),
    ("flyHits", "FH"),
    ("popHits", "PH"),
    ("lineHits", "LH"),
    ("groundHits", "GH"),
    // pitching
    ("wins", "W"),
    ("losses", "L"),
    ("saves", "SV"),
    ("saveOpportunities", "SVO"),
    ("holds", "HLD"),
    ("blownSaves", "BS"),
    ("era", "ERA"),
    ("inningsPitched", "IP"),
    ("earnedRuns", "ER"),
    ("whip", "WHIP"),
    ("battersFaced", "BF"),
    ("outs", "O"),
    ("gamesPitched", "GP"),
    ("completeGames", "CG"),
    ("shutouts", "SHO"),
    ("strikes", "STR"),
    ("strikePercentage", "S%"),
    ("hitBatsmen", "HB"),
    ("balks", "BK"),
    ("wildPitches", "WP"),
    ("pickoffs", "PK"),
    ("gamesFinished", "GF"),
    ("winPercentage", "W%"),
    ("pitchesPerInning", "P/Inn"),
    ("strikeoutWalkRatio", "K/BB"),
    ("strikeoutsPer9Inn", "K/9"),
    ("walksPer9Inn", "BB/9"),
    ("hitsPer9Inn", "H/9"),
    ("runsScoredPer9", "R/9"),
    ("homeRunsPer9", "HR/9"),
    ("inheritedRunners", "IR"),
    ("inheritedRunnersScored", "IRS"),
    ("bequeathedRunners", "BQ"),
    ("bequeathedRunnersScored", "BQS"),
    ("qualityStarts", "QS"),
    ("strikeoutsMinusWalksPercentage", "K-BB%"),
    // fielding
    ("position", "Pos"),
    ("innings", "Inn"),
    ("chances", "TC"),
    ("putOuts", "PO"),
    ("assists", "A"),
    ("errors", "E"),
    ("doublePlays", "DP"),
    ("triplePlays", "TP"),
    ("throwingErrors", "TE"),
    ("fielding", "FPCT"),
    ("rangeFactorPerGame", "RF/G"),
    ("rangeFactorPer9Inn", "RF/9"),
    ("passedBall", "PB"),
    ("catcherERA", "CERA"),
    // context columns added by the parsers
    ("tm_name", "Team"),
];

pub const COLS_HIT: &[&str] = &[
    "G", "GO", "AO", "R", "2B", "3B", "HR", "SO", "BB", "IBB", "H", "HBP", "AVG", "AB", "OBP",
    "SLG", "OPS", "CS", "SB", "SB%", "GIDP", "GITP", "P", "PA", "TB", "RBI", "LOB", "sB", "sF",
    "BABIP", "GO/AO", "CI", "AB/HR",
];

pub const COLS_HIT_ADV: &[&str] = &[
    "PA", "TB", "sB", "sF", "BABIP", "exBH", "HBP", "GIDP", "P", "P/PA", "BB/PA", "SO/PA",
    "HR/PA", "BB/SO", "ISO",
];

pub const COLS_PIT: &[&str] = &[
    "G", "GS", "W", "L", "ERA", "IP", "H", "R", "ER", "HR", "BB", "IBB", "SO", "HBP", "AVG",
    "OBP", "SLG", "OPS", "WHIP", "GO", "AO", "GO/AO", "CG", "SHO", "SV", "SVO", "HLD", "BS", "BF",
    "O", "P", "STR", "S%", "BK", "WP", "PK", "GF", "W%", "P/Inn", "K/BB", "K/9", "BB/9", "H/9",
    "R/9", "HR/9", "IR", "IRS", "SB", "CS", "SB%", "GIDP", "sB", "sF", "CI", "AB", "2B", "3B", "TB",
];

pub const COLS_PIT_ADV: &[&str] = &[
    "QS", "BF", "TB", "exBH", "HBP", "GIDP", "GIDPO", "P", "P/PA", "P/Inn", "BB/PA", "SO/PA",
    "HR/PA", "BB/SO", "K-BB%", "ISO", "BABIP", "WP", "BK", "PK", "IR", "IRS", "BQ", "BQS", "FO",
    "GO", "PopO", "LO", "swings", "whiffs", "BIP",
];

pub const COLS_FLD: &[&str] = &[
    "Pos", "G", "GS", "Inn", "TC", "PO", "A", "E", "DP", "TP", "TE", "FPCT", "RF/G", "RF/9", "PB",
    "SB", "CS", "SB%", "CERA", "CI",
];

/// Prefix for year-by-year tables.
pub const W_SEASON: &[&str] = &[
    "season",
    "game_type",
    "team_mlbam",
    "team",
    "league_mlbam",
    "league",
];

/// Prefix for career tables.
pub const WO_SEASON: &[&str] = &["game_type"];

/// Label for an API stat key, or the key itself when it has none.
pub fn rename_key(key: &str) -> &str {
    STATDICT
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
        .unwrap_or(key)
}

/// Canonical column order for a stat group.
pub fn columns_for(group: StatGroup, advanced: bool) -> &'static [&'static str] {
    match (group, advanced) {
        (StatGroup::Hitting, false) => COLS_HIT,
        (StatGroup::Hitting, true) => COLS_HIT_ADV,
        (StatGroup::Pitching, false) => COLS_PIT,
        (StatGroup::Pitching, true) => COLS_PIT_ADV,
        (StatGroup::Fielding, _) => COLS_FLD,
    }
}

/// `prefix` followed by the group's columns.
pub fn with_prefix(prefix: &[&str], group: StatGroup, advanced: bool) -> Vec<String> {
    prefix
        .iter()
        .chain(columns_for(group, advanced).iter())
        .map(|c| c.to_string())
        .collect()
}
