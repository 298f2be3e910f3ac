use serde::{Deserialize, Serialize};

use super::{EntityRef, Person, Team};

/// Body of `/schedule`, also embedded in teams as `nextGameSchedule` /
/// `previousGameSchedule`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub total_games: Option<i64>,
    pub dates: Vec<ScheduleDate>,
}

impl Schedule {
    /// All games in date order, flattened.
    pub fn games(&self) -> impl Iterator<Item = (&ScheduleDate, &Game)> {
        self.dates
            .iter()
            .flat_map(|d| d.games.iter().map(move |g| (d, g)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleDate {
    pub date: Option<String>,
    pub games: Vec<Game>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub game_pk: Option<i64>,
    pub game_type: Option<String>,
    #[serde(deserialize_with = "super::de::opt_string")]
    pub season: Option<String>,
    /// Scheduled first pitch, UTC (`2021-04-01T17:05:00Z`).
    pub game_date: Option<String>,
    pub official_date: Option<String>,
    pub reschedule_date: Option<String>,
    pub reschedule_game_date: Option<String>,
    pub rescheduled_from_date: Option<String>,
    pub status: GameStatus,
    pub teams: GameTeams,
    pub linescore: Option<Linescore>,
    pub venue: Option<ScheduleVenue>,
    pub broadcasts: Vec<Broadcast>,
    pub content: Option<GameContent>,
    pub game_number: Option<i64>,
    pub double_header: Option<String>,
    pub day_night: Option<String>,
    pub series_game_number: Option<i64>,
    pub games_in_series: Option<i64>,
    pub series_description: Option<String>,
    pub scheduled_innings: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatus {
    pub abstract_game_state: Option<String>,
    pub abstract_game_code: Option<String>,
    pub detailed_state: Option<String>,
    pub coded_game_state: Option<String>,
    pub status_code: Option<String>,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameTeams {
    pub away: GameTeam,
    pub home: GameTeam,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameTeam {
    pub team: Team,
    pub score: Option<i64>,
    pub is_winner: Option<bool>,
    pub league_record: Option<LeagueRecordSummary>,
    pub probable_pitcher: Option<Person>,
    pub series_number: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeagueRecordSummary {
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub pct: Option<String>,
}

/// Schedule venues carry only id and name.
pub type ScheduleVenue = EntityRef;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Linescore {
    pub current_inning: Option<i64>,
    pub current_inning_ordinal: Option<String>,
    pub inning_state: Option<String>,
    pub inning_half: Option<String>,
    pub offense: Option<LinescoreSide>,
    pub defense: Option<LinescoreSide>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LinescoreSide {
    pub team: Option<EntityRef>,
    pub batter: Option<Person>,
    pub pitcher: Option<Person>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Broadcast {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub broadcast_type: Option<String>,
    pub language: Option<String>,
    pub home_away: Option<String>,
    pub video_resolution: Option<VideoResolution>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoResolution {
    pub code: Option<String>,
    pub resolution_short: Option<String>,
    pub resolution_full: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameContent {
    pub media: Option<GameMedia>,
    pub highlights: Option<GameHighlights>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameMedia {
    pub epg_alternate: Vec<MediaEpg>,
}

/// A titled group of media items ("Daily Recap", "Extended Highlights", ...).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaEpg {
    pub title: Option<String>,
    pub items: Vec<MediaItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub title: Option<String>,
    pub blurb: Option<String>,
    pub description: Option<String>,
    pub playbacks: Vec<Playback>,
}

impl MediaItem {
    /// First mp4 playback URL (`mp4Avc` or `highBit`).
    pub fn mp4_url(&self) -> Option<&str> {
        self.playbacks
            .iter()
            .find(|p| matches!(p.name.as_deref(), Some("mp4Avc") | Some("highBit")))
            .and_then(|p| p.url.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Playback {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameHighlights {
    pub highlights: Option<Highlights>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Highlights {
    pub items: Vec<Highlight>,
}

pub type Highlight = MediaItem;
