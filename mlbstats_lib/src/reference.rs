//! Reference data: CSV snapshots of leagues, teams, venues, people and
//! season calendars, used to enrich API rows and to resolve defaults.
//!
//! None of this is authoritative. Snapshots go stale, so every join has a
//! placeholder path for IDs the tables do not know about.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use mlbstats_api::types::{League, Season, Team, Venue};
use mlbstats_api::{Client, Query, ReferenceQuery};

use crate::error::MlbStatsError;
use crate::table::Table;

pub const LEAGUES_CSV: &str = "leagues.csv";
pub const TEAMS_CSV: &str = "teams.csv";
pub const VENUES_CSV: &str = "venues.csv";
pub const PEOPLE_CSV: &str = "people.csv";
pub const SEASONS_CSV: &str = "seasons.csv";

const BUNDLED_LEAGUES: &str = include_str!("../data/leagues.csv");
const BUNDLED_TEAMS: &str = include_str!("../data/teams.csv");
const BUNDLED_VENUES: &str = include_str!("../data/venues.csv");
const BUNDLED_SEASONS: &str = include_str!("../data/seasons.csv");

/// Placeholder for unknown reference values.
pub const PLACEHOLDER: &str = "-";

/// A league or a division (divisions carry `div_part` and a parent league).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeagueRow {
    pub mlbam: i64,
    pub name: String,
    pub name_short: String,
    pub abbreviation: String,
    /// "East", "Central", "West" for divisions, "-" for leagues.
    pub div_part: String,
    pub parent_mlbam: Option<i64>,
}

impl LeagueRow {
    fn placeholder(mlbam: i64) -> Self {
        Self {
            mlbam,
            name: PLACEHOLDER.to_string(),
            name_short: PLACEHOLDER.to_string(),
            abbreviation: PLACEHOLDER.to_string(),
            div_part: PLACEHOLDER.to_string(),
            parent_mlbam: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeamRow {
    pub season: i32,
    pub mlbam: i64,
    pub full_name: String,
    pub location_name: Option<String>,
    pub franchise_name: Option<String>,
    pub team_name: Option<String>,
    pub club_name: Option<String>,
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
    pub venue_mlbam: Option<i64>,
    pub venue_name: Option<String>,
    pub first_year: Option<i32>,
    pub league_mlbam: Option<i64>,
    pub division_mlbam: Option<i64>,
    pub active: Option<bool>,
}

impl TeamRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "season",
        "mlbam",
        "full_name",
        "location_name",
        "franchise_name",
        "team_name",
        "club_name",
        "short_name",
        "abbreviation",
        "venue_mlbam",
        "venue_name",
        "first_year",
        "league_mlbam",
        "division_mlbam",
        "active",
    ];

    fn from_api(team: &Team, season: i32) -> Option<Self> {
        Some(Self {
            season: team.season.map(|s| s as i32).unwrap_or(season),
            mlbam: team.id?,
            full_name: team.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            location_name: team.location_name.clone(),
            franchise_name: team.franchise_name.clone(),
            team_name: team.team_name.clone(),
            club_name: team.club_name.clone(),
            short_name: team.short_name.clone(),
            abbreviation: team.abbreviation.clone(),
            venue_mlbam: team.venue.as_ref().and_then(|v| v.id),
            venue_name: team.venue.as_ref().and_then(|v| v.name.clone()),
            first_year: team.first_year_of_play.map(|y| y as i32),
            league_mlbam: team.league.as_ref().and_then(|l| l.id),
            division_mlbam: team.division.as_ref().and_then(|d| d.id),
            active: team.active,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueRow {
    pub mlbam: i64,
    pub name: String,
    pub active: bool,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub tz_id: Option<String>,
    pub tz_offset: Option<i32>,
}

impl VenueRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "mlbam", "name", "active", "city", "state", "country", "tz_id", "tz_offset",
    ];

    fn from_api(venue: &Venue) -> Option<Self> {
        let location = venue.location.clone().unwrap_or_default();
        let tz = venue.time_zone.clone().unwrap_or_default();
        Some(Self {
            mlbam: venue.id?,
            name: venue.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            active: venue.active.unwrap_or(false),
            city: location.city,
            state: location.state,
            country: location.country,
            tz_id: tz.id,
            tz_offset: tz.offset.map(|o| o as i32),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonRow {
    pub mlbam: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub year_debut: Option<i32>,
    pub year_recent: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SeasonRow {
    pub season: i32,
    pub season_start_date: NaiveDate,
    pub season_end_date: NaiveDate,
    pub regular_season_start_date: Option<NaiveDate>,
    pub regular_season_end_date: Option<NaiveDate>,
    pub post_season_start_date: Option<NaiveDate>,
    pub post_season_end_date: Option<NaiveDate>,
}

impl SeasonRow {
    fn from_api(season: &Season) -> Option<Self> {
        let date = |s: &Option<String>| {
            s.as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        };
        Some(Self {
            season: season.season_id.as_deref()?.parse().ok()?,
            season_start_date: date(&season.season_start_date)?,
            season_end_date: date(&season.season_end_date)?,
            regular_season_start_date: date(&season.regular_season_start_date),
            regular_season_end_date: date(&season.regular_season_end_date),
            post_season_start_date: date(&season.post_season_start_date),
            post_season_end_date: date(&season.post_season_end_date),
        })
    }
}

/// Which seasons a team search covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeasonFilter {
    /// The season in progress, else the last completed one.
    #[default]
    Current,
    Season(i32),
    All,
}

/// Season in progress (if any) and the most recently completed season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeasonInfo {
    pub in_progress: Option<i32>,
    pub last_completed: i32,
}

#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    pub leagues: Vec<LeagueRow>,
    pub teams: Vec<TeamRow>,
    pub venues: Vec<VenueRow>,
    pub people: Vec<PersonRow>,
    pub seasons: Vec<SeasonRow>,
}

impl ReferenceData {
    /// Snapshots compiled into the crate: leagues and divisions, the two
    /// most recent seasons of teams, current venues and season calendars.
    /// There is no bundled people table.
    pub fn bundled() -> Self {
        Self {
            leagues: bundled_rows(LEAGUES_CSV, BUNDLED_LEAGUES),
            teams: bundled_rows(TEAMS_CSV, BUNDLED_TEAMS),
            venues: bundled_rows(VENUES_CSV, BUNDLED_VENUES),
            people: Vec::new(),
            seasons: bundled_rows(SEASONS_CSV, BUNDLED_SEASONS),
        }
    }

    /// Loads the snapshots in `dir`. A missing file falls back to the
    /// bundled table of the same name.
    pub fn load(dir: &Path) -> Result<Self, MlbStatsError> {
        let bundled = Self::bundled();
        Ok(Self {
            leagues: load_csv(&dir.join(LEAGUES_CSV))?.unwrap_or(bundled.leagues),
            teams: load_csv(&dir.join(TEAMS_CSV))?.unwrap_or(bundled.teams),
            venues: load_csv(&dir.join(VENUES_CSV))?.unwrap_or(bundled.venues),
            people: load_csv(&dir.join(PEOPLE_CSV))?.unwrap_or_default(),
            seasons: load_csv(&dir.join(SEASONS_CSV))?.unwrap_or(bundled.seasons),
        })
    }

    pub fn league(&self, id: i64) -> Option<&LeagueRow> {
        self.leagues.iter().find(|l| l.mlbam == id)
    }

    /// League or division by ID, or a `-` placeholder (logged) when unknown.
    pub fn league_or_placeholder(&self, id: i64) -> LeagueRow {
        match self.league(id) {
            Some(l) => l.clone(),
            None => {
                warn!("unknown league id {}", id);
                LeagueRow::placeholder(id)
            }
        }
    }

    /// League abbreviation (`AL`, `NL`) or `-`.
    pub fn league_abbreviation(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => self.league_or_placeholder(id).abbreviation,
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Team row for `season`, or the most recent one on record with no season.
    pub fn team(&self, id: i64, season: Option<i32>) -> Option<&TeamRow> {
        let mut rows = self.teams.iter().filter(|t| t.mlbam == id);
        match season {
            Some(season) => rows.find(|t| t.season == season),
            None => rows.max_by_key(|t| t.season),
        }
    }

    /// Abbreviation for `season`, else the most recent one on record, else `-`.
    pub fn team_abbreviation(&self, id: i64, season: Option<i32>) -> String {
        let abbrv = self
            .team(id, season)
            .or_else(|| self.team(id, None))
            .and_then(|t| t.abbreviation.clone());
        match abbrv {
            Some(abbrv) => abbrv,
            None => {
                warn!("no abbreviation for team {} (season {:?})", id, season);
                PLACEHOLDER.to_string()
            }
        }
    }

    /// Abbreviation carried by an API team object, else the reference lookup.
    pub fn abbreviation_for(&self, team: Option<&Team>, season: Option<i32>) -> String {
        match team {
            Some(Team {
                abbreviation: Some(abbrv),
                ..
            }) => abbrv.clone(),
            Some(Team { id: Some(id), .. }) => self.team_abbreviation(*id, season),
            _ => PLACEHOLDER.to_string(),
        }
    }

    pub fn teams_for_season(&self, season: i32) -> Vec<&TeamRow> {
        self.teams.iter().filter(|t| t.season == season).collect()
    }

    /// Case-insensitive substring search on team full names.
    pub fn find_team(&self, query: &str, filter: SeasonFilter, today: NaiveDate) -> Vec<&TeamRow> {
        let needle = query.trim().to_lowercase();
        let season = match filter {
            SeasonFilter::Current => Some(self.default_season(today)),
            SeasonFilter::Season(s) => Some(s),
            SeasonFilter::All => None,
        };
        self.teams
            .iter()
            .filter(|t| season.map_or(true, |s| t.season == s))
            .filter(|t| t.full_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring search on venue names.
    pub fn find_venue(&self, query: &str) -> Vec<&VenueRow> {
        let needle = query.trim().to_lowercase();
        self.venues
            .iter()
            .filter(|v| v.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn venues(&self, active_only: bool) -> Vec<&VenueRow> {
        self.venues
            .iter()
            .filter(|v| !active_only || v.active)
            .collect()
    }

    pub fn person(&self, id: i64) -> Option<&PersonRow> {
        self.people.iter().find(|p| p.mlbam == id)
    }

    pub fn season(&self, season: i32) -> Option<&SeasonRow> {
        self.seasons.iter().find(|s| s.season == season)
    }

    /// Which season is in progress on `date`, and which one last finished.
    /// Years past the newest calendar row use the March-to-October rule.
    pub fn season_info(&self, date: NaiveDate) -> SeasonInfo {
        let year = date.year();
        let newest = self.seasons.iter().map(|s| s.season).max();
        if newest.map_or(true, |newest| year > newest) {
            return calendar_season_info(date);
        }
        if self
            .seasons
            .iter()
            .any(|s| s.season_start_date <= date && date <= s.season_end_date)
        {
            return SeasonInfo {
                in_progress: Some(year),
                last_completed: year - 1,
            };
        }
        let last_completed = match self.season(year) {
            Some(row) if date < row.season_start_date => year - 1,
            Some(_) => year,
            None => self
                .seasons
                .iter()
                .filter(|s| s.season_end_date < date)
                .map(|s| s.season)
                .max()
                .unwrap_or(year - 1),
        };
        SeasonInfo {
            in_progress: None,
            last_completed,
        }
    }

    /// Season in progress, else the last completed one.
    pub fn default_season(&self, date: NaiveDate) -> i32 {
        let info = self.season_info(date);
        info.in_progress.unwrap_or(info.last_completed)
    }

    pub fn teams_table(rows: &[&TeamRow]) -> Result<Table, MlbStatsError> {
        rows_table(rows, TeamRow::COLUMNS)
    }

    pub fn venues_table(rows: &[&VenueRow]) -> Result<Table, MlbStatsError> {
        rows_table(rows, VenueRow::COLUMNS)
    }

    pub fn save_leagues(&self, dir: &Path) -> Result<(), MlbStatsError> {
        save_csv(&dir.join(LEAGUES_CSV), &self.leagues)
    }

    pub fn save_teams(&self, dir: &Path) -> Result<(), MlbStatsError> {
        save_csv(&dir.join(TEAMS_CSV), &self.teams)
    }

    pub fn save_venues(&self, dir: &Path) -> Result<(), MlbStatsError> {
        save_csv(&dir.join(VENUES_CSV), &self.venues)
    }

    pub fn save_people(&self, dir: &Path) -> Result<(), MlbStatsError> {
        save_csv(&dir.join(PEOPLE_CSV), &self.people)
    }

    pub fn save_seasons(&self, dir: &Path) -> Result<(), MlbStatsError> {
        save_csv(&dir.join(SEASONS_CSV), &self.seasons)
    }

    /// Writes every table to `dir`.
    pub fn save_all(&self, dir: &Path) -> Result<(), MlbStatsError> {
        std::fs::create_dir_all(dir)?;
        self.save_leagues(dir)?;
        self.save_teams(dir)?;
        self.save_venues(dir)?;
        self.save_people(dir)?;
        self.save_seasons(dir)
    }

    /// Rebuilds the league/division table from `/leagues` and `/divisions`-style
    /// league entries. Keeps the current table if the API returns nothing.
    pub async fn refresh_leagues(&mut self, client: &Client) -> Result<(), MlbStatsError> {
        let resp = client
            .leagues(&ReferenceQuery::default().with_sport_id(1))
            .await?;
        let rows: Vec<LeagueRow> = resp.leagues.iter().filter_map(league_row).collect();
        if rows.is_empty() {
            warn!("leagues endpoint returned no rows; keeping existing table");
        } else {
            // divisions are not served by /leagues; keep the ones we have
            let divisions: Vec<LeagueRow> = self
                .leagues
                .iter()
                .filter(|l| l.parent_mlbam.is_some())
                .cloned()
                .collect();
            self.leagues = rows;
            for d in divisions {
                if self.league(d.mlbam).is_none() {
                    self.leagues.push(d);
                }
            }
        }
        Ok(())
    }

    /// Replaces the team rows for `season` with `/teams?sportId=1&season=`.
    pub async fn refresh_teams(
        &mut self,
        client: &Client,
        season: i32,
    ) -> Result<(), MlbStatsError> {
        let resp = client
            .teams(
                &ReferenceQuery::default()
                    .with_sport_id(1)
                    .with_season(season),
            )
            .await?;
        self.teams.retain(|t| t.season != season);
        self.teams
            .extend(resp.teams.iter().filter_map(|t| TeamRow::from_api(t, season)));
        Ok(())
    }

    pub async fn refresh_venues(&mut self, client: &Client) -> Result<(), MlbStatsError> {
        let resp = client
            .venues(&ReferenceQuery::default().with_hydrate("location,timezone"))
            .await?;
        self.venues = resp.venues.iter().filter_map(VenueRow::from_api).collect();
        Ok(())
    }

    pub async fn refresh_seasons(&mut self, client: &Client) -> Result<(), MlbStatsError> {
        let resp = client
            .seasons(
                &ReferenceQuery::default()
                    .with_sport_id(1)
                    .with_all_seasons(),
            )
            .await?;
        let mut seasons: Vec<SeasonRow> =
            resp.seasons.iter().filter_map(SeasonRow::from_api).collect();
        seasons.sort_by(|a, b| b.season.cmp(&a.season));
        self.seasons = seasons;
        Ok(())
    }
}

fn league_row(league: &League) -> Option<LeagueRow> {
    let name = league.name.clone()?;
    Some(LeagueRow {
        mlbam: league.id?,
        name_short: league.name_short.clone().unwrap_or_else(|| name.clone()),
        abbreviation: league
            .abbreviation
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        div_part: PLACEHOLDER.to_string(),
        parent_mlbam: None,
        name,
    })
}

/// Rough season calendar used when no seasons snapshot is loaded:
/// March through October is in season.
fn calendar_season_info(date: NaiveDate) -> SeasonInfo {
    let year = date.year();
    match date.month() {
        3..=10 => SeasonInfo {
            in_progress: Some(year),
            last_completed: year - 1,
        },
        11 | 12 => SeasonInfo {
            in_progress: None,
            last_completed: year,
        },
        _ => SeasonInfo {
            in_progress: None,
            last_completed: year - 1,
        },
    }
}

fn rows_table<T: Serialize>(rows: &[&T], columns: &[&str]) -> Result<Table, MlbStatsError> {
    let records = rows
        .iter()
        .map(|r| match serde_json::to_value(r)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    Ok(Table::from_records(&records, columns))
}

fn read_rows<T: DeserializeOwned, R: Read>(rdr: R) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping malformed reference row: {}", e),
        }
    }
    Ok(rows)
}

fn bundled_rows<T: DeserializeOwned>(name: &str, data: &str) -> Vec<T> {
    read_rows(data.as_bytes()).unwrap_or_else(|e| {
        warn!("bundled {} unreadable: {}", name, e);
        Vec::new()
    })
}

/// `None` when the file does not exist.
fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, MlbStatsError> {
    if !path.exists() {
        warn!("reference file {} not found; using the bundled table", path.display());
        return Ok(None);
    }
    let file = File::open(path)?;
    Ok(Some(read_rows(file)?))
}

fn save_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), MlbStatsError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
