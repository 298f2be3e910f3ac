//! Serde structs for the Stats API response shapes.
//!
//! Every sub-object is optional or defaulted: the API omits keys freely
//! depending on hydration, season and sport, and callers fall back to
//! placeholders instead of failing the whole response.

mod codes;
mod common;
pub mod de;
mod draft;
mod person;
mod reference;
mod roster;
mod schedule;
mod stats;
mod team;
mod transaction;

pub use codes::{GameType, PlayerPool, RosterType, StatGroup, StatType};
pub use common::{CodeDescription, DisplayName, EntityRef, Position};
pub use draft::{
    DraftHome, DraftPick, DraftResponse, DraftRound, DraftRounds, DraftSchool, ProspectsResponse,
};
pub use person::{
    Award, AwardsResponse, Education, FreeAgent, FreeAgentsResponse, PeopleResponse, Person,
    RosterEntryRecord, School,
};
pub use reference::{
    League, LeaguesResponse, Season, SeasonsResponse, Venue, VenueLocation, VenueTimeZone,
    VenuesResponse,
};
pub use roster::{RosterEntry, RosterResponse};
pub use schedule::{
    Broadcast, Game, GameContent, GameHighlights, GameMedia, GameStatus, GameTeam, GameTeams,
    Highlight, Highlights, LeagueRecordSummary, Linescore, LinescoreSide, MediaEpg, MediaItem,
    Playback, Schedule, ScheduleDate, ScheduleVenue, VideoResolution,
};
pub use stats::{GameRef, StatBlock, StatSplit, StatsResponse};
pub use team::{
    DivisionRecord, LeagueRecord, RecordBreakdown, SplitRecord, Team, TeamRecord, TeamsResponse,
};
pub use transaction::{Transaction, TransactionsResponse};
