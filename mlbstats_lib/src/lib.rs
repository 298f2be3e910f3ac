//! Tabular views over the MLB Stats API.
//!
//! Wraps the `mlbstats_api` bindings with response flattening, a stat-name
//! rename dictionary, reference-table joins and concurrent bulk fetchers.
//! [`MlbStats`] is the entry point.

pub mod bulk;
pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod reference;
pub mod statdict;
pub mod table;
pub mod validation;

pub use mlbstats_api;
pub use mlbstats_api::types;
pub use mlbstats_api::types::{GameType, PlayerPool, RosterType, StatGroup, StatType};

pub use bulk::{FranchiseData, PlayerData, TeamData};
pub use client::{MlbStats, ScheduleFilters, StatFilters};
pub use config::Settings;
pub use error::MlbStatsError;
pub use parse::person::{CareerTables, PlayerInfo};
pub use parse::stats::{LeagueLeaders, TeamTotals};
pub use reference::{ReferenceData, SeasonFilter, SeasonInfo};
pub use table::Table;
