//! Typed bindings for the public MLB Stats API (`statsapi.mlb.com/api/v1`).

mod client;
mod errors;
mod query;
pub mod types;
pub mod user_agent;
pub use self::client::{Client, BASE_API_URL};
pub use self::errors::Error;
pub use self::query::{
    DraftQuery, FreeAgentQuery, PersonQuery, Query, QueryCommon, ReferenceQuery, RosterQuery,
    ScheduleQuery, StatsQuery, TeamQuery, TransactionQuery,
};
