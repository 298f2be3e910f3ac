mod common;
pub use self::common::{Query, QueryCommon};

mod stats;
pub use self::stats::StatsQuery;

mod schedule;
pub use self::schedule::ScheduleQuery;

mod roster;
pub use self::roster::RosterQuery;

mod team;
pub use self::team::{PersonQuery, TeamQuery};

mod transaction;
pub use self::transaction::{DraftQuery, FreeAgentQuery, TransactionQuery};

mod reference;
pub use self::reference::ReferenceQuery;

/// Joins values with commas, the way the Stats API expects multi-valued params.
pub(crate) fn join_values<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
