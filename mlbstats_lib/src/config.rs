//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::MlbStatsError;

pub const ENV_BASE_URL: &str = "MLBSTATS_BASE_URL";
pub const ENV_DATA_DIR: &str = "MLBSTATS_DATA_DIR";
pub const ENV_TIMEOUT_SECS: &str = "MLBSTATS_TIMEOUT_SECS";
pub const ENV_TIMEZONE: &str = "MLBSTATS_TIMEZONE";

/// Schedule times are shown in Eastern time unless told otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

#[derive(Clone, Debug)]
pub struct Settings {
    pub base_url: String,
    /// Directory holding the reference CSV snapshots. `None` uses the bundled tables.
    pub data_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub timezone: Tz,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: mlbstats_api::BASE_API_URL.to_string(),
            data_dir: None,
            timeout: Duration::from_secs(30),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl Settings {
    /// Reads `MLBSTATS_BASE_URL`, `MLBSTATS_DATA_DIR`, `MLBSTATS_TIMEOUT_SECS`
    /// and `MLBSTATS_TIMEZONE`, falling back to the defaults for anything unset.
    /// Unparseable timeouts fall back silently; an unknown timezone is an error.
    pub fn from_env() -> Result<Self, MlbStatsError> {
        let defaults = Settings::default();
        let timezone = match env_string(ENV_TIMEZONE) {
            Some(tz) => parse_timezone(&tz)?,
            None => defaults.timezone,
        };
        Ok(Self {
            base_url: env_string(ENV_BASE_URL).unwrap_or(defaults.base_url),
            data_dir: env_string(ENV_DATA_DIR).map(PathBuf::from),
            timeout: Duration::from_secs(env_u64(ENV_TIMEOUT_SECS, defaults.timeout.as_secs())),
            timezone,
        })
    }
}

/// Accepts an IANA name (`America/Chicago`) or a US shorthand (`ct`, `eastern`, `pdt`, ...).
pub fn parse_timezone(input: &str) -> Result<Tz, MlbStatsError> {
    let lower = input.trim().to_lowercase();
    let tz = match lower.as_str() {
        "est" | "edt" | "et" | "eastern" | "us/eastern" => chrono_tz::America::New_York,
        "cst" | "cdt" | "ct" | "central" | "us/central" => chrono_tz::America::Chicago,
        "mst" | "mdt" | "mt" | "mountain" | "us/mountain" => chrono_tz::America::Denver,
        "pst" | "pdt" | "pt" | "pacific" | "us/pacific" => chrono_tz::America::Los_Angeles,
        "utc" => chrono_tz::UTC,
        _ => input.trim().parse::<Tz>().map_err(|_| {
            MlbStatsError::InvalidInput(format!("unknown timezone '{}'", input))
        })?,
    };
    Ok(tz)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
