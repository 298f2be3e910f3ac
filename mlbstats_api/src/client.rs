//! HTTP client for the MLB Stats API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{
        DraftQuery, FreeAgentQuery, PersonQuery, Query, ReferenceQuery, RosterQuery,
        ScheduleQuery, StatsQuery, TeamQuery, TransactionQuery,
    },
    types::{
        AwardsResponse, DraftResponse, FreeAgentsResponse, LeaguesResponse, PeopleResponse,
        ProspectsResponse, RosterResponse, Schedule, SeasonsResponse, StatsResponse,
        TeamsResponse, TransactionsResponse, VenuesResponse,
    },
    user_agent::get_user_agent,
    Error,
};

/// Production base URL of the Stats API.
pub const BASE_API_URL: &str = "https://statsapi.mlb.com/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the MLB Stats API.
///
/// Holds one `reqwest::Client` so that a batch of concurrent requests
/// shares its connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to [`BASE_API_URL`].
    base_api_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production Stats API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_API_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http: build_http(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Replaces the transport timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// The exact URL a request for `path` with `query` would hit.
    pub fn request_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", &self.base_api_url, path, e))
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.request_url(path, query)?;
        self.get_url(url).await
    }

    /// GETs an absolute URL and deserializes the JSON body.
    pub async fn get_url<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let body = self.fetch_body(url, "application/json").await?;
        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })?;

        Ok(parsed)
    }

    /// GETs an absolute URL and returns the body text (for HTML pages).
    pub async fn get_text(&self, url: &str) -> Result<String, Error> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        tracing::debug!("GET {}", url);
        self.fetch_body(url, "text/html,application/xhtml+xml,*/*").await
    }

    async fn fetch_body(&self, url: Url, accept: &str) -> Result<String, Error> {
        let resp = self
            .http
            .get(url)
            .header("user-agent", get_user_agent())
            .header("accept", accept)
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Stats for one person (`/people/{id}/stats`).
    pub async fn person_stats(
        &self,
        person_id: i64,
        query: &StatsQuery,
    ) -> Result<StatsResponse, Error> {
        self.get::<StatsResponse, StatsQuery>(
            format!("/people/{}/stats", person_id).as_str(),
            Some(query),
        )
        .await
    }

    /// Stats for one team (`/teams/{id}/stats`).
    pub async fn team_stats(
        &self,
        team_id: i64,
        query: &StatsQuery,
    ) -> Result<StatsResponse, Error> {
        self.get::<StatsResponse, StatsQuery>(
            format!("/teams/{}/stats", team_id).as_str(),
            Some(query),
        )
        .await
    }

    /// Team stats across a league (`/teams/stats`).
    pub async fn teams_stats(&self, query: &StatsQuery) -> Result<StatsResponse, Error> {
        self.get::<StatsResponse, StatsQuery>("/teams/stats", Some(query))
            .await
    }

    /// Player stats across a player pool (`/stats`).
    pub async fn stats(&self, query: &StatsQuery) -> Result<StatsResponse, Error> {
        self.get::<StatsResponse, StatsQuery>("/stats", Some(query))
            .await
    }

    pub async fn person(
        &self,
        person_id: i64,
        query: &PersonQuery,
    ) -> Result<PeopleResponse, Error> {
        self.get::<PeopleResponse, PersonQuery>(
            format!("/people/{}", person_id).as_str(),
            Some(query),
        )
        .await
    }

    pub async fn person_awards(&self, person_id: i64) -> Result<AwardsResponse, Error> {
        self.get::<AwardsResponse, PersonQuery>(
            format!("/people/{}/awards", person_id).as_str(),
            None,
        )
        .await
    }

    /// Recipients of an award, e.g. `MLBHOF` or `RETIREDUNI_145`.
    pub async fn award_recipients(&self, award_id: &str) -> Result<AwardsResponse, Error> {
        self.get::<AwardsResponse, ReferenceQuery>(
            format!("/awards/{}/recipients", award_id).as_str(),
            None,
        )
        .await
    }

    pub async fn team(&self, team_id: i64, query: &TeamQuery) -> Result<TeamsResponse, Error> {
        self.get::<TeamsResponse, TeamQuery>(format!("/teams/{}", team_id).as_str(), Some(query))
            .await
    }

    pub async fn team_roster(
        &self,
        team_id: i64,
        query: &RosterQuery,
    ) -> Result<RosterResponse, Error> {
        self.get::<RosterResponse, RosterQuery>(
            format!("/teams/{}/roster{}", team_id, query.path_suffix()).as_str(),
            Some(query),
        )
        .await
    }

    pub async fn schedule(&self, query: &ScheduleQuery) -> Result<Schedule, Error> {
        self.get::<Schedule, ScheduleQuery>("/schedule", Some(query))
            .await
    }

    pub async fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionsResponse, Error> {
        self.get::<TransactionsResponse, TransactionQuery>("/transactions", Some(query))
            .await
    }

    /// Draft picks for a year. Use [`Client::draft_prospects`] for the prospect list.
    pub async fn draft(&self, year: i32, query: &DraftQuery) -> Result<DraftResponse, Error> {
        self.get::<DraftResponse, DraftQuery>(format!("/draft/{}", year).as_str(), Some(query))
            .await
    }

    pub async fn draft_prospects(
        &self,
        year: i32,
        query: &DraftQuery,
    ) -> Result<ProspectsResponse, Error> {
        self.get::<ProspectsResponse, DraftQuery>(
            format!("/draft/prospects/{}", year).as_str(),
            Some(query),
        )
        .await
    }

    pub async fn free_agents(&self, query: &FreeAgentQuery) -> Result<FreeAgentsResponse, Error> {
        self.get::<FreeAgentsResponse, FreeAgentQuery>("/people/freeAgents", Some(query))
            .await
    }

    pub async fn leagues(&self, query: &ReferenceQuery) -> Result<LeaguesResponse, Error> {
        self.get::<LeaguesResponse, ReferenceQuery>("/leagues", Some(query))
            .await
    }

    pub async fn teams(&self, query: &ReferenceQuery) -> Result<TeamsResponse, Error> {
        self.get::<TeamsResponse, ReferenceQuery>("/teams", Some(query))
            .await
    }

    pub async fn venues(&self, query: &ReferenceQuery) -> Result<VenuesResponse, Error> {
        self.get::<VenuesResponse, ReferenceQuery>("/venues", Some(query))
            .await
    }

    pub async fn seasons(&self, query: &ReferenceQuery) -> Result<SeasonsResponse, Error> {
        self.get::<SeasonsResponse, ReferenceQuery>("/seasons", Some(query))
            .await
    }
}

fn build_http(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
