//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for hydration, field filtering and sport.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the `hydrate` parameter (e.g. `team`, `person(stats(...))`).
    fn with_hydrate(mut self, hydrate: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().hydrate = Some(hydrate.to_string());
        self
    }

    /// Restricts the response to the listed fields.
    fn with_fields(mut self, fields: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().fields = Some(fields.to_string());
        self
    }

    /// Sets the sport (1 = MLB).
    fn with_sport_id(mut self, sport_id: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().sport_id = Some(sport_id);
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Default, Debug)]
pub struct QueryCommon {
    pub hydrate: Option<String>,
    pub fields: Option<String>,
    pub sport_id: Option<i64>,
}

impl QueryCommon {
    /// Appends the common parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(sport_id) = self.sport_id {
            url.query_pairs_mut()
                .append_pair("sportId", &sport_id.to_string());
        }
        if let Some(hydrate) = &self.hydrate {
            url.query_pairs_mut().append_pair("hydrate", hydrate);
        }
        if let Some(fields) = &self.fields {
            url.query_pairs_mut().append_pair("fields", fields);
        }
        url
    }
}
