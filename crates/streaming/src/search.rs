//! Search endpoint seam (`GET /api/search?q=`).
//!
//! Ranking and source aggregation happen server-side; the core only decodes
//! the ranked hits and enforces the minimum query length the reference UI
//! uses before it fires a request.

use serde::Deserialize;

use crate::provider::FetchError;

/// Where a search hit came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    Database,
    Photon,
    Osm,
    CityList,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub source: SearchSource,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Queries shorter than this never reach the provider.
pub const MIN_QUERY_LEN: usize = 2;

pub trait SearchProvider {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, FetchError>;
}

/// Trims the query, applies the minimum-length guard, then delegates.
pub fn run_search(
    provider: &impl SearchProvider,
    query: &str,
) -> Result<Vec<SearchHit>, FetchError> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }
    provider.search(query)
}

/// Decodes a search response body.
pub fn parse_search_results(body: &str) -> Result<Vec<SearchHit>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{SearchHit, SearchProvider, SearchSource, parse_search_results, run_search};
    use crate::provider::FetchError;

    struct CountingProvider {
        calls: std::cell::Cell<usize>,
    }

    impl SearchProvider for CountingProvider {
        fn search(&self, _query: &str) -> Result<Vec<SearchHit>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Vec::new())
        }
    }

    #[test]
    fn short_queries_never_reach_the_provider() {
        let provider = CountingProvider {
            calls: std::cell::Cell::new(0),
        };
        assert!(run_search(&provider, "a").unwrap().is_empty());
        assert!(run_search(&provider, "  w  ").unwrap().is_empty());
        assert_eq!(provider.calls.get(), 0);

        run_search(&provider, "wellington").unwrap();
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn parses_hits_from_all_sources() {
        let body = r#"[
            {"name": "Central Park", "lat": -41.3, "lng": 174.78, "source": "database", "type": "dog_park"},
            {"name": "Wellington", "lat": -41.29, "lng": 174.78, "source": "city_list", "description": "Capital"}
        ]"#;
        let hits = parse_search_results(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source, SearchSource::Database);
        assert_eq!(hits[1].source, SearchSource::CityList);
    }
}
