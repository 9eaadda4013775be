//! AstraService - the request pipeline behind every endpoint

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheKey, FetchCache};
use crate::convert::{normalize_all, normalize_planet};
use crate::scoring::{habitability_score, rank};
use crate::types::{Limit, PlanetRecord, QueryParams, RawPayload, ScoredPlanet};
use crate::upstream::SpaceDatabase;
use crate::{AstraError, Result};

/// Planets requested from the upstream for the suggestions feed.
pub const SUGGESTION_FETCH_LIMIT: u32 = 12;

/// Planets returned by the suggestions feed.
pub const SUGGESTION_COUNT: usize = 8;

/// Fetches, normalizes, scores and ranks planets from the upstream.
///
/// Owns the (retrying) upstream and the fetch cache. Shared across request
/// handlers behind an `Arc`.
pub struct AstraService {
    upstream: Arc<dyn SpaceDatabase>,
    cache: FetchCache,
    exoplanets_endpoint: String,
    search_endpoint: String,
}

impl AstraService {
    pub(crate) fn new(
        upstream: Arc<dyn SpaceDatabase>,
        cache: FetchCache,
        exoplanets_endpoint: String,
        search_endpoint: String,
    ) -> Self {
        Self {
            upstream,
            cache,
            exoplanets_endpoint,
            search_endpoint,
        }
    }

    /// The fetch cache, for inspection.
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Ranked exoplanets, best first. The upstream fetch is cached per limit.
    pub async fn exoplanets(&self, limit: Limit) -> Result<Vec<ScoredPlanet>> {
        let payload = self.cached_exoplanets(limit.get()).await?;
        Ok(rank(normalize_all(&payload)))
    }

    /// Ranked planets matching `query`, searched upstream. Never cached.
    pub async fn search(&self, query: &str) -> Result<Vec<ScoredPlanet>> {
        let payload = self.search_upstream(query).await?;
        Ok(rank(normalize_all(&payload)))
    }

    /// The upstream listing exactly as received. Never cached.
    pub async fn raw(&self, limit: Limit) -> Result<RawPayload> {
        let params = limit_params(limit.get());
        info!(endpoint = %self.exoplanets_endpoint, %limit, "fetching raw exoplanets");
        self.upstream.fetch(&self.exoplanets_endpoint, &params).await
    }

    /// The first upstream search match for `name`, scored.
    pub async fn object(&self, name: &str) -> Result<ScoredPlanet> {
        let payload = self.search_upstream(name).await?;
        let first = payload
            .first()
            .ok_or_else(|| AstraError::NotFound(format!("no object matches '{name}'")))?;

        let planet = normalize_planet(first);
        Ok(ScoredPlanet {
            habitability_score: habitability_score(&planet),
            planet,
        })
    }

    /// A short, unscored sample of planets for the homepage.
    pub async fn suggestions(&self) -> Result<Vec<PlanetRecord>> {
        let payload = self.cached_exoplanets(SUGGESTION_FETCH_LIMIT).await?;
        let mut planets = normalize_all(&payload);
        planets.truncate(SUGGESTION_COUNT);
        Ok(planets)
    }

    async fn cached_exoplanets(&self, limit: u32) -> Result<Arc<RawPayload>> {
        let endpoint = self.exoplanets_endpoint.as_str();
        let params = limit_params(limit);
        let key = CacheKey::new(endpoint, params.clone());

        self.cache
            .get_or_fetch(key, || async move {
                info!(endpoint, limit, "fetching exoplanets");
                self.upstream.fetch(endpoint, &params).await
            })
            .await
    }

    async fn search_upstream(&self, query: &str) -> Result<RawPayload> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AstraError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }

        let mut params = QueryParams::new();
        params.insert("q".to_string(), query.to_string());
        info!(endpoint = %self.search_endpoint, query, "searching space database");
        self.upstream.fetch(&self.search_endpoint, &params).await
    }
}

fn limit_params(limit: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("limit".to_string(), limit.to_string());
    params
}
