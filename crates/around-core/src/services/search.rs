use std::sync::Arc;

use crate::domain::{Location, Post, moderation};
use crate::error::RepoError;
use crate::ports::ContentIndex;

/// Search radius when the client does not supply one.
pub const DEFAULT_RANGE_KM: f64 = 200.0;

/// A parsed proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub center: Location,
    pub range_km: f64,
}

impl ProximityQuery {
    /// Parse raw query values. Coordinates degrade to zero; a missing or
    /// unparseable range falls back to [`DEFAULT_RANGE_KM`].
    pub fn from_raw(lat: Option<&str>, lon: Option<&str>, range: Option<&str>) -> Self {
        let range_km = range
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_RANGE_KM);

        Self {
            center: Location::from_raw(lat, lon),
            range_km,
        }
    }
}

/// Runs geo queries and drops posts that fail moderation.
pub struct ProximitySearchService {
    index: Arc<dyn ContentIndex>,
}

impl ProximitySearchService {
    pub fn new(index: Arc<dyn ContentIndex>) -> Self {
        Self { index }
    }

    /// Posts near `query.center`, in index order, moderation applied.
    pub async fn search(&self, query: ProximityQuery) -> Result<Vec<Post>, RepoError> {
        let hits = self.index.geo_search(query.center, query.range_km).await?;
        let total = hits.len();

        let posts: Vec<Post> = hits
            .into_iter()
            .filter(|p| moderation::is_allowed(&p.message))
            .collect();

        tracing::debug!(
            lat = query.center.latitude,
            lon = query.center.longitude,
            range_km = query.range_km,
            total,
            returned = posts.len(),
            "Proximity search completed"
        );
        Ok(posts)
    }
}
