use cliclack::log;

use crate::cache::CacheGateway;
use crate::error::{ImportError, ImportResult};
use crate::track::TrackRecord;
use crate::youtube::{VideoCandidate, VideoSearch};

/// Only the top search hit is ever used.
const SEARCH_MAX_RESULTS: u32 = 1;

/// Maps a track record to a single video, cache first.
pub struct TrackResolver<'a> {
    cache: &'a CacheGateway,
    search: &'a dyn VideoSearch,
}

impl<'a> TrackResolver<'a> {
    pub fn new(cache: &'a CacheGateway, search: &'a dyn VideoSearch) -> Self {
        Self { cache, search }
    }

    pub async fn resolve(&self, track: &TrackRecord) -> ImportResult<VideoCandidate> {
        if track.is_blank() {
            return Err(ImportError::MissingIdentity);
        }

        let query = track.search_query();

        let candidates = match self.cached_candidates(track).await {
            Some(candidates) => candidates,
            None => self
                .search
                .search(&query, SEARCH_MAX_RESULTS)
                .await
                .map_err(|e| ImportError::SearchFailed {
                    query: query.clone(),
                    cause: e.to_string(),
                })?,
        };

        if candidates.is_empty() {
            return Err(ImportError::NoSearchResults(query));
        }

        // Re-arms the TTL on hits as well as misses
        match serde_json::to_string(&candidates) {
            Ok(value) => {
                if let Err(e) = self.cache.store(track, &value).await {
                    let _ = log::warning(format!("Could not cache results for '{}': {}", track, e));
                }
            }
            Err(e) => {
                let _ = log::warning(format!("Could not encode results for '{}': {}", track, e));
            }
        }

        candidates
            .into_iter()
            .next()
            .ok_or(ImportError::NoSearchResults(query))
    }

    /// A live, well-formed, non-empty cache entry; anything else is a miss.
    async fn cached_candidates(&self, track: &TrackRecord) -> Option<Vec<VideoCandidate>> {
        let raw = match self.cache.lookup(track).await {
            Ok(raw) => raw?,
            Err(e) => {
                let _ = log::warning(format!("Cache read failed for '{}': {}", track, e));
                return None;
            }
        };

        serde_json::from_str::<Vec<VideoCandidate>>(&raw)
            .ok()
            .filter(|candidates| !candidates.is_empty())
    }
}
