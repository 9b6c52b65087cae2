//! In-memory stand-ins for Redis and the YouTube API.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cache::CacheStore;
use crate::error::{ImportError, ImportResult};
use crate::youtube::{PlaylistInfo, PlaylistMembership, PlaylistService, VideoCandidate, VideoSearch};

pub fn candidate(video_id: &str, title: &str) -> VideoCandidate {
    VideoCandidate {
        video_id: video_id.to_string(),
        title: title.to_string(),
        rank: 0,
    }
}

#[derive(Default)]
struct CacheState {
    values: HashMap<String, String>,
    set_calls: Vec<String>,
    expire_calls: Vec<(String, u64)>,
    fail_reads: bool,
    fail_writes: bool,
}

#[derive(Default)]
pub struct MemoryCache {
    state: Mutex<CacheState>,
}

impl MemoryCache {
    pub fn preload(&self, key: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        state.values.insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().values.get(key).cloned()
    }

    pub fn expire_calls(&self) -> Vec<(String, u64)> {
        self.state.lock().unwrap().expire_calls.clone()
    }

    pub fn set_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().set_calls.clone()
    }

    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }

    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> ImportResult<Option<String>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(ImportError::Cache("connection refused".to_string()));
        }

        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ImportResult<()> {
        let mut state = self.state.lock().unwrap();
        state.set_calls.push(key.to_string());
        if state.fail_writes {
            return Err(ImportError::Cache("connection reset".to_string()));
        }
        state.values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn expire(&self, key: &str, seconds: u64) -> ImportResult<()> {
        let mut state = self.state.lock().unwrap();
        state.expire_calls.push((key.to_string(), seconds));

        Ok(())
    }
}

#[derive(Default)]
struct YouTubeState {
    catalog: HashMap<String, Vec<VideoCandidate>>,
    playlists: Vec<PlaylistInfo>,
    items: HashMap<String, Vec<String>>,
    search_calls: Vec<(String, u32)>,
    create_calls: Vec<String>,
    insert_calls: Vec<(String, String)>,
    fail_listing: bool,
    fail_create: bool,
    fail_membership: bool,
    fail_searches: HashSet<String>,
    fail_inserts: HashSet<String>,
}

/// Records every call so tests can assert on what reached the API.
#[derive(Default)]
pub struct FakeYouTube {
    state: Mutex<YouTubeState>,
}

impl FakeYouTube {
    pub fn add_search_result(&self, query: &str, video: VideoCandidate) {
        let mut state = self.state.lock().unwrap();
        state.catalog.entry(query.to_string()).or_default().push(video);
    }

    pub fn add_playlist(&self, id: &str, title: &str) {
        let mut state = self.state.lock().unwrap();
        state.playlists.push(PlaylistInfo {
            id: id.to_string(),
            title: title.to_string(),
        });
    }

    pub fn fail_listing(&self) {
        self.state.lock().unwrap().fail_listing = true;
    }

    pub fn fail_create(&self) {
        self.state.lock().unwrap().fail_create = true;
    }

    pub fn fail_membership_checks(&self) {
        self.state.lock().unwrap().fail_membership = true;
    }

    pub fn fail_search_for(&self, query: &str) {
        let mut state = self.state.lock().unwrap();
        state.fail_searches.insert(query.to_string());
    }

    pub fn fail_insert_of(&self, video_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.fail_inserts.insert(video_id.to_string());
    }

    pub fn items(&self, playlist_id: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.items.get(playlist_id).cloned().unwrap_or_default()
    }

    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.state.lock().unwrap().search_calls.clone()
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().create_calls.clone()
    }

    pub fn insert_calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().insert_calls.clone()
    }
}

#[async_trait]
impl VideoSearch for FakeYouTube {
    async fn search(&self, query: &str, max_results: u32) -> ImportResult<Vec<VideoCandidate>> {
        let mut state = self.state.lock().unwrap();
        state.search_calls.push((query.to_string(), max_results));
        if state.fail_searches.contains(query) {
            return Err(ImportError::api("quotaExceeded"));
        }

        let results = state.catalog.get(query).cloned().unwrap_or_default();
        Ok(results.into_iter().take(max_results as usize).collect())
    }
}

#[async_trait]
impl PlaylistService for FakeYouTube {
    async fn list_playlists(&self, max_results: u32) -> ImportResult<Vec<PlaylistInfo>> {
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(ImportError::api("quotaExceeded"));
        }

        Ok(state
            .playlists
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    async fn create_playlist(&self, title: &str) -> ImportResult<PlaylistInfo> {
        let mut state = self.state.lock().unwrap();
        state.create_calls.push(title.to_string());
        if state.fail_create {
            return Err(ImportError::api("forbidden"));
        }

        let playlist = PlaylistInfo {
            id: format!("pl-created-{}", state.create_calls.len()),
            title: title.to_string(),
        };
        state.playlists.push(playlist.clone());

        Ok(playlist)
    }

    async fn list_items(
        &self,
        playlist_id: &str,
        video_id: &str,
        max_results: u32,
    ) -> ImportResult<Vec<PlaylistMembership>> {
        let state = self.state.lock().unwrap();
        if state.fail_membership {
            return Err(ImportError::api("backendError"));
        }

        let items = state.items.get(playlist_id).cloned().unwrap_or_default();
        Ok(items
            .into_iter()
            .filter(|id| id == video_id)
            .take(max_results as usize)
            .map(|video_id| PlaylistMembership {
                playlist_id: playlist_id.to_string(),
                video_id,
            })
            .collect())
    }

    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> ImportResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .insert_calls
            .push((playlist_id.to_string(), video_id.to_string()));
        if state.fail_inserts.contains(video_id) {
            return Err(ImportError::api("videoNotFound"));
        }

        state
            .items
            .entry(playlist_id.to_string())
            .or_default()
            .push(video_id.to_string());

        Ok(())
    }
}
