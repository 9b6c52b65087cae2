use async_trait::async_trait;
use google_youtube3::{
    YouTube,
    api::{Playlist, PlaylistItem, PlaylistItemSnippet, PlaylistSnippet, PlaylistStatus, ResourceId},
    hyper_rustls, hyper_util, yup_oauth2,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::APP_NAME;
use crate::error::{ImportError, ImportResult};

/// One search hit. Cached as JSON, so the field names are part of the
/// cache format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMembership {
    pub playlist_id: String,
    pub video_id: String,
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Ranked candidates for a free-text query, best first.
    async fn search(&self, query: &str, max_results: u32) -> ImportResult<Vec<VideoCandidate>>;
}

/// Playlist operations on the authorized account.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// First page of the account's own playlists.
    async fn list_playlists(&self, max_results: u32) -> ImportResult<Vec<PlaylistInfo>>;

    async fn create_playlist(&self, title: &str) -> ImportResult<PlaylistInfo>;

    async fn list_items(
        &self,
        playlist_id: &str,
        video_id: &str,
        max_results: u32,
    ) -> ImportResult<Vec<PlaylistMembership>>;

    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> ImportResult<()>;
}

const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/youtube.readonly",
    "https://www.googleapis.com/auth/youtube",
];

pub struct YouTubeClient {
    hub: YouTube<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>,
    privacy_status: String,
}

impl YouTubeClient {
    /// Authorize against the account and build the API hub.
    ///
    /// The first run opens the browser consent flow and waits for the
    /// redirect on a local listener; later runs reuse the persisted token.
    pub async fn new(oauth_json_path: &str, privacy_status: &str) -> ImportResult<Self> {
        let auth_failed = |e: &dyn std::fmt::Display| ImportError::AuthorizationFailed(e.to_string());

        let secret = yup_oauth2::read_application_secret(oauth_json_path)
            .await
            .map_err(|e| auth_failed(&e))?;

        let config_file = confy::get_configuration_file_path(APP_NAME, None)
            .map_err(|e| auth_failed(&e))?;
        let token_cache_path = token_cache_path(&config_file)?;

        let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
            secret,
            yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .map_err(|e| auth_failed(&e))?;

        // Request every scope upfront so the import never stalls mid-run
        auth.token(SCOPES).await.map_err(|e| auth_failed(&e))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| auth_failed(&e))?
            .https_or_http()
            .enable_http1()
            .build();

        let hub = YouTube::new(
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(connector),
            auth,
        );

        Ok(Self {
            hub,
            privacy_status: privacy_status.to_string(),
        })
    }
}

/// The token cache lives next to the configuration file.
fn token_cache_path(config_file: &Path) -> ImportResult<PathBuf> {
    let cache_dir = config_file
        .parent()
        .ok_or_else(|| ImportError::AuthorizationFailed("no configuration directory".into()))?;

    std::fs::create_dir_all(cache_dir)
        .map_err(|e| ImportError::AuthorizationFailed(e.to_string()))?;

    Ok(cache_dir.join("token_cache.json"))
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> ImportResult<Vec<VideoCandidate>> {
        let result = self
            .hub
            .search()
            .list(&vec!["snippet".to_string()])
            .q(query)
            .add_type("video")
            .max_results(max_results)
            .doit()
            .await?;

        let mut candidates = Vec::new();
        for item in result.1.items.unwrap_or_default() {
            let Some(video_id) = item.id.and_then(|id| id.video_id) else {
                continue;
            };

            candidates.push(VideoCandidate {
                video_id,
                title: item.snippet.and_then(|s| s.title).unwrap_or_default(),
                rank: candidates.len() as u32,
            });
        }

        Ok(candidates)
    }
}

#[async_trait]
impl PlaylistService for YouTubeClient {
    async fn list_playlists(&self, max_results: u32) -> ImportResult<Vec<PlaylistInfo>> {
        let result = self
            .hub
            .playlists()
            .list(&vec!["snippet".to_string()])
            .mine(true)
            .max_results(max_results)
            .doit()
            .await?;

        let playlists = result
            .1
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|playlist| {
                Some(PlaylistInfo {
                    id: playlist.id?,
                    title: playlist.snippet.and_then(|s| s.title).unwrap_or_default(),
                })
            })
            .collect();

        Ok(playlists)
    }

    async fn create_playlist(&self, title: &str) -> ImportResult<PlaylistInfo> {
        let playlist = Playlist {
            snippet: Some(PlaylistSnippet {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            status: Some(PlaylistStatus {
                privacy_status: Some(self.privacy_status.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = self
            .hub
            .playlists()
            .insert(playlist)
            .add_part("snippet")
            .add_part("status")
            .doit()
            .await?;

        let id = result
            .1
            .id
            .ok_or_else(|| ImportError::api("created playlist has no id"))?;

        Ok(PlaylistInfo {
            id,
            title: title.to_string(),
        })
    }

    async fn list_items(
        &self,
        playlist_id: &str,
        video_id: &str,
        max_results: u32,
    ) -> ImportResult<Vec<PlaylistMembership>> {
        let result = self
            .hub
            .playlist_items()
            .list(&vec!["snippet".to_string()])
            .playlist_id(playlist_id)
            .video_id(video_id)
            .max_results(max_results)
            .doit()
            .await?;

        let memberships = result
            .1
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| PlaylistMembership {
                playlist_id: playlist_id.to_string(),
                video_id: item
                    .snippet
                    .and_then(|s| s.resource_id)
                    .and_then(|r| r.video_id)
                    .unwrap_or_else(|| video_id.to_string()),
            })
            .collect();

        Ok(memberships)
    }

    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> ImportResult<()> {
        let playlist_item = PlaylistItem {
            snippet: Some(PlaylistItemSnippet {
                playlist_id: Some(playlist_id.to_string()),
                resource_id: Some(ResourceId {
                    kind: Some("youtube#video".to_string()),
                    video_id: Some(video_id.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        self.hub
            .playlist_items()
            .insert(playlist_item)
            .add_part("snippet")
            .doit()
            .await?;

        Ok(())
    }
}
