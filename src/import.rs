use std::collections::HashSet;

use cliclack::log;

use crate::cache::CacheGateway;
use crate::error::{ImportError, ImportResult};
use crate::playlist::{is_member, locate_playlist};
use crate::resolver::TrackResolver;
use crate::track::TrackRecord;
use crate::youtube::{PlaylistService, VideoCandidate, VideoSearch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Added(VideoCandidate),
    /// The video is already in the playlist
    Skipped(VideoCandidate),
    /// Dry run only
    WouldAdd(VideoCandidate),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
    pub playlist_id: Option<String>,
}

impl ImportSummary {
    pub fn attempted(&self) -> usize {
        self.added + self.skipped + self.planned + self.failed
    }
}

/// Resolves tracks and adds them to a playlist, one track at a time.
pub struct Populator<'a> {
    resolver: TrackResolver<'a>,
    playlists: &'a dyn PlaylistService,
    dry_run: bool,
}

impl<'a> Populator<'a> {
    pub fn new(
        cache: &'a CacheGateway,
        search: &'a dyn VideoSearch,
        playlists: &'a dyn PlaylistService,
    ) -> Self {
        Self {
            resolver: TrackResolver::new(cache, search),
            playlists,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;

        self
    }

    /// Import `tracks` into the playlist titled `title`, creating it if needed.
    ///
    /// Per-track failures are reported and counted; only a failed playlist
    /// lookup aborts the run.
    pub async fn populate(
        &self,
        title: &str,
        tracks: &[TrackRecord],
    ) -> ImportResult<ImportSummary> {
        let playlist_id = self.target_playlist(title).await?;

        let mut summary = ImportSummary {
            playlist_id: playlist_id.clone(),
            ..Default::default()
        };
        let mut planned = HashSet::new();

        for track in tracks {
            match self
                .process(title, track, playlist_id.as_deref(), &mut planned)
                .await
            {
                Ok(TrackOutcome::Added(video)) => {
                    summary.added += 1;
                    log::success(format!("Added: {} ({})", track, video.title))?;
                }
                Ok(TrackOutcome::Skipped(video)) => {
                    summary.skipped += 1;
                    log::info(format!(
                        "Skipped {}: already present ({})",
                        track, video.video_id
                    ))?;
                }
                Ok(TrackOutcome::WouldAdd(video)) => {
                    summary.planned += 1;
                    log::info(format!("Would add: {} ({})", track, video.title))?;
                }
                Err(e @ ImportError::PlaylistUnavailable(_)) => {
                    summary.failed += 1;
                    log::error(format!("{}: {}", track, e))?;
                }
                Err(e) => {
                    summary.failed += 1;
                    log::warning(format!("{}: {}", track, e))?;
                }
            }
        }

        Ok(summary)
    }

    /// Existing playlist id, a freshly created one, or `None` when creation
    /// failed or is deferred by a dry run.
    async fn target_playlist(&self, title: &str) -> ImportResult<Option<String>> {
        if let Some(existing) = locate_playlist(self.playlists, title).await? {
            log::info(format!("Using existing playlist '{}' ({})", title, existing.id))?;
            return Ok(Some(existing.id));
        }

        if self.dry_run {
            log::info(format!("Would create playlist '{}'", title))?;
            return Ok(None);
        }

        match self.playlists.create_playlist(title).await {
            Ok(created) => {
                log::success(format!("Created playlist '{}' ({})", title, created.id))?;
                Ok(Some(created.id))
            }
            Err(e) => {
                let e = ImportError::PlaylistCreateFailed {
                    title: title.to_string(),
                    cause: e.to_string(),
                };
                log::error(e.to_string())?;
                Ok(None)
            }
        }
    }

    async fn process(
        &self,
        title: &str,
        track: &TrackRecord,
        playlist_id: Option<&str>,
        planned: &mut HashSet<String>,
    ) -> ImportResult<TrackOutcome> {
        if playlist_id.is_none() && !self.dry_run {
            return Err(ImportError::PlaylistUnavailable(title.to_string()));
        }

        let video = self.resolver.resolve(track).await?;

        if let Some(playlist_id) = playlist_id {
            if is_member(self.playlists, &video.video_id, playlist_id).await? {
                return Ok(TrackOutcome::Skipped(video));
            }
        }

        let Some(playlist_id) = playlist_id.filter(|_| !self.dry_run) else {
            if !planned.insert(video.video_id.clone()) {
                return Ok(TrackOutcome::Skipped(video));
            }
            return Ok(TrackOutcome::WouldAdd(video));
        };

        self.playlists
            .insert_item(playlist_id, &video.video_id)
            .await
            .map_err(|e| ImportError::InsertFailed {
                track: track.to_string(),
                cause: e.to_string(),
            })?;

        Ok(TrackOutcome::Added(video))
    }
}
