use crate::error::{ImportError, ImportResult};
use crate::youtube::{PlaylistInfo, PlaylistService};

/// Only the first page of the account's playlists is searched. A playlist
/// past this page is not found.
pub const PLAYLIST_PAGE_SIZE: u32 = 20;

pub const MEMBERSHIP_PAGE_SIZE: u32 = 50;

/// Find an owned playlist whose title matches exactly (case-sensitive).
pub async fn locate_playlist(
    service: &dyn PlaylistService,
    title: &str,
) -> ImportResult<Option<PlaylistInfo>> {
    let playlists = service
        .list_playlists(PLAYLIST_PAGE_SIZE)
        .await
        .map_err(|e| ImportError::PlaylistLookupFailed {
            title: title.to_string(),
            cause: e.to_string(),
        })?;

    Ok(playlists.into_iter().find(|p| p.title == title))
}

/// Whether `video_id` is already in the playlist. Always asks the service;
/// membership changes as the import inserts.
pub async fn is_member(
    service: &dyn PlaylistService,
    video_id: &str,
    playlist_id: &str,
) -> ImportResult<bool> {
    let items = service
        .list_items(playlist_id, video_id, MEMBERSHIP_PAGE_SIZE)
        .await
        .map_err(|e| ImportError::MembershipCheckFailed {
            video_id: video_id.to_string(),
            cause: e.to_string(),
        })?;

    Ok(!items.is_empty())
}
