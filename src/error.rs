use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Neither the cache nor the search returned a usable candidate.
    #[error("No search results for \"{0}\"")]
    NoSearchResults(String),

    #[error("Track record has neither an artist nor a track name")]
    MissingIdentity,

    #[error("Search failed for \"{query}\": {cause}")]
    SearchFailed { query: String, cause: String },

    #[error("Failed to look up playlist \"{title}\": {cause}")]
    PlaylistLookupFailed { title: String, cause: String },

    #[error("Failed to create playlist \"{title}\": {cause}")]
    PlaylistCreateFailed { title: String, cause: String },

    /// Reported for every track once playlist creation has failed.
    #[error("No playlist available for \"{0}\", track not inserted")]
    PlaylistUnavailable(String),

    #[error("Failed to check whether {video_id} is already in the playlist: {cause}")]
    MembershipCheckFailed { video_id: String, cause: String },

    #[error("Failed to insert \"{track}\": {cause}")]
    InsertFailed { track: String, cause: String },

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("YouTube API error: {0}")]
    Api(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ImportError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}

impl From<google_youtube3::Error> for ImportError {
    fn from(err: google_youtube3::Error) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<redis::RedisError> for ImportError {
    fn from(err: redis::RedisError) -> Self {
        Self::Cache(err.to_string())
    }
}
