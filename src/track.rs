use std::collections::BTreeMap;
use std::fmt;

/// One row of the imported CSV.
///
/// Only the artist and track names are interpreted; every other column is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    pub artist_names: String,
    pub track_name: String,
    pub extra: BTreeMap<String, String>,
}

impl TrackRecord {
    pub fn new(artist_names: impl Into<String>, track_name: impl Into<String>) -> Self {
        Self {
            artist_names: artist_names.into(),
            track_name: track_name.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Free-text query sent to the video search.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.artist_names, self.track_name)
    }

    /// True when the record carries no identity at all.
    pub fn is_blank(&self) -> bool {
        self.artist_names.is_empty() && self.track_name.is_empty()
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.artist_names.is_empty(), self.track_name.is_empty()) {
            (true, true) => write!(f, "<untitled>"),
            (true, false) => write!(f, "{}", self.track_name),
            (false, true) => write!(f, "{}", self.artist_names),
            (false, false) => write!(f, "{} - {}", self.artist_names, self.track_name),
        }
    }
}
