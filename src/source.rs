use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::ImportResult;
use crate::track::TrackRecord;

pub const ARTIST_COLUMN: &str = "Artist Name(s)";
pub const TRACK_COLUMN: &str = "Track Name";

#[derive(Debug)]
pub struct TrackSource {
    pub records: Vec<TrackRecord>,

    /// Human-readable name derived from the CSV filename
    pub display_name: String,
}

/// Load every track record from a CSV export on disk.
pub fn load_track_records(path: &Path) -> ImportResult<TrackSource> {
    let file = std::fs::File::open(path)?;
    let records = parse_track_records(file)?;

    Ok(TrackSource {
        records,
        display_name: display_name_for(path),
    })
}

/// Parse CSV rows into track records, keeping input order.
///
/// Identity columns are read verbatim; all other columns go to `extra`.
pub fn parse_track_records<R: Read>(reader: R) -> ImportResult<Vec<TrackRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let field = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| row.get(i))
                .unwrap_or_default()
        };
        let mut track = TrackRecord::new(field(ARTIST_COLUMN), field(TRACK_COLUMN));

        for (column, value) in headers.iter().zip(row.iter()) {
            if column != ARTIST_COLUMN && column != TRACK_COLUMN {
                track.extra.insert(column.to_string(), value.to_string());
            }
        }

        records.push(track);
    }

    Ok(records)
}

/// `My_Liked_Songs.csv` becomes `My Liked Songs`.
pub fn display_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " ").trim().to_string())
        .unwrap_or_default()
}

/// List the CSV files directly inside `dir`, sorted by name.
pub fn list_csv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if path.is_file() && is_csv {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Ask the user to pick one CSV export from `dir`.
///
/// Returns `None` when the directory holds no CSV files.
pub fn ask_for_csv_file(dir: &Path) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    use cliclack::select;

    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Ok(None);
    }

    let items: Vec<(PathBuf, String, &str)> = files
        .into_iter()
        .map(|path| {
            let label = display_name_for(&path);
            (path, label, "")
        })
        .collect();

    let selected = select("Select the CSV export to import:")
        .items(&items)
        .interact()?;

    Ok(Some(selected))
}
