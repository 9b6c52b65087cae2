use clap::Args;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "playimport";

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the Google OAuth2 client secret JSON file
    #[clap(short = 'o', long, value_name = "PATH")]
    pub oauth2_json: Option<String>,

    /// Redis URL used to cache search results
    #[clap(long, value_name = "URL")]
    pub redis_url: Option<String>,

    /// Directory scanned for CSV exports when no file is given
    #[clap(short = 'd', long, value_name = "DIR")]
    pub csv_dir: Option<String>,

    /// Privacy status for newly created playlists (private, unlisted, public)
    #[clap(short = 'p', long = "privacy", value_name = "STATUS")]
    pub privacy_status: Option<String>,

    /// Show the current configuration
    #[clap(short = 'l', long)]
    pub list: bool,

    /// Reset the configuration to default values
    #[clap(long)]
    pub reset: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the OAuth2 client secret JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2_json: Option<String>,

    pub redis_url: String,

    pub csv_dir: String,

    pub privacy_status: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            oauth2_json: None,
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            csv_dir: ".".to_string(),
            privacy_status: "private".to_string(),
        }
    }
}

impl Config {
    /// Apply any values given on the command line. Returns whether anything changed.
    pub fn apply(&mut self, args: &ConfigArgs) -> bool {
        let before = self.clone();

        if let Some(path) = &args.oauth2_json {
            self.oauth2_json = Some(path.clone());
        }
        if let Some(url) = &args.redis_url {
            self.redis_url = url.clone();
        }
        if let Some(dir) = &args.csv_dir {
            self.csv_dir = dir.clone();
        }
        if let Some(status) = &args.privacy_status {
            self.privacy_status = status.clone();
        }

        *self != before
    }

    /// Read the configuration from the file
    pub fn read() -> Result<Self, Box<dyn std::error::Error>> {
        let cfg: Config = confy::load(APP_NAME, None)?;

        Ok(cfg)
    }

    /// Write the configuration to the file
    pub fn write(&self) -> Result<(), Box<dyn std::error::Error>> {
        confy::store(APP_NAME, None, self)?;

        Ok(())
    }
}
