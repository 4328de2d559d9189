use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar;
use crate::error::{Error, ErrorKind, Result};
use crate::holiday::{HolidayStore, DEFAULT_CAPACITY};
use crate::render::Renderer;
use crate::source;

const CONFIG_PATH_ENV_VAR: &str = "HOLICAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let config_env = env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from);

    let config_xdg = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("holical").join("config.toml"));

    let home_config = dirs::home_dir().map(|home| home.join(".holical.toml"));

    config_env
        .into_iter()
        .chain(config_xdg)
        .chain(home_config)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tried in order until one can be read.
    pub holiday_files: Vec<PathBuf>,
    /// Maximum number of holidays kept, `0` for no limit.
    pub capacity: usize,
    pub marker: char,
    pub weekday_labels: [String; 7],
    pub title_format: String,
    pub listing_header: String,
    pub none_text: String,
    pub color: bool,
    /// Where holiday data is fetched from when no file is found.
    pub download_url: String,
    pub download_target: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            holiday_files: source::default_candidates(),
            capacity: DEFAULT_CAPACITY,
            marker: '*',
            weekday_labels: calendar::default_weekday_labels(),
            title_format: "{month_name} {year}".to_owned(),
            listing_header: "Holidays".to_owned(),
            none_text: "none".to_owned(),
            color: true,
            download_url: source::HOLIDAY_URL.to_owned(),
            download_target: PathBuf::from(source::DOWNLOAD_TARGET),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::Config,
                &format!("Could not read '{}': {}", path.display(), e),
            )
        })?;

        Ok(toml::from_str(&content)?)
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity)
        }
    }

    pub fn holiday_store(&self) -> HolidayStore {
        HolidayStore::with_capacity_limit(self.capacity_limit())
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new()
            .weekday_labels(self.weekday_labels.clone())
            .marker(self.marker)
            .title_format(&self.title_format)
            .listing_header(&self.listing_header)
            .none_text(&self.none_text)
            .color(self.color)
    }
}

/// Loads `path` if given, otherwise the first existing default location.
///
/// Falls back to [`Config::default`] when no configuration file exists at all.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Using configuration '{}'", path.display());
            Config::from_file(&path)
        }
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
