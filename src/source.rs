use encoding_rs::SHIFT_JIS;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::{Error, ErrorKind, Result};
use crate::holiday::HolidayStore;

pub const DEFAULT_HOLIDAY_FILES: [&str; 3] =
    ["holidays.csv", "../data/holidays.csv", "data/holidays.csv"];

/// Official list of Japanese national holidays, published in Shift_JIS.
pub const HOLIDAY_URL: &str = "https://www8.cao.go.jp/chosei/shukujitsu/syukujitsu.csv";

pub const DOWNLOAD_TARGET: &str = "holidays.csv";

pub fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_HOLIDAY_FILES.iter().map(PathBuf::from).collect()
}

fn read_source(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| {
        Error::new(
            ErrorKind::SourceUnavailable,
            &format!("'{}': {}", path.display(), e),
        )
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| {
        Error::new(
            ErrorKind::SourceUnavailable,
            &format!("'{}': {}", path.display(), e),
        )
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!(
                "'{}' is not valid UTF-8, invalid sequences were replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Loads a single holiday file into `store`.
///
/// Fails with [`ErrorKind::SourceUnavailable`] if the file cannot be read; a
/// file full of malformed lines is not an error.
pub fn load_from_path(store: &mut HolidayStore, path: &Path) -> Result<usize> {
    let text = read_source(path)?;
    let count = store.load(&text);
    log::info!("Loaded {} holiday(s) from '{}'", count, path.display());
    Ok(count)
}

/// Tries `candidates` in order and loads the first one that can be read.
pub fn load_first_available<P: AsRef<Path>>(
    store: &mut HolidayStore,
    candidates: &[P],
) -> Result<(PathBuf, usize)> {
    for candidate in candidates {
        let path = candidate.as_ref();
        match load_from_path(store, path) {
            Ok(count) => return Ok((path.to_path_buf(), count)),
            Err(e) if e.is_source_unavailable() => log::debug!("{}", e),
            Err(e) => return Err(e),
        }
    }

    Err(Error::new(
        ErrorKind::SourceUnavailable,
        &format!(
            "none of {} found",
            candidates
                .iter()
                .map(|c| format!("'{}'", c.as_ref().display()))
                .join(", ")
        ),
    ))
}

pub fn decode_shift_jis(bytes: &[u8]) -> String {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        log::warn!("Downloaded holiday data contains invalid Shift_JIS sequences");
    }
    text.into_owned()
}

/// Converts Shift_JIS holiday data to UTF-8 and writes it to `dest`.
pub fn save_holiday_file(bytes: &[u8], dest: &Path) -> Result<()> {
    fs::write(dest, decode_shift_jis(bytes)).map_err(|e| {
        Error::new(
            ErrorKind::Download,
            &format!("Could not write '{}': {}", dest.display(), e),
        )
    })
}

/// Fetches the holiday file at `url` and stores it as UTF-8 at `dest`.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    log::info!("Downloading holiday data from {}", url);

    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;

    save_holiday_file(&bytes, dest)?;
    log::info!("Saved holiday data to '{}'", dest.display());
    Ok(())
}
