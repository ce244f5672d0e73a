use std::path::PathBuf;
use log::LevelFilter;

pub const DEFAULT_INPUT_PATH: &str = "input.txt";
pub const DEFAULT_MARKER: &str = "departure ";

/// Run settings. There are no flags or environment variables; the binary
/// always runs with the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_path: PathBuf,
    /// Fields whose names start with this contribute to the product.
    pub marker: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            marker: DEFAULT_MARKER.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn with_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}
