//! Runtime configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | POS_DATA_DIR | ./data | Device cache, media and log files |
//! | POS_CAFE_NAME | Cafe POS | Header line on printed receipts |
//! | POS_CAFE_ADDRESS | (empty) | Address line on printed receipts |
//! | POS_LOG_LEVEL | info | Log verbosity |
//! | POS_LOG_DIR | (unset) | Daily log files; stdout only when unset |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the device cache, media files and logs
    pub data_dir: PathBuf,
    /// Cafe name printed on receipt headers
    pub cafe_name: String,
    /// Cafe address printed on receipt headers
    pub cafe_address: String,
    /// Log verbosity: trace | debug | info | warn | error
    pub log_level: String,
    /// Directory for daily log files; stdout only when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// A `.env` file beside the binary is read first when present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            data_dir: std::env::var("POS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            cafe_name: std::env::var("POS_CAFE_NAME").unwrap_or_else(|_| "Cafe POS".into()),
            cafe_address: std::env::var("POS_CAFE_ADDRESS").unwrap_or_default(),
            log_level: std::env::var("POS_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("POS_LOG_DIR").ok(),
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join("pos-cache.redb")
    }

    pub fn media_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            cafe_name: "Cafe POS".into(),
            cafe_address: String::new(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}
