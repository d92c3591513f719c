//! Runtime configuration, read from the environment (after `.env` is loaded).

use std::path::PathBuf;

use crate::app::tmdb::{POSTER_BASE, TMDB_BASE, TrendingWindow};

pub const API_KEY_VAR: &str = "TMDB_API_KEY";
const BASE_URL_VAR: &str = "TMDB_BASE_URL";
const IMAGE_BASE_URL_VAR: &str = "TMDB_IMAGE_BASE_URL";
const DATA_DIR_VAR: &str = "MOVIE_EXPLORER_DATA_DIR";
const WINDOW_VAR: &str = "MOVIE_EXPLORER_TRENDING_WINDOW";
const LOG_VAR: &str = "MOVIE_EXPLORER_LOG";

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub data_dir: Option<PathBuf>,
    pub trending_window: TrendingWindow,
    pub log_file: Option<PathBuf>,
}

// Keep the credential out of debug logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("data_dir", &self.data_dir)
            .field("trending_window", &self.trending_window)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let trending_window = match non_empty(WINDOW_VAR) {
            None => TrendingWindow::default(),
            Some(raw) => TrendingWindow::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown trending window, using day");
                TrendingWindow::default()
            }),
        };

        Self {
            api_key: non_empty(API_KEY_VAR),
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| TMDB_BASE.to_string()),
            image_base_url: non_empty(IMAGE_BASE_URL_VAR)
                .unwrap_or_else(|| POSTER_BASE.to_string()),
            data_dir: non_empty(DATA_DIR_VAR).map(PathBuf::from),
            trending_window,
            log_file: non_empty(LOG_VAR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]);
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, TMDB_BASE);
        assert_eq!(config.image_base_url, POSTER_BASE);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.trending_window, TrendingWindow::Day);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("TMDB_API_KEY", " abc123 "),
            ("TMDB_BASE_URL", "http://localhost:8080/3"),
            ("MOVIE_EXPLORER_DATA_DIR", "/tmp/movies"),
            ("MOVIE_EXPLORER_TRENDING_WINDOW", "week"),
            ("MOVIE_EXPLORER_LOG", "/tmp/movies.log"),
        ]);
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.base_url, "http://localhost:8080/3");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/movies")));
        assert_eq!(config.trending_window, TrendingWindow::Week);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/movies.log")));
    }

    #[test]
    fn blank_key_counts_as_missing_and_bad_window_falls_back() {
        let config = config(&[
            ("TMDB_API_KEY", "   "),
            ("MOVIE_EXPLORER_TRENDING_WINDOW", "hour"),
        ]);
        assert_eq!(config.api_key, None);
        assert_eq!(config.trending_window, TrendingWindow::Day);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = config(&[("TMDB_API_KEY", "super-secret")]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
