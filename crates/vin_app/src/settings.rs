//! Run settings, persisted as RON next to the working directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vin_core::{SearchUrlBuilder, UrlError, DEFAULT_BASE_URL};
use vin_engine::{
    AtomicFileWriter, FetchError, FetchSettings, HarvestLimits, Harvester, PersistError,
    ReqwestFetcher, RetryPolicy, DEFAULT_USER_AGENT,
};
use vin_logging::{vin_info, vin_warn};

pub const SETTINGS_FILENAME: &str = "vin_harvester.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub max_vins: usize,
    pub max_pages: u32,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub max_bytes: u64,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = HarvestLimits::default();
        let retry = RetryPolicy::default();
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_vins: limits.max_vins,
            max_pages: limits.max_pages,
            retry_attempts: retry.max_attempts,
            retry_delay_ms: retry.delay.as_millis() as u64,
            request_timeout_secs: fetch.request_timeout.as_secs(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_bytes: fetch.max_bytes,
            bind_addr: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Settings {
    pub fn limits(&self) -> HarvestLimits {
        HarvestLimits {
            max_vins: self.max_vins,
            max_pages: self.max_pages,
        }
    }

    pub fn retry(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            user_agent: self.user_agent.clone(),
            ..FetchSettings::default()
        }
    }

    pub fn url_builder(&self) -> Result<SearchUrlBuilder, UrlError> {
        SearchUrlBuilder::new(&self.base_url)
    }

    pub fn harvester(&self) -> Result<Harvester, FetchError> {
        let fetcher = ReqwestFetcher::new(self.fetch_settings())?;
        Ok(Harvester::new(Arc::new(fetcher))
            .with_limits(self.limits())
            .with_retry(self.retry()))
    }
}

/// Loads settings from `path`. A missing file means defaults; an unreadable
/// or malformed one is logged and also falls back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            vin_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            vin_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            vin_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<PathBuf, PersistError> {
    let content = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::new())
        .map_err(|err| PersistError::Io(std::io::Error::other(err.to_string())))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| SETTINGS_FILENAME.to_string());
    AtomicFileWriter::new(dir).write(&filename, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_engine() {
        let settings = Settings::default();
        assert_eq!(settings.limits(), HarvestLimits::default());
        assert_eq!(settings.retry(), RetryPolicy::default());
        assert_eq!(settings.fetch_settings().request_timeout, Duration::from_secs(10));
        assert_eq!(settings.url_builder().unwrap().base(), DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            load_settings(&temp.path().join("absent.ron")),
            Settings::default()
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(max_vins: 12, user_agent: \"Test/1.0\")").unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.max_vins, 12);
        assert_eq!(settings.user_agent, "Test/1.0");
        assert_eq!(settings.max_pages, 5);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(max_vins: \"lots\"").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(SETTINGS_FILENAME);
        let settings = Settings {
            max_pages: 2,
            base_url: "http://127.0.0.1:9000/listings/ford".to_string(),
            ..Settings::default()
        };

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path), settings);
    }
}
