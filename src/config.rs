//! User configuration (`~/.config/spotify-shell/config.toml`)

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_VOLUME_PERCENT;

const CONFIG_DIR_NAME: &str = "spotify-shell";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_home_limit")]
    pub home_limit: usize,
    #[serde(default = "default_library_limit")]
    pub library_limit: usize,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_true")]
    pub record_plays: bool,
    #[serde(default = "default_volume")]
    pub default_volume: u8,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_home_limit() -> usize {
    6
}

fn default_library_limit() -> usize {
    50
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME_PERCENT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            cache_dir: default_cache_dir(),
            home_limit: default_home_limit(),
            library_limit: default_library_limit(),
            refresh_interval_secs: default_refresh_interval(),
            record_plays: true,
            default_volume: DEFAULT_VOLUME_PERCENT,
        }
    }
}

/// How long each resource stays fresh in the local cache
pub mod freshness {
    use chrono::Duration;

    pub fn recently_played() -> Duration {
        Duration::minutes(5)
    }

    pub fn popular_albums() -> Duration {
        Duration::minutes(15)
    }

    pub fn made_for_you() -> Duration {
        Duration::minutes(30)
    }

    pub fn playlists() -> Duration {
        Duration::minutes(30)
    }

    pub fn playlist_tracks() -> Duration {
        Duration::minutes(10)
    }
}

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Load config.toml (writing defaults if missing), then apply `.env` / environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path();
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            let config = Self::default();
            if let Err(e) = config.save() {
                tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
            }
            config
        };

        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env loaded");
        }
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let dir = Self::get_config_dir();
        fs::create_dir_all(&dir)?;
        fs::write(Self::get_config_path(), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SUPABASE_URL").filter(|v| !v.is_empty()) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY").filter(|v| !v.is_empty()) {
            self.supabase_anon_key = Some(key);
        }
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(10))
    }
}

/// Freshness lookup by resource name, see `CatalogSection::resource`
pub fn freshness_for(resource: &str) -> Duration {
    match resource {
        "recently-played" => freshness::recently_played(),
        "made-for-you" => freshness::made_for_you(),
        "popular-albums" => freshness::popular_albums(),
        "playlists" => freshness::playlists(),
        _ => freshness::playlist_tracks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_volume, 80);
        assert_eq!(config.home_limit, 6);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            supabase_url = "https://demo.supabase.co"
            library_limit = 20
            record_plays = false
            "#,
        )
        .unwrap();
        assert_eq!(config.supabase_url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.library_limit, 20);
        assert!(!config.record_plays);
        assert_eq!(config.refresh_interval_secs, 300);
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = AppConfig {
            supabase_url: Some("https://file.supabase.co".into()),
            ..AppConfig::default()
        };
        config.apply_env(|name| match name {
            "SUPABASE_URL" => Some("https://env.supabase.co".into()),
            "SUPABASE_ANON_KEY" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.supabase_url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.supabase_anon_key, None);
    }

    #[test]
    fn freshness_windows_fall_between_five_and_thirty_minutes() {
        for resource in ["recently-played", "made-for-you", "popular-albums", "playlists", "playlist-9"] {
            let window = freshness_for(resource);
            assert!(window >= Duration::minutes(5) && window <= Duration::minutes(30));
        }
        assert_eq!(freshness_for("recently-played"), Duration::minutes(5));
    }
}
