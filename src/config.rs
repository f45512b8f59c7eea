use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::clients::{darksky, google, hiking, meetup, tmdb, yelp};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cityscope.db".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Endpoint and credential for one upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Request timeout in seconds shared by every upstream call (default: 30)
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub yelp: ProviderConfig,

    pub movies: ProviderConfig,

    pub meetups: ProviderConfig,

    pub trails: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            user_agent: format!("cityscope/{}", env!("CARGO_PKG_VERSION")),
            geocode: ProviderConfig::new(google::GOOGLE_GEOCODE_API),
            weather: ProviderConfig::new(darksky::DARKSKY_API),
            yelp: ProviderConfig::new(yelp::YELP_API),
            movies: ProviderConfig::new(tmdb::TMDB_API),
            meetups: ProviderConfig::new(meetup::MEETUP_API),
            trails: ProviderConfig::new(hiking::HIKING_PROJECT_API),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cityscope").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cityscope").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    /// Let the process environment (including a `.env` file) override secrets,
    /// the port and the database location.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let keys = [
            ("GEOCODE_API_KEY", &mut self.providers.geocode),
            ("WEATHER_API_KEY", &mut self.providers.weather),
            ("YELP_API_KEY", &mut self.providers.yelp),
            ("MOVIE_API_KEY", &mut self.providers.movies),
            ("MEETUP_API_KEY", &mut self.providers.meetups),
            ("HIKING_API_KEY", &mut self.providers.trails),
        ];
        for (name, provider) in keys {
            if let Some(key) = var(name).filter(|k| !k.is_empty()) {
                provider.api_key = key;
            }
        }

        if let Some(port) = var("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }

        if let Some(url) = var("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.general.database_path = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        // Only the SQLite driver is compiled in.
        if !self.general.database_path.starts_with("sqlite:") {
            anyhow::bail!(
                "Unsupported database URL '{}': expected a sqlite: URL",
                self.general.database_path
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) exceeds max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        Ok(())
    }
}
