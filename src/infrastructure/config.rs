use crate::domain::error::CsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TMDB_TOKEN_ENV: &str = "TMDB_TOKEN";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    pub http_proxy: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub generative: GenerativeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Clear the loading flag when the generative fallback comes back empty.
    /// Off by default: an empty fallback leaves `loading` set.
    #[serde(default)]
    pub settle_on_empty_fallback: bool,
}

impl SearchConfig {
    /// How long to wait after the last query change for its resolution to start.
    pub fn settle_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.saturating_add(50))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerativeConfig {
    #[serde(default = "default_generative_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            max_results: default_max_results(),
            settle_on_empty_fallback: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            token: None,
            language: default_language(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_generative_endpoint(),
            api_key: None,
            temperature: default_temperature(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            http_proxy: None,
            timeout_secs: default_timeout_secs(),
            enable_emoji: true,
            logging: Logging::default(),
            search: SearchConfig::default(),
            catalog: CatalogConfig::default(),
            generative: GenerativeConfig::default(),
        }
    }
}

impl Config {
    /// Fill missing credentials from the environment.
    ///
    /// Values already present in the config file win.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if is_blank(&self.catalog.token) {
            self.catalog.token = lookup(TMDB_TOKEN_ENV).filter(|v| !v.trim().is_empty());
        }
        if is_blank(&self.generative.api_key) {
            self.generative.api_key =
                lookup(GEMINI_API_KEY_ENV).filter(|v| !v.trim().is_empty());
        }
    }

    /// Generative credential, if one is configured and non-blank.
    pub fn generative_key(&self) -> Option<&str> {
        self.generative
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_enable_emoji() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_debounce_ms() -> u64 {
    300
}
fn default_min_query_chars() -> usize {
    2
}
fn default_max_results() -> usize {
    8
}
fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_generative_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        .to_string()
}
fn default_temperature() -> f64 {
    0.7
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cinesearch").join("config.toml"))
}

pub fn load_config() -> Result<Config, CsError> {
    let mut config = match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path).unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Config::default()
        }),
        _ => Config::default(),
    };

    config.apply_env();
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<Config, CsError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str::<Config>(&content)?)
}

pub fn generate_config_sample() -> Result<(), CsError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        // Create directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| CsError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| CsError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(CsError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
