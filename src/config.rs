use clap::Args;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Remote API and UI settings. Every flag falls back to an environment
/// variable, and `.env` is loaded before parsing.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Base URL of the movie catalog API
    #[arg(long, env = "FILM_API_BASE")]
    pub api_base: Option<String>,

    /// API key sent as the X-API-KEY header
    #[arg(long, env = "FILM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Films listing endpoint (main slider)
    #[arg(long, env = "FILM_ENDPOINT_FILMS", default_value = "films")]
    pub films_endpoint: String,

    /// Popular films endpoint
    #[arg(long, env = "FILM_ENDPOINT_POPULAR", default_value = "films/popular")]
    pub popular_endpoint: String,

    /// Search endpoint
    #[arg(long, env = "FILM_ENDPOINT_SEARCH", default_value = "films/search")]
    pub search_endpoint: String,

    /// Query parameter carrying the search text
    #[arg(long, env = "FILM_SEARCH_PARAM", default_value = "query")]
    pub search_param: String,

    /// Genres endpoint
    #[arg(long, env = "FILM_ENDPOINT_GENRES", default_value = "allGenres")]
    pub genres_endpoint: String,

    /// Directory with genres/ and countries/ icons
    #[arg(long, env = "FILM_ASSETS_DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Delay between the last keystroke and the search request
    #[arg(long, env = "FILM_SEARCH_DEBOUNCE_MS", default_value_t = 300)]
    pub debounce_ms: u64,

    /// Log filter (e.g. "info", "film_explorer=debug")
    #[arg(long, env = "FILM_EXPLORER_LOG", default_value = "info")]
    pub log_level: String,

    /// Log file (defaults to the user cache directory)
    #[arg(long, env = "FILM_EXPLORER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub films: String,
    pub popular: String,
    pub search: String,
    pub search_param: String,
    pub genres: String,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub api_key: Option<String>,
    pub endpoints: Endpoints,
    pub assets_dir: PathBuf,
    pub debounce: Duration,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API base URL is not set")]
    MissingBaseUrl,

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Endpoint '{0}' must not be empty")]
    EmptyEndpoint(&'static str),

    #[error("Search debounce {0}ms exceeds {MAX_DEBOUNCE_MS}ms")]
    DebounceTooLong(u64),
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::MissingBaseUrl => {
                "Set FILM_API_BASE (or pass --api-base) to the catalog API URL".to_string()
            }
            ConfigError::InvalidBaseUrl { url, reason } => {
                format!("'{}' is not a usable API URL: {}", url, reason)
            }
            ConfigError::EmptyEndpoint(name) => format!("The {} endpoint is empty", name),
            ConfigError::DebounceTooLong(ms) => {
                format!("Search debounce of {}ms is too long (max {}ms)", ms, MAX_DEBOUNCE_MS)
            }
        }
    }
}

impl Config {
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let raw = args
            .api_base
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let api_base = parse_base_url(raw.trim())?;

        let endpoints = Endpoints {
            films: non_empty("films", args.films_endpoint)?,
            popular: non_empty("popular", args.popular_endpoint)?,
            search: non_empty("search", args.search_endpoint)?,
            search_param: non_empty("search parameter", args.search_param)?,
            genres: non_empty("genres", args.genres_endpoint)?,
        };

        if args.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong(args.debounce_ms));
        }

        Ok(Config {
            api_base,
            api_key: args.api_key.filter(|k| !k.is_empty()),
            endpoints,
            assets_dir: args.assets_dir,
            debounce: Duration::from_millis(args.debounce_ms),
            log_level: args.log_level,
            log_file: args.log_file,
        })
    }

    /// Log file path: explicit flag, else `<cache dir>/film-explorer.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }
        directories::ProjectDirs::from("dev", "film-explorer", "film-explorer")
            .map(|dirs| dirs.cache_dir().join("film-explorer.log"))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::EmptyEndpoint(name))
    } else {
        Ok(trimmed.to_string())
    }
}


#[cfg(test)]
impl Config {
    /// Defaults with the given base URL and no debounce.
    pub fn for_tests(base: &str) -> Self {
        Config {
            api_base: Url::parse(base).expect("test base url"),
            api_key: None,
            endpoints: Endpoints {
                films: "films".to_string(),
                popular: "films/popular".to_string(),
                search: "films/search".to_string(),
                search_param: "query".to_string(),
                genres: "allGenres".to_string(),
            },
            assets_dir: PathBuf::from("assets"),
            debounce: Duration::ZERO,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}
