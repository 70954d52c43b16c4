//! Server configuration from environment variables.
//!
//! Everything is read once at startup; nothing is reloaded while serving.

use std::path::{Path, PathBuf};

use red_light_source::registry::{DEFAULT_SOURCE_ID, find_source};
use red_light_source::source_def::{SourceDefinition, load_source_toml};

use crate::ServerError;

/// Port the dashboard listens on unless `PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 8050;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_STATIC_DIR: &str = "app/dist";

/// Startup configuration for the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Bundled source id, or path to a `.toml` definition (`RED_LIGHT_SOURCE`).
    pub source: String,
    /// CSV path overriding the source's default (`RED_LIGHT_DATA`).
    pub data_path: Option<PathBuf>,
    /// Directory holding a pre-built frontend (`RED_LIGHT_STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, applying defaults for
    /// missing or blank values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            source: get("RED_LIGHT_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE_ID.to_string()),
            data_path: get("RED_LIGHT_DATA").map(PathBuf::from),
            static_dir: get("RED_LIGHT_STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        }
    }

    /// Resolves the configured source to a definition.
    ///
    /// Values ending in `.toml` are read from disk; anything else is looked
    /// up among the bundled sources.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnknownSource`] for an unregistered id, or
    /// [`ServerError::Source`] if a definition file cannot be loaded.
    pub fn source_definition(&self) -> Result<SourceDefinition, ServerError> {
        let path = Path::new(&self.source);
        if path.extension().is_some_and(|ext| ext == "toml") {
            return Ok(load_source_toml(path)?);
        }
        find_source(&self.source).ok_or_else(|| ServerError::UnknownSource {
            id: self.source.clone(),
        })
    }

    /// CSV path to load: the override if set, else the source default.
    #[must_use]
    pub fn data_path(&self, definition: &SourceDefinition) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| definition.default_path.clone())
    }
}
