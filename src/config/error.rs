use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown config file extension: `{0}`")]
    UnknownFileExtension(String),

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON config file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse INI config file '{path}': {source}")]
    IniParse {
        path: PathBuf,
        source: ini::ParseError,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize config value: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("key not found: `{0}`")]
    KeyNotFound(String),
}
