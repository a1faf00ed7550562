use crate::config::ConfigError;
use crate::settings::Binding;
use thiserror::Error;

/// Top-level error type for the uniconf library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("settings source not found: `{0}`")]
    SourceNotFound(String),

    #[error("attribute `{name}` is already bound to {existing:?}")]
    AttributeConflict { name: String, existing: Box<Binding> },

    #[error("no attribute named `{0}`")]
    AttributeNotFound(String),
}
