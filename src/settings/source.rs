//! Settings sources and the loader that resolves them by identifier.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use toml::Value;

use crate::config::ConfigError;
use crate::Error;

/// A namespace of named constants a [`Settings`](crate::Settings) container
/// copies from at construction.
///
/// Sources are read-only and read exactly once; implementations do any
/// parsing up front so `constants` cannot fail.
pub trait SettingsSource: Send + Sync + std::fmt::Debug {
    /// All constants the source exposes, public and internal alike.
    ///
    /// The container filters out reserved internal names; a source does not
    /// need to. Names are assumed unique within one source.
    fn constants(&self) -> Vec<(String, Value)>;
}

/// An in-memory settings source built from name/value pairs.
///
/// Useful for embedded defaults and as a test double.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    constants: Vec<(String, Value)>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.push((name.into(), value.into()));
        self
    }
}

impl SettingsSource for StaticSource {
    fn constants(&self) -> Vec<(String, Value)> {
        self.constants.clone()
    }
}

/// A settings source backed by a TOML file.
///
/// The file's top-level keys become the source's constants. The file is
/// parsed once, here; the source holds no handle to it afterwards.
#[derive(Debug, Clone)]
pub struct TomlSource {
    table: toml::Table,
}

impl TomlSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = toml::from_str(&contents).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { table })
    }
}

impl SettingsSource for TomlSource {
    fn constants(&self) -> Vec<(String, Value)> {
        self.table
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Resolves settings-source identifiers to registered sources.
///
/// The loader collaborator: callers register each source under a string
/// identifier, and [`Settings::initialize`](crate::Settings::initialize)
/// looks the identifier up here.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Box<dyn SettingsSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under `id`, replacing any previous registration.
    pub fn register(&mut self, id: impl Into<String>, source: impl SettingsSource + 'static) {
        self.sources.insert(id.into(), Box::new(source));
    }

    /// Looks up a source by identifier.
    ///
    /// Fails with [`Error::SourceNotFound`] for an unregistered identifier.
    pub fn load(&self, id: &str) -> Result<&dyn SettingsSource, Error> {
        self.sources
            .get(id)
            .map(Box::as_ref)
            .ok_or_else(|| Error::SourceNotFound(id.to_string()))
    }

    /// Convenience: registers a [`TomlSource`] loaded from `path` under `id`.
    pub fn register_toml_file(
        &mut self,
        id: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<(), ConfigError> {
        let source = TomlSource::load(path.into())?;
        self.sources.insert(id.into(), Box::new(source));
        Ok(())
    }
}
