//! The settings container: source constants plus named config files under
//! one set of attributes.

mod source;

pub use source::{SettingsSource, SourceRegistry, StaticSource, TomlSource};

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use toml::Value;

use crate::config::{resolve_format, ConfigError, ConfigHandle};
use crate::Error;

/// Names with this prefix are internal to a source and never copied.
const RESERVED_PREFIX: &str = "__";

/// One attribute of a [`Settings`] container.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A constant copied from the settings source.
    Constant(Value),
    /// A config file bound under a caller-chosen name.
    Config(ConfigHandle),
}

/// A unified view over one settings source and any number of named config
/// files.
///
/// Construction copies the source's public constants; config files are
/// bound at construction and/or later via [`bind_config_files`]. A name is
/// never bound twice: a collision fails with [`Error::AttributeConflict`]
/// and leaves the existing attribute untouched.
///
/// ## Example
///
/// ```no_run
/// use uniconf::{Settings, SourceRegistry, StaticSource};
///
/// let mut registry = SourceRegistry::new();
/// registry.register("app", StaticSource::new().with("SOME_VAR", 1i64));
///
/// let mut settings = Settings::initialize(&registry, "app")?;
/// settings.bind_config_files([("db", "config/db.json")])?;
///
/// let db = settings.config("db")?;
/// # Ok::<(), uniconf::Error>(())
/// ```
///
/// [`bind_config_files`]: Self::bind_config_files
#[derive(Debug, Default)]
pub struct Settings {
    attrs: BTreeMap<String, Binding>,
}

impl Settings {
    /// Builds a container from the source registered under `source_id`.
    ///
    /// Every public constant of the source (any name not starting with the
    /// reserved `__` prefix) becomes an attribute. Fails with
    /// [`Error::SourceNotFound`] if the identifier is not registered.
    pub fn initialize(registry: &SourceRegistry, source_id: &str) -> Result<Self, Error> {
        let source = registry.load(source_id)?;
        let mut settings = Self::default();
        for (name, value) in source.constants() {
            if name.starts_with(RESERVED_PREFIX) {
                continue;
            }
            // Sources are assumed well-formed: no duplicate names.
            settings.attrs.insert(name, Binding::Constant(value));
        }
        Ok(settings)
    }

    /// [`initialize`](Self::initialize), then bind `config_files`.
    ///
    /// Entries are bound in iteration order; see
    /// [`bind_config_files`](Self::bind_config_files) for the failure
    /// semantics.
    pub fn initialize_with_files<N, P>(
        registry: &SourceRegistry,
        source_id: &str,
        config_files: impl IntoIterator<Item = (N, P)>,
    ) -> Result<Self, Error>
    where
        N: Into<String>,
        P: AsRef<Path>,
    {
        let mut settings = Self::initialize(registry, source_id)?;
        settings.bind_config_files(config_files)?;
        Ok(settings)
    }

    /// Parses each `(name, path)` entry and binds the result under `name`.
    ///
    /// For each entry, in iteration order: the format is resolved from the
    /// path's extension, the file is parsed, and the handle is bound —
    /// unless `name` is already taken, in which case the call fails with
    /// [`Error::AttributeConflict`] carrying the existing binding.
    ///
    /// Not transactional: entries bound before a failing entry remain
    /// bound. Callers relying on partial binding get exactly the entries
    /// that preceded the failure.
    pub fn bind_config_files<N, P>(
        &mut self,
        config_files: impl IntoIterator<Item = (N, P)>,
    ) -> Result<(), Error>
    where
        N: Into<String>,
        P: AsRef<Path>,
    {
        for (name, path) in config_files {
            let name = name.into();
            let format = resolve_format(&path)?;
            let handle = ConfigHandle::load(format, &path)?;
            if let Some(existing) = self.attrs.get(&name) {
                return Err(Error::AttributeConflict {
                    name,
                    existing: Box::new(existing.clone()),
                });
            }
            self.attrs.insert(name, Binding::Config(handle));
        }
        Ok(())
    }

    /// Looks up an attribute by name.
    ///
    /// Fails with [`Error::AttributeNotFound`] when the name was never
    /// bound. A missing key *inside* a bound handle is a different failure
    /// ([`ConfigError::KeyNotFound`]) raised by the handle itself.
    pub fn get(&self, name: &str) -> Result<&Binding, Error> {
        self.attrs
            .get(name)
            .ok_or_else(|| Error::AttributeNotFound(name.to_string()))
    }

    /// Looks up a settings-source constant by name.
    pub fn constant(&self, name: &str) -> Result<&Value, Error> {
        match self.get(name)? {
            Binding::Constant(value) => Ok(value),
            Binding::Config(_) => Err(Error::AttributeNotFound(name.to_string())),
        }
    }

    /// Deserializes a settings-source constant into `T`.
    pub fn constant_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        let value = self.constant(name)?.clone();
        value
            .try_into()
            .map_err(|e| Error::Config(ConfigError::Deserialize(e)))
    }

    /// Looks up a bound config handle by name.
    pub fn config(&self, name: &str) -> Result<&ConfigHandle, Error> {
        match self.get(name)? {
            Binding::Config(handle) => Ok(handle),
            Binding::Constant(_) => Err(Error::AttributeNotFound(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// All attribute names, constants and config handles alike.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
