pub mod config;
mod error;
pub mod settings;

pub use config::{resolve_format, ConfigError, ConfigHandle, IniDocument, SupportedFormat};
pub use error::Error;
pub use settings::{Binding, Settings, SettingsSource, SourceRegistry, StaticSource, TomlSource};
