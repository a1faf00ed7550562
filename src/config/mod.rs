//! Config file format detection and parsing.

mod error;
mod format;
mod handle;

pub use error::ConfigError;
pub use format::{resolve_format, SupportedFormat};
pub use handle::{ConfigHandle, IniDocument};
