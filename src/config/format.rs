//! File-extension driven format detection.

use std::path::Path;

use super::ConfigError;

/// A config file format the loader knows how to parse.
///
/// The set is closed: adding a format means adding a variant here, a suffix
/// in [`SupportedFormat::ALL`], and a branch in
/// [`ConfigHandle::load`](super::ConfigHandle::load). The `match` there has
/// no wildcard arm, so a missing branch is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedFormat {
    Json,
    Ini,
    Cfg,
}

impl SupportedFormat {
    /// All formats, in the order extensions are tested against a file name.
    pub const ALL: [SupportedFormat; 3] = [Self::Json, Self::Ini, Self::Cfg];

    /// The literal extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ini => "ini",
            Self::Cfg => "cfg",
        }
    }
}

/// Determines a file's format from its extension.
///
/// Takes the path's base name and tests it against each supported
/// extension's `.` + literal suffix, case-sensitively, in [`SupportedFormat::ALL`]
/// order. Pure string inspection; the file is never touched.
///
/// Fails with [`ConfigError::UnknownFileExtension`] carrying the base name
/// when no suffix matches.
pub fn resolve_format(path: impl AsRef<Path>) -> Result<SupportedFormat, ConfigError> {
    let path = path.as_ref();
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Err(ConfigError::UnknownFileExtension(path.display().to_string())),
    };

    for format in SupportedFormat::ALL {
        let suffix = format!(".{}", format.extension());
        if file_name.ends_with(&suffix) {
            return Ok(format);
        }
    }

    Err(ConfigError::UnknownFileExtension(file_name))
}
