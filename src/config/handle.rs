//! Parsed config file representations.

use std::collections::BTreeMap;
use std::path::Path;

use ini::Ini;

use super::format::SupportedFormat;
use super::ConfigError;

/// The in-memory form of one bound config file.
///
/// JSON files keep the parser's full nested value tree. INI and CFG files
/// share a parser and flatten to a two-level section/key map of raw
/// strings.
#[derive(Debug, Clone)]
pub enum ConfigHandle {
    Json(serde_json::Value),
    Ini(IniDocument),
}

impl ConfigHandle {
    /// Parses the file at `path` according to `format`.
    ///
    /// The file is read once, up front; the handle holds no reference to it
    /// afterwards, and a parse failure leaves nothing open. Malformed input
    /// surfaces the underlying parser's error together with the path.
    pub fn load(format: SupportedFormat, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        match format {
            SupportedFormat::Json => {
                let value =
                    serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParse {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                Ok(Self::Json(value))
            }
            SupportedFormat::Ini | SupportedFormat::Cfg => {
                let ini = Ini::load_from_str(&contents).map_err(|e| ConfigError::IniParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                Ok(Self::Ini(IniDocument::from_ini(&ini)))
            }
        }
    }

    /// The JSON value tree, if this handle came from a JSON file.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Ini(_) => None,
        }
    }

    /// The section map, if this handle came from an INI or CFG file.
    pub fn as_ini(&self) -> Option<&IniDocument> {
        match self {
            Self::Ini(doc) => Some(doc),
            Self::Json(_) => None,
        }
    }

    /// Looks up a top-level key in a JSON handle.
    pub fn key(&self, name: &str) -> Result<&serde_json::Value, ConfigError> {
        self.lookup(&[name])
    }

    /// Walks a chain of object keys in a JSON handle.
    ///
    /// Fails with [`ConfigError::KeyNotFound`] naming the first absent key.
    /// A handle of the wrong shape (INI, or a scalar where an object was
    /// expected) reports the key it could not descend into.
    pub fn lookup(&self, keys: &[&str]) -> Result<&serde_json::Value, ConfigError> {
        let mut current = match self {
            Self::Json(value) => value,
            Self::Ini(_) => {
                let key = keys.first().copied().unwrap_or_default();
                return Err(ConfigError::KeyNotFound(key.to_string()));
            }
        };
        for key in keys {
            current = current
                .get(key)
                .ok_or_else(|| ConfigError::KeyNotFound((*key).to_string()))?;
        }
        Ok(current)
    }

    /// Looks up `section`/`key` in an INI or CFG handle.
    pub fn value(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        match self {
            Self::Ini(doc) => doc.value(section, key),
            Self::Json(_) => Err(ConfigError::KeyNotFound(section.to_string())),
        }
    }
}

/// A parsed INI/CFG file: section name → key → raw string value.
///
/// Leaf values are kept as the strings the parser produced; no type
/// coercion. A duplicate key within a section keeps the last occurrence.
/// Keys appearing before any section header live under the empty section
/// name.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    fn from_ini(ini: &Ini) -> Self {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (section, properties) in ini.iter() {
            let entry = sections.entry(section.unwrap_or("").to_string()).or_default();
            for (key, value) in properties.iter() {
                entry.insert(key.to_string(), value.to_string());
            }
        }
        Self { sections }
    }

    /// All keys of one section.
    pub fn section(&self, name: &str) -> Result<&BTreeMap<String, String>, ConfigError> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::KeyNotFound(name.to_string()))
    }

    /// A single value, by section and key.
    pub fn value(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.section(section)?
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_json_handle_nested_lookup() {
        let file = temp_file(
            ".json",
            r#"{"test_var_1": 1, "test_var_2": "two", "dict_var": {"one": 1}}"#,
        );
        let handle = ConfigHandle::load(SupportedFormat::Json, file.path()).unwrap();

        assert_eq!(handle.key("test_var_1").unwrap(), &serde_json::json!(1));
        assert_eq!(handle.key("test_var_2").unwrap(), &serde_json::json!("two"));
        assert_eq!(
            handle.lookup(&["dict_var", "one"]).unwrap(),
            &serde_json::json!(1)
        );
    }

    #[test]
    fn test_json_missing_key() {
        let file = temp_file(".json", r#"{"dict_var": {"one": 1}}"#);
        let handle = ConfigHandle::load(SupportedFormat::Json, file.path()).unwrap();

        let err = handle.lookup(&["dict_var", "not existed var"]).unwrap_err();
        match err {
            ConfigError::KeyNotFound(key) => assert_eq!(key, "not existed var"),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let file = temp_file(".json", "{not json");
        let result = ConfigHandle::load(SupportedFormat::Json, file.path());
        assert!(matches!(result, Err(ConfigError::JsonParse { .. })));
    }

    #[test]
    fn test_ini_handle_values_stay_strings() {
        let file = temp_file(
            ".ini",
            "[INI]\nvar = 2\nnot number = word\nnumber = some interesting number\n",
        );
        let handle = ConfigHandle::load(SupportedFormat::Ini, file.path()).unwrap();

        assert_eq!(handle.value("INI", "var").unwrap(), "2");
        assert_eq!(handle.value("INI", "not number").unwrap(), "word");
        assert_eq!(
            handle.value("INI", "number").unwrap(),
            "some interesting number"
        );
    }

    #[test]
    fn test_cfg_shares_the_ini_parser() {
        let file = temp_file(".cfg", "[CFG]\ncfg var = 1\nnot cfg number = cfg\n");
        let handle = ConfigHandle::load(SupportedFormat::Cfg, file.path()).unwrap();

        assert_eq!(handle.value("CFG", "cfg var").unwrap(), "1");
        assert_eq!(handle.value("CFG", "not cfg number").unwrap(), "cfg");
        assert!(matches!(
            handle.value("CFG", "var"),
            Err(ConfigError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_ini_missing_section() {
        let file = temp_file(".ini", "[ONLY]\nkey = value\n");
        let handle = ConfigHandle::load(SupportedFormat::Ini, file.path()).unwrap();
        let doc = handle.as_ini().unwrap();

        assert!(matches!(
            doc.section("OTHER"),
            Err(ConfigError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_ini_duplicate_key_last_write_wins() {
        let file = temp_file(".ini", "[S]\nkey = first\nkey = second\n");
        let handle = ConfigHandle::load(SupportedFormat::Ini, file.path()).unwrap();

        assert_eq!(handle.value("S", "key").unwrap(), "second");
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigHandle::load(SupportedFormat::Json, "/nonexistent/app.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_shape_accessors() {
        let json = temp_file(".json", "{}");
        let ini = temp_file(".ini", "[S]\nk = v\n");
        let json_handle = ConfigHandle::load(SupportedFormat::Json, json.path()).unwrap();
        let ini_handle = ConfigHandle::load(SupportedFormat::Ini, ini.path()).unwrap();

        assert!(json_handle.as_json().is_some());
        assert!(json_handle.as_ini().is_none());
        assert!(ini_handle.as_ini().is_some());
        assert!(ini_handle.as_json().is_none());
    }
}
