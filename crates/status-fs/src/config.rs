//! Agent settings and edit files in TOML, JSON or YAML

use serde::de::DeserializeOwned;
use std::fmt;

use crate::{Error, NormalizedPath, Result, io};

/// Text format of a settings file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// `.toml`, `.json`, `.yaml` and `.yml`, in any case.
    pub fn from_path(path: &NormalizedPath) -> Option<Self> {
        match path.extension()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Loads one kind of settings file.
///
/// `kind` is how errors refer to the file, e.g. "agent config" for the
/// `--config` file or "edits file" for the input of `apply`.
#[derive(Debug, Clone, Copy)]
pub struct ConfigStore {
    kind: &'static str,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::for_kind("config file")
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_kind(kind: &'static str) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Read and decode `path`.
    ///
    /// A missing file surfaces as the I/O error from [`io::read_text`], so
    /// callers can fall back to defaults with [`Error::is_not_found`].
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Decode `content` in the format `path` names.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        let format = Format::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
            kind: self.kind,
            path: path.to_native(),
            extension: path.extension().unwrap_or_default().to_string(),
        })?;

        let value = format.decode(content).map_err(|message| Error::ConfigParse {
            kind: self.kind,
            path: path.to_native(),
            format: format.to_string(),
            message,
        })?;
        tracing::debug!(kind = self.kind, path = %path, %format, "Decoded settings file");
        Ok(value)
    }
}
