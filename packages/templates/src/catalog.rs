use crate::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

const CLASSIC_MARKUP: &str = include_str!("../markup/classic.html");
const MODERN_MARKUP: &str = include_str!("../markup/modern.html");
const MINIMAL_MARKUP: &str = include_str!("../markup/minimal.html");

/// Key of one of the fixed templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKey {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 3] = [TemplateKey::Classic, TemplateKey::Modern, TemplateKey::Minimal];

    /// Look up a key by name, `None` for anything outside the catalog
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(TemplateKey::Classic),
            "modern" => Some(TemplateKey::Modern),
            "minimal" => Some(TemplateKey::Minimal),
            _ => None,
        }
    }

    /// Unknown keys fall back to the default template
    pub fn parse_or_default(key: &str) -> Self {
        Self::parse(key).unwrap_or_else(|| {
            warn!(key = %key, fallback = %TemplateKey::default(), "Unknown template key, using default");
            TemplateKey::default()
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Classic => "classic",
            TemplateKey::Modern => "modern",
            TemplateKey::Minimal => "minimal",
        }
    }

    /// Markup file backing this key
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKey::Classic => "classic.html",
            TemplateKey::Modern => "modern.html",
            TemplateKey::Minimal => "minimal.html",
        }
    }

    /// Brand text the template ships with in its nav, logo and footer
    pub fn placeholder_brand(&self) -> &'static str {
        match self {
            TemplateKey::Classic => "LUXE",
            TemplateKey::Modern => "NOVA",
            TemplateKey::Minimal => "ATELIER",
        }
    }

    fn embedded_markup(&self) -> &'static str {
        match self {
            TemplateKey::Classic => CLASSIC_MARKUP,
            TemplateKey::Modern => MODERN_MARKUP,
            TemplateKey::Minimal => MINIMAL_MARKUP,
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw template markup, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    pub key: TemplateKey,
    pub raw_markup: String,
}

impl TemplateDocument {
    pub fn new(key: TemplateKey, raw_markup: impl Into<String>) -> Self {
        Self {
            key,
            raw_markup: raw_markup.into(),
        }
    }

    pub fn placeholder_brand(&self) -> &'static str {
        self.key.placeholder_brand()
    }
}

/// Where template markup is read from
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSource {
    /// Compiled into the binary
    Embedded,
    /// One file per key under a directory
    Directory(PathBuf),
}

/// Fixed key → markup mapping
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    source: TemplateSource,
}

impl TemplateCatalog {
    pub fn embedded() -> Self {
        Self {
            source: TemplateSource::Embedded,
        }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: TemplateSource::Directory(dir.into()),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn keys(&self) -> &'static [TemplateKey] {
        &TemplateKey::ALL
    }

    /// Load a template by key
    pub fn load(&self, key: TemplateKey) -> Result<TemplateDocument, TemplateError> {
        match &self.source {
            TemplateSource::Embedded => Ok(TemplateDocument::new(key, key.embedded_markup())),
            TemplateSource::Directory(dir) => {
                let path = dir.join(key.file_name());
                debug!(path = %path.display(), "Reading template from disk");
                match std::fs::read_to_string(&path) {
                    Ok(markup) => Ok(TemplateDocument::new(key, markup)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(TemplateError::TemplateNotFound {
                            key: key.to_string(),
                            path,
                        })
                    }
                    Err(source) => Err(TemplateError::Io { path, source }),
                }
            }
        }
    }

    /// Load a template by its stored name, unknown names resolve to the default
    pub fn load_named(&self, key: &str) -> Result<TemplateDocument, TemplateError> {
        self.load(TemplateKey::parse_or_default(key))
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::embedded()
    }
}
