//! # Content Document
//!
//! The persisted description of everything a store owner customized. Both
//! renderers are pure functions of this document, the template and the
//! product list.
//!
//! Stored as opaque camelCase JSON on the store record. Loading is lenient:
//! a field that fails to deserialize is replaced by its default and reported,
//! so one bad value never blanks the whole page.

use crate::errors::ContentParseError;
use crate::identity::ElementId;
use crate::text::css_value;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Version written by this build
pub const CONTENT_VERSION: u32 = 1;

/// All customizations for one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default = "current_version")]
    pub version: u32,

    #[serde(default)]
    pub hero: HeroContent,

    #[serde(default)]
    pub background: BackgroundSettings,

    /// Sparse override map: only nodes that deviate from the template
    #[serde(default)]
    pub element_states: BTreeMap<ElementId, ElementState>,

    #[serde(default)]
    pub presets: Vec<Preset>,
}

fn current_version() -> u32 {
    CONTENT_VERSION
}

impl Default for ContentDocument {
    fn default() -> Self {
        Self {
            version: CONTENT_VERSION,
            hero: HeroContent::default(),
            background: BackgroundSettings::default(),
            element_states: BTreeMap::new(),
            presets: Vec::new(),
        }
    }
}

/// Hero text and typography
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroContent {
    pub title: String,
    /// Rich text (HTML fragment)
    pub subtitle: String,
    pub button_text: String,
    pub title_style: TextStyle,
    pub subtitle_style: TextStyle,
    pub button_style: TextStyle,
}

/// Typography overrides, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<bool>,
}

impl TextStyle {
    /// CSS declarations in a fixed order, blank values skipped
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("font-family", &self.font_family),
            ("font-size", &self.font_size),
            ("font-weight", &self.font_weight),
            ("font-style", &self.font_style),
            ("color", &self.color),
            ("background-color", &self.background_color),
            ("margin-top", &self.margin_top),
            ("margin-bottom", &self.margin_bottom),
            ("padding", &self.padding),
        ];

        let mut decls: Vec<(&'static str, String)> = fields
            .into_iter()
            .filter_map(|(prop, value)| {
                let value = css_value(value.as_deref()?);
                (!value.is_empty()).then_some((prop, value))
            })
            .collect();

        if self.center == Some(true) {
            decls.push(("text-align", "center".to_string()));
        }
        decls
    }

    pub fn is_empty(&self) -> bool {
        self.declarations().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Image,
}

/// Page background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub color: String,
    /// Absolute URL or storage-relative path
    pub image: String,
    pub repeat: String,
    pub size: String,
    pub position: String,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            color: String::new(),
            image: String::new(),
            repeat: "no-repeat".to_string(),
            size: "cover".to_string(),
            position: "center".to_string(),
        }
    }
}

impl BackgroundSettings {
    /// Whether anything would be emitted for this background
    pub fn is_set(&self) -> bool {
        match self.kind {
            BackgroundKind::Color => !self.color.trim().is_empty(),
            BackgroundKind::Image => !self.image.trim().is_empty() || !self.color.trim().is_empty(),
        }
    }
}

/// Recorded deviation of one node from the template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementState {
    pub deleted: bool,
    pub hidden: bool,
    pub offset_left: f64,
    pub offset_top: f64,
    /// Replacement text from an inline edit of a non-hero node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementState {
    pub fn is_default(&self) -> bool {
        *self == ElementState::default()
    }

    pub fn is_moved(&self) -> bool {
        self.offset_left != 0.0 || self.offset_top != 0.0
    }
}

/// Named reusable text style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    pub name: String,
    pub style: TextStyle,
}

impl ContentDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parse, failing on the first malformed field
    pub fn from_json(json: &str) -> Result<Self, ContentParseError> {
        serde_json::from_str(json).map_err(|e| ContentParseError::Document(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Parse raw JSON text, recovering per field
    pub fn from_json_lenient(json: &str) -> (Self, Vec<ContentParseError>) {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value_lenient(&value),
            Err(e) => {
                warn!(error = %e, "Content document is not valid JSON, using defaults");
                (Self::default(), vec![ContentParseError::Document(e.to_string())])
            }
        }
    }

    /// Build from an already-decoded value, recovering per field.
    ///
    /// Hero and background are recovered field by field, element states entry
    /// by entry, presets item by item. Documents written before versioning
    /// (no `version`) are upgraded in place.
    pub fn from_value_lenient(value: &Value) -> (Self, Vec<ContentParseError>) {
        let mut errors = Vec::new();
        let mut doc = Self::default();

        let root = match value {
            Value::Object(map) => map,
            Value::Null => return (doc, errors),
            other => {
                errors.push(ContentParseError::Document(format!(
                    "expected an object, found {}",
                    json_kind(other)
                )));
                return (doc, errors);
            }
        };

        doc.version = match root.get("version") {
            None | Some(Value::Null) => CONTENT_VERSION,
            Some(v) => match v.as_u64() {
                Some(version) if version <= u64::from(CONTENT_VERSION) => CONTENT_VERSION,
                _ => {
                    errors.push(ContentParseError::field("version", format!("unsupported version {}", v)));
                    CONTENT_VERSION
                }
            },
        };

        if let Some(hero) = root.get("hero") {
            doc.hero = recover_struct(hero, "hero", &mut errors);
        }
        if let Some(background) = root.get("background") {
            doc.background = recover_struct(background, "background", &mut errors);
        }

        match root.get("elementStates") {
            None | Some(Value::Null) => {}
            Some(Value::Object(states)) => {
                for (id, state) in states {
                    match serde_json::from_value::<ElementState>(state.clone()) {
                        Ok(state) => {
                            doc.element_states.insert(ElementId::new(id.clone()), state);
                        }
                        Err(e) => errors.push(ContentParseError::field(format!("elementStates.{}", id), e)),
                    }
                }
            }
            Some(other) => errors.push(ContentParseError::field(
                "elementStates",
                format!("expected an object, found {}", json_kind(other)),
            )),
        }

        match root.get("presets") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    match serde_json::from_value::<Preset>(item.clone()) {
                        Ok(preset) => doc.presets.push(preset),
                        Err(e) => errors.push(ContentParseError::field(format!("presets[{}]", idx), e)),
                    }
                }
            }
            Some(other) => errors.push(ContentParseError::field(
                "presets",
                format!("expected an array, found {}", json_kind(other)),
            )),
        }

        for error in &errors {
            warn!(error = %error, "Recovered malformed content field");
        }

        (doc, errors)
    }
}

/// Deserialize a struct whole, else field by field onto its default
fn recover_struct<T>(value: &Value, path: &str, errors: &mut Vec<ContentParseError>) -> T
where
    T: DeserializeOwned + Serialize + Default,
{
    if let Ok(parsed) = serde_json::from_value::<T>(value.clone()) {
        return parsed;
    }

    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            errors.push(ContentParseError::field(
                path,
                format!("expected an object, found {}", json_kind(other)),
            ));
            return T::default();
        }
    };

    let mut accepted = Map::new();
    for (key, field_value) in fields {
        let mut probe = Map::new();
        probe.insert(key.clone(), field_value.clone());
        match serde_json::from_value::<T>(Value::Object(probe)) {
            Ok(_) => {
                accepted.insert(key.clone(), field_value.clone());
            }
            Err(e) => errors.push(ContentParseError::field(format!("{}.{}", path, key), e)),
        }
    }

    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
