use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// A catalog entry as stored on the store record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Absolute URL or storage-relative path; empty for none
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub image: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Decode a product list, dropping (and logging) entries that don't parse
    pub fn list_from_value(value: &Value) -> Vec<Product> {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Null => return Vec::new(),
            other => {
                warn!(found = %json_type(other), "Product list is not an array, ignoring");
                return Vec::new();
            }
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Product>(entry.clone()) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed product");
                    None
                }
            })
            .collect()
    }
}

/// Products that should be shown, in input order
pub fn active_products(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_active).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Ids come from the record store as either numbers or strings
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            json_type(&other)
        ))),
    }
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        other => Err(serde::de::Error::custom(format!(
            "expected string, found {}",
            json_type(&other)
        ))),
    }
}

// Decimal columns serialize as strings
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {:?}: {}", s, e))),
        other => Err(serde::de::Error::custom(format!(
            "expected number, found {}",
            json_type(&other)
        ))),
    }
}
