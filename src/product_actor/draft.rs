use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{ProductCreate, ProductPatch, ProductReplace};
use super::ProductError;

const KNOWN_FIELDS: [&str; 5] = ["id", "name", "category", "price", "inStock"];

/// Unvalidated request body for create, update and patch.
///
/// Only the known product fields are ever read from it; `id` and anything
/// unrecognised are dropped.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for ProductDraft {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl ProductDraft {
    /// Reads a raw request body. An empty or whitespace-only body is an empty
    /// draft whatever the content type; anything else must be a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, ProductError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ProductError::MalformedRequest(format!("Invalid JSON body: {e}")))?;
        match value {
            Value::Object(fields) => Ok(Self::from(fields)),
            _ => Err(ProductError::MalformedRequest("Request body must be a JSON object".to_string())),
        }
    }

    /// Validates a create body: name, category and price are mandatory.
    pub fn into_create(self) -> Result<ProductCreate, ProductError> {
        let (name, category, price) = self.required()?;
        Ok(ProductCreate { name, category, price, in_stock: self.in_stock()? })
    }

    /// Validates a full-update body. Same requirements as create.
    pub fn into_replace(self) -> Result<ProductReplace, ProductError> {
        let (name, category, price) = self.required()?;
        Ok(ProductReplace { name, category, price, in_stock: self.in_stock()? })
    }

    /// Validates a patch body. Nothing is mandatory, but each supplied field
    /// must have the right type.
    pub fn into_patch(self) -> Result<ProductPatch, ProductError> {
        self.log_ignored();
        let name = match self.fields.get("name") {
            None => None,
            Some(value) => Some(
                non_empty_str(value).ok_or(ProductError::InvalidField("Name must be a non-empty string"))?,
            ),
        };
        let category = match self.fields.get("category") {
            None => None,
            Some(value) => Some(
                non_empty_str(value)
                    .ok_or(ProductError::InvalidField("Category must be a non-empty string"))?,
            ),
        };
        let price = match self.fields.get("price") {
            None => None,
            Some(value) => Some(price(value)?),
        };
        Ok(ProductPatch { name, category, price, in_stock: self.in_stock()? })
    }

    fn required(&self) -> Result<(String, String, f64), ProductError> {
        self.log_ignored();
        let name = self.fields.get("name").and_then(non_empty_str);
        let category = self.fields.get("category").and_then(non_empty_str);
        match (name, category, self.fields.get("price")) {
            (Some(name), Some(category), Some(value)) => Ok((name, category, price(value)?)),
            _ => Err(ProductError::MissingFields),
        }
    }

    fn in_stock(&self) -> Result<Option<bool>, ProductError> {
        match self.fields.get("inStock") {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(_) => Err(ProductError::InvalidField("inStock must be a boolean")),
        }
    }

    fn log_ignored(&self) {
        let ignored: Vec<&str> = self
            .fields
            .keys()
            .map(String::as_str)
            .filter(|key| !KNOWN_FIELDS.contains(key))
            .collect();
        if !ignored.is_empty() {
            debug!(?ignored, "Ignoring unknown product fields");
        }
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn price(value: &Value) -> Result<f64, ProductError> {
    match value.as_f64() {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ProductError::InvalidPrice),
    }
}
