//! Settings blob codec
//!
//! A settings blob is a flat JSON object stored in a single text column.
//! Reading decodes it into a map; writing encodes the map back to text.

use serde_json::{Map, Value};

/// Codec between a stored settings string and its key/value map
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsBlob;

impl SettingsBlob {
	/// Decode a stored blob. Blank input decodes to an empty map.
	pub fn decode(raw: &str) -> Result<Map<String, Value>, String> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Ok(Map::new());
		}
		match serde_json::from_str::<Value>(trimmed).map_err(|e| e.to_string())? {
			Value::Object(map) => Ok(map),
			Value::Array(items) => Ok(Self::index_map(items)),
			other => Err(format!("expected an object, found {}", kind(&other))),
		}
	}

	/// Encode a map for storage.
	pub fn encode(map: &Map<String, Value>) -> String {
		Value::Object(map.clone()).to_string()
	}

	/// Normalize any in-memory value into its stored string form.
	///
	/// Maps encode directly, strings are decoded and re-encoded, and lists
	/// become maps keyed by position.
	pub fn encode_value(value: &Value) -> Result<String, String> {
		match value {
			Value::Object(map) => Ok(Self::encode(map)),
			Value::String(raw) => Ok(Self::encode(&Self::decode(raw)?)),
			Value::Array(items) => Ok(Self::encode(&Self::index_map(items.clone()))),
			other => Err(format!("expected an object, found {}", kind(other))),
		}
	}

	fn index_map(items: Vec<Value>) -> Map<String, Value> {
		items
			.into_iter()
			.enumerate()
			.map(|(i, v)| (i.to_string(), v))
			.collect()
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "an object",
	}
}
