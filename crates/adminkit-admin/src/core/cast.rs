//! Column casts between stored and in-memory representations

use crate::types::{AdminError, AdminResult, Record, SettingsBlob};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How a stored column is represented in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cast {
	/// Settings blob string <-> key/value map
	Array,
}

impl Cast {
	pub fn as_str(&self) -> &'static str {
		match self {
			Cast::Array => "array",
		}
	}

	/// Stored form to in-memory form
	fn read(&self, column: &str, value: Value) -> AdminResult<Value> {
		match (self, value) {
			(Cast::Array, Value::String(raw)) => SettingsBlob::decode(&raw)
				.map(Value::Object)
				.map_err(|reason| cast_error(column, reason)),
			(Cast::Array, value @ Value::Object(_)) => Ok(value),
			(Cast::Array, other) => SettingsBlob::encode_value(&other)
				.and_then(|raw| SettingsBlob::decode(&raw))
				.map(Value::Object)
				.map_err(|reason| cast_error(column, reason)),
		}
	}

	/// In-memory form to stored form
	fn write(&self, column: &str, value: &Value) -> AdminResult<Value> {
		match self {
			Cast::Array => SettingsBlob::encode_value(value)
				.map(Value::String)
				.map_err(|reason| cast_error(column, reason)),
		}
	}
}

impl fmt::Display for Cast {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Cast {
	type Err = AdminError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"array" => Ok(Cast::Array),
			other => Err(AdminError::Config(format!("unknown cast '{other}'"))),
		}
	}
}

fn cast_error(column: &str, reason: String) -> AdminError {
	AdminError::Cast {
		column: column.to_string(),
		reason,
	}
}

/// Ordered `(column, cast)` declarations of one model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCasts {
	entries: Vec<(String, Cast)>,
}

impl FieldCasts {
	/// Validate declarations; a column may be cast only once.
	pub fn new<C: Into<String>>(entries: impl IntoIterator<Item = (C, Cast)>) -> AdminResult<Self> {
		let entries: Vec<(String, Cast)> = entries.into_iter().map(|(c, t)| (c.into(), t)).collect();
		let mut seen = HashSet::new();
		for (column, _) in &entries {
			if !seen.insert(column.as_str()) {
				return Err(AdminError::Config(format!(
					"column '{column}' is cast more than once"
				)));
			}
		}
		Ok(Self { entries })
	}

	/// Parse declarations read from settings (`column = "array"`).
	pub fn from_settings(casts: &BTreeMap<String, String>) -> AdminResult<Self> {
		let entries = casts
			.iter()
			.map(|(column, name)| Ok((column.clone(), name.parse::<Cast>()?)))
			.collect::<AdminResult<Vec<_>>>()?;
		Self::new(entries)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Cast)> {
		self.entries.iter().map(|(c, t)| (c.as_str(), *t))
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Columns cast to [`Cast::Array`]
	pub fn array_columns(&self) -> impl Iterator<Item = &str> {
		self.iter()
			.filter(|(_, cast)| *cast == Cast::Array)
			.map(|(column, _)| column)
	}

	/// Turn stored values of every present, non-null cast column into
	/// their in-memory form.
	pub fn apply_read(&self, record: &mut Record) -> AdminResult<()> {
		for (column, cast) in self.iter() {
			if !record.is_set(column) {
				continue;
			}
			if let Some(value) = record.remove(column) {
				record.set(column, cast.read(column, value)?);
			}
		}
		Ok(())
	}

	/// Turn in-memory values of every present, non-null cast column back
	/// into their stored form.
	pub fn apply_write(&self, record: &mut Record) -> AdminResult<()> {
		for (column, cast) in self.iter() {
			let stored = match record.get(column) {
				Some(value) if !value.is_null() => cast.write(column, value)?,
				_ => continue,
			};
			record.set(column, stored);
		}
		Ok(())
	}
}
