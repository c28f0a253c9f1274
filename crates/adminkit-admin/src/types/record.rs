//! Records managed by admin screens
//!
//! A record is whatever row the consuming application's table holds. The
//! admin layer only reads a handful of well-known columns by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Soft-delete marker; only trashed records may be deleted
pub const TRASHED: i64 = -2;
/// Unpublished state
pub const UNPUBLISHED: i64 = 0;
/// Published state
pub const PUBLISHED: i64 = 1;
/// Archived state
pub const ARCHIVED: i64 = 2;

/// One row managed by an admin screen, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
	fields: Map<String, Value>,
}

impl Record {
	/// Empty record with no columns
	pub fn new() -> Self {
		Self::default()
	}

	/// Record for a row that does not exist yet (`id = 0`)
	pub fn blank() -> Self {
		let mut record = Self::new();
		record.set("id", 0);
		record
	}

	/// Column value, including explicit nulls
	pub fn get(&self, column: &str) -> Option<&Value> {
		self.fields.get(column)
	}

	/// True when the column exists and is not null
	pub fn is_set(&self, column: &str) -> bool {
		self.fields.get(column).is_some_and(|v| !v.is_null())
	}

	pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
		self.fields.insert(column.into(), value.into());
	}

	/// Builder-style [`Record::set`]
	pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(column, value);
		self
	}

	pub fn remove(&mut self, column: &str) -> Option<Value> {
		self.fields.remove(column)
	}

	pub fn columns(&self) -> impl Iterator<Item = &String> {
		self.fields.keys()
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.fields
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.fields
	}

	/// Primary key; `0` when missing, null or not an integer.
	pub fn id(&self) -> i64 {
		self.int("id").unwrap_or(0)
	}

	/// True for rows that have not been stored yet
	pub fn is_new(&self) -> bool {
		self.id() == 0
	}

	pub fn state(&self) -> Option<i64> {
		self.int("state")
	}

	pub fn published(&self) -> Option<i64> {
		self.int("published")
	}

	/// Id of the user holding the edit lock, if any
	pub fn checked_out(&self) -> Option<i64> {
		self.int("checked_out")
	}

	pub fn created_by(&self) -> Option<i64> {
		self.int("created_by")
	}

	/// Integer column value. Database drivers hand some integers back as
	/// strings, so numeric strings are accepted too.
	pub fn int(&self, column: &str) -> Option<i64> {
		match self.fields.get(column)? {
			Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
			Value::String(s) => s.trim().parse().ok(),
			Value::Bool(b) => Some(i64::from(*b)),
			_ => None,
		}
	}
}

impl From<Map<String, Value>> for Record {
	fn from(fields: Map<String, Value>) -> Self {
		Self { fields }
	}
}

impl From<Record> for Value {
	fn from(record: Record) -> Self {
		Value::Object(record.fields)
	}
}

impl TryFrom<Value> for Record {
	type Error = Value;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(fields) => Ok(Self { fields }),
			other => Err(other),
		}
	}
}
