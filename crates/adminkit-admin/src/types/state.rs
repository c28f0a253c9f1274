//! Model state and pagination

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Request-scoped model state (`filter.*`, `list.*`, `<name>.id`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelState {
	values: BTreeMap<String, Value>,
}

impl ModelState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	/// Value for `key`, or `default` when unset or null
	pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
		match self.values.get(key) {
			Some(v) if !v.is_null() => v.clone(),
			_ => default.into(),
		}
	}

	/// Value for `key` as text; unset and null read as an empty string.
	pub fn get_string(&self, key: &str) -> String {
		self.values.get(key).map(stringify).unwrap_or_default()
	}

	/// Integer value for `key`, accepting numeric strings
	pub fn get_int(&self, key: &str) -> Option<i64> {
		match self.values.get(key)? {
			Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
			Value::String(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(key.into(), value.into());
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.values.iter()
	}
}

/// Text form of a state value: null and `false` are blank, `true` is `"1"`.
pub fn stringify(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(true) => "1".to_string(),
		Value::Bool(false) => String::new(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Page window over a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// Offset of the first row on the page
	pub start: u64,
	/// Rows per page; `0` shows everything
	pub limit: u64,
	/// Rows matching the list query
	pub total: u64,
}

impl Pagination {
	/// Build a page window. A start past the last row moves to the last page.
	pub fn new(start: u64, limit: u64, total: u64) -> Self {
		let start = if limit == 0 || total == 0 {
			0
		} else if start >= total && total > 0 {
			(total - 1) / limit * limit
		} else {
			start / limit * limit
		};
		Self {
			start,
			limit,
			total,
		}
	}

	pub fn pages_total(&self) -> u64 {
		if self.limit == 0 {
			1
		} else {
			self.total.div_ceil(self.limit).max(1)
		}
	}

	/// One-based current page
	pub fn pages_current(&self) -> u64 {
		if self.limit == 0 {
			1
		} else {
			self.start / self.limit + 1
		}
	}
}
